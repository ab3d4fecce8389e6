//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::TollService;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, toll};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        toll::calculate_toll,
        toll::validate_request,
        toll::list_vehicle_types,
        toll::get_fee_schedule,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            toll::CalculateTollRequest,
            toll::TollFeeResponse,
            toll::TollWindowDto,
            toll::ValidateResponse,
            toll::VehicleTypeDto,
            toll::FeeRangeDto,
            toll::FeeScheduleResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health and loaded configuration"),
        (name = "Toll", description = "Daily congestion toll calculation"),
    ),
    info(
        title = "Toll Fee Service API",
        version = "1.0.0",
        description = "Computes the daily congestion toll owed by a vehicle from its passage times",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(service: Arc<TollService>, prometheus_handle: PrometheusHandle) -> Router {
    let toll_state = toll::TollState {
        service: service.clone(),
    };
    let health_state = health::HealthState {
        service,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = MetricsState {
        handle: prometheus_handle,
    };

    let toll_routes = Router::new()
        .route("/vehicle", post(toll::calculate_toll))
        .route("/validate", post(toll::validate_request))
        .route("/vehicle-types", get(toll::list_vehicle_types))
        .route("/fee-schedule", get(toll::get_fee_schedule))
        .with_state(toll_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check).with_state(health_state))
        .route("/metrics", get(prometheus_metrics).with_state(metrics_state))
        .nest("/api/v1/toll", toll_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveTime;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::{RequestValidator, TollCalculator};
    use crate::domain::{
        CalendarRules, ExemptionPolicy, FeeRange, FeeSchedule, VehicleTypeEntry, VehicleTypeTable,
    };
    use crate::infrastructure::holidays::SwedishHolidayCalendar;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn service_with(types: VehicleTypeTable, schedule: FeeSchedule) -> Arc<TollService> {
        let zone = chrono_tz::Europe::Stockholm;
        let types = Arc::new(types);
        let policy = ExemptionPolicy::new(
            types.clone(),
            Arc::new(SwedishHolidayCalendar),
            CalendarRules::default(),
        );
        Arc::new(TollService::new(
            RequestValidator::new(types, zone),
            TollCalculator::new(Arc::new(schedule), Arc::new(policy)),
            "SEK",
            zone,
        ))
    }

    fn gothenburg() -> FeeSchedule {
        FeeSchedule::new(vec![
            FeeRange::new(8, hm(6, 0), hm(6, 29)),
            FeeRange::new(13, hm(6, 30), hm(6, 59)),
            FeeRange::new(18, hm(7, 0), hm(7, 59)),
            FeeRange::new(13, hm(8, 0), hm(8, 29)),
            FeeRange::new(8, hm(8, 30), hm(14, 59)),
            FeeRange::new(13, hm(15, 0), hm(15, 29)),
            FeeRange::new(18, hm(15, 30), hm(16, 59)),
            FeeRange::new(13, hm(17, 0), hm(17, 59)),
            FeeRange::new(8, hm(18, 0), hm(18, 29)),
        ])
    }

    fn app_with(service: Arc<TollService>) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(service, handle)
    }

    fn app() -> Router {
        let types = VehicleTypeTable::new(vec![
            VehicleTypeEntry::new("Car", false),
            VehicleTypeEntry::new("Motorbike", true),
        ]);
        app_with(service_with(types, gothenburg()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn calculates_capped_daily_fee() {
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": [
                "2024-08-26T06:15:00+02:00",
                "2024-08-26T07:15:00+02:00",
                "2024-08-26T15:45:00+02:00",
                "2024-08-26T16:45:00+02:00"
            ]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["feeAmount"], 60);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Total toll fee: 60 SEK");
        assert_eq!(json["currency"], "SEK");
        assert_eq!(json["windows"].as_array().unwrap().len(), 4);
        assert!(json["exemption"].is_null());
    }

    #[tokio::test]
    async fn windows_report_max_fee_and_passages() {
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T06:45:00+02:00", "2024-08-26T07:15:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        let json = body_json(resp).await;

        assert_eq!(json["feeAmount"], 18);
        let window = &json["windows"][0];
        assert_eq!(window["fee"], 18);
        assert_eq!(window["start"], "2024-08-26T06:45:00");
        assert_eq!(window["end"], "2024-08-26T07:45:00");
        assert_eq!(window["passages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn exempt_vehicle_reports_reason() {
        let body = json!({
            "vehiclePlate": "MC001",
            "vehicleType": "Motorbike",
            "vehicleDateTimes": ["2024-08-26T07:30:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["feeAmount"], 0);
        assert!(json["exemption"].is_string());
    }

    #[tokio::test]
    async fn mixed_days_are_rejected_with_422() {
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T07:00:00+02:00", "2024-08-27T07:00:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["feeAmount"], 0);
        assert_eq!(
            json["message"],
            "All vehicle date times must be within the same day."
        );
    }

    #[tokio::test]
    async fn missing_date_times_are_rejected() {
        let body = json!({ "vehiclePlate": "ABC123", "vehicleType": "Car" });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(resp).await["message"], "No date times provided.");
    }

    #[tokio::test]
    async fn unknown_vehicle_type_lists_available_types() {
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Spaceship",
            "vehicleDateTimes": ["2024-08-26T07:00:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(resp).await["message"],
            "Invalid vehicle type provided. Available types are: Car, Motorbike."
        );
    }

    #[tokio::test]
    async fn plates_are_not_length_checked() {
        for plate in ["", "A-VERY-LONG-PLATE-NUMBER-0123456789"] {
            let body = json!({
                "vehiclePlate": plate,
                "vehicleType": "Car",
                "vehicleDateTimes": ["2024-08-26T07:00:00+02:00"]
            });
            let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "plate {plate:?}");
            assert_eq!(body_json(resp).await["feeAmount"], 18);
        }
    }

    #[tokio::test]
    async fn empty_type_goes_through_the_toll_validator() {
        let body = json!({ "vehiclePlate": "ABC123", "vehicleType": "", "vehicleDateTimes": [] });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(resp).await["message"], "No date times provided.");

        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "",
            "vehicleDateTimes": ["2024-08-26T07:00:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(resp).await["message"],
            "Invalid vehicle type provided. Available types are: Car, Motorbike."
        );
    }

    #[tokio::test]
    async fn summer_passages_are_priced_in_local_time() {
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T07:15:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["feeAmount"], 18);
        assert_eq!(json["windows"][0]["start"], "2024-08-26T07:15:00");

        // 05:15Z is 07:15 CEST on the same day.
        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T05:15:00Z"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(body_json(resp).await["feeAmount"], 18);
    }

    #[tokio::test]
    async fn day_boundary_is_local_midnight() {
        let whole_day = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T00:30:00+02:00", "2024-08-26T23:30:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/validate", whole_day)).await.unwrap();
        assert_eq!(body_json(resp).await["valid"], true);

        for pair in [
            ["2024-08-26T23:30:00+02:00", "2024-08-27T00:30:00+02:00"],
            ["2024-08-26T21:30:00Z", "2024-08-26T22:30:00Z"],
        ] {
            let body = json!({
                "vehiclePlate": "ABC123",
                "vehicleType": "Car",
                "vehicleDateTimes": pair
            });
            let resp = app().oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{pair:?}");
            assert_eq!(
                body_json(resp).await["message"],
                "All vehicle date times must be within the same day."
            );
        }
    }

    #[tokio::test]
    async fn fee_overflow_is_internal_error() {
        let types = VehicleTypeTable::new(vec![VehicleTypeEntry::new("Car", false)]);
        let schedule = FeeSchedule::new(vec![FeeRange::new(u32::MAX, hm(0, 0), hm(23, 59))]);
        let app = app_with(service_with(types, schedule));

        let body = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "Car",
            "vehicleDateTimes": ["2024-08-26T06:00:00+02:00", "2024-08-26T09:00:00+02:00"]
        });
        let resp = app.oneshot(post_json("/api/v1/toll/vehicle", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["feeAmount"], 0);
    }

    #[tokio::test]
    async fn validate_endpoint_reports_verdict() {
        let ok = json!({
            "vehiclePlate": "ABC123",
            "vehicleType": "car",
            "vehicleDateTimes": ["2024-08-26T07:00:00+02:00"]
        });
        let resp = app().oneshot(post_json("/api/v1/toll/validate", ok)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["valid"], true);

        let bad = json!({ "vehiclePlate": "ABC123", "vehicleType": "Car", "vehicleDateTimes": [] });
        let resp = app().oneshot(post_json("/api/v1/toll/validate", bad)).await.unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["valid"], false);
        assert_eq!(json["message"], "No date times provided.");
    }

    #[tokio::test]
    async fn lists_vehicle_types() {
        let resp = app().oneshot(get_request("/api/v1/toll/vehicle-types")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"][0]["vehicleType"], "Car");
        assert_eq!(json["data"][1]["isTollFreeVehicle"], true);
    }

    #[tokio::test]
    async fn unavailable_vehicle_types_return_503() {
        let app = app_with(service_with(VehicleTypeTable::unavailable(), gothenburg()));
        let resp = app.oneshot(get_request("/api/v1/toll/vehicle-types")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(resp).await["error"],
            "Vehicle types configuration could not be loaded."
        );
    }

    #[tokio::test]
    async fn fee_schedule_lists_ranges_in_order() {
        let resp = app().oneshot(get_request("/api/v1/toll/fee-schedule")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["dailyCap"], 60);
        assert_eq!(json["data"]["currency"], "SEK");
        assert_eq!(json["data"]["ranges"].as_array().unwrap().len(), 9);
        assert_eq!(json["data"]["ranges"][0]["timePoint"], "06:00-06:29");
        assert_eq!(json["data"]["ranges"][0]["feeAmount"], 8);
    }

    #[tokio::test]
    async fn health_is_ok_with_loaded_tables() {
        let resp = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["fee_schedule"]["entries"], 9);
        assert_eq!(json["vehicle_types"]["entries"], 2);
    }

    #[tokio::test]
    async fn health_is_degraded_without_fee_schedule() {
        let types = VehicleTypeTable::new(vec![VehicleTypeEntry::new("Car", false)]);
        let app = app_with(service_with(types, FeeSchedule::empty()));
        let resp = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(resp).await["status"], "degraded");
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "trace-42")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "trace-42");

        let resp = app().oneshot(get_request("/health")).await.unwrap();
        let generated = resp.headers()["x-request-id"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let resp = app().oneshot(get_request("/metrics")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }

    #[tokio::test]
    async fn openapi_document_lists_toll_paths() {
        let resp = app().oneshot(get_request("/api-doc/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert!(json["paths"]["/api/v1/toll/vehicle"]["post"].is_object());
        assert!(json["paths"]["/health"]["get"].is_object());
    }
}
