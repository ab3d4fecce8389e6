//! Toll REST API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;

use super::dto::{
    CalculateTollRequest, FeeRangeDto, FeeScheduleResponse, TollFeeResponse, ValidateResponse,
    VehicleTypeDto,
};
use crate::application::TollService;
use crate::domain::ValidationError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct TollState {
    pub service: Arc<TollService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/toll/vehicle",
    tag = "Toll",
    request_body = CalculateTollRequest,
    responses(
        (status = 200, description = "Daily toll calculated", body = TollFeeResponse),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Request rejected", body = TollFeeResponse),
        (status = 500, description = "Calculation failed", body = TollFeeResponse)
    )
)]
pub async fn calculate_toll(
    State(state): State<TollState>,
    ValidatedJson(req): ValidatedJson<CalculateTollRequest>,
) -> (StatusCode, Json<TollFeeResponse>) {
    debug!(
        plate = %req.vehicle_plate,
        passages = req.vehicle_date_times.len(),
        "Calculating toll"
    );

    let response =
        state
            .service
            .calculate_toll(&req.vehicle_plate, &req.vehicle_type, &req.vehicle_date_times);

    let status = match &response.error {
        None => StatusCode::OK,
        Some(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(TollFeeResponse::from_response(&response, state.service.currency())),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/toll/validate",
    tag = "Toll",
    request_body = CalculateTollRequest,
    responses(
        (status = 200, description = "Validation verdict", body = ValidateResponse)
    )
)]
pub async fn validate_request(
    State(state): State<TollState>,
    ValidatedJson(req): ValidatedJson<CalculateTollRequest>,
) -> Json<ValidateResponse> {
    let verdict = match state
        .service
        .validate(&req.vehicle_type, &req.vehicle_date_times)
    {
        None => ValidateResponse {
            valid: true,
            message: "Request is valid.".to_string(),
        },
        Some(message) => ValidateResponse {
            valid: false,
            message,
        },
    };
    Json(verdict)
}

#[utoipa::path(
    get,
    path = "/api/v1/toll/vehicle-types",
    tag = "Toll",
    responses(
        (status = 200, description = "Configured vehicle types", body = ApiResponse<Vec<VehicleTypeDto>>),
        (status = 503, description = "Vehicle types could not be loaded")
    )
)]
pub async fn list_vehicle_types(
    State(state): State<TollState>,
) -> Result<Json<ApiResponse<Vec<VehicleTypeDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let table = state.service.vehicle_types();
    if !table.is_available() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(
                ValidationError::VehicleTypesUnavailable.to_string(),
            )),
        ));
    }

    let types = table.entries().iter().map(VehicleTypeDto::from).collect();
    Ok(Json(ApiResponse::success(types)))
}

#[utoipa::path(
    get,
    path = "/api/v1/toll/fee-schedule",
    tag = "Toll",
    responses(
        (status = 200, description = "Fee ranges in lookup order", body = ApiResponse<FeeScheduleResponse>)
    )
)]
pub async fn get_fee_schedule(
    State(state): State<TollState>,
) -> Json<ApiResponse<FeeScheduleResponse>> {
    let calculator = state.service.calculator();
    let schedule = FeeScheduleResponse {
        ranges: calculator
            .fee_schedule()
            .ranges()
            .iter()
            .map(FeeRangeDto::from)
            .collect(),
        daily_cap: calculator.daily_cap(),
        currency: state.service.currency().to_string(),
    };
    Json(ApiResponse::success(schedule))
}
