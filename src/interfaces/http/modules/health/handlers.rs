//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::TollService;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub service: Arc<TollService>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub fee_schedule: ComponentHealth,
    pub vehicle_types: ComponentHealth,
}

/// Loaded configuration table
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub entries: usize,
}

impl ComponentHealth {
    fn new(loaded: bool, entries: usize) -> Self {
        Self {
            status: if loaded { "ok" } else { "error" }.to_string(),
            entries,
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Configuration tables missing", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let schedule = state.service.calculator().fee_schedule();
    let fee_schedule = ComponentHealth::new(!schedule.is_empty(), schedule.len());

    let types = state.service.vehicle_types();
    let vehicle_types = ComponentHealth::new(types.is_available(), types.entries().len());

    let healthy = fee_schedule.status == "ok" && vehicle_types.status == "ok";
    let (http_status, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            fee_schedule,
            vehicle_types,
        }),
    )
}
