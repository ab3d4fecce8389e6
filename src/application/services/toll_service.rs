//! Toll request service
//!
//! Entry point for callers: validates the raw request, calculates the toll,
//! and folds every outcome into a [`TollResponse`]. Nothing here panics or
//! returns a partial total.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use tracing::{info, warn};

use super::toll_calculator::{TollBreakdown, TollCalculator};
use crate::application::validation::RequestValidator;
use crate::domain::{DomainError, DomainResult, Vehicle, VehicleTypeTable};

/// Outcome of a toll request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TollResponse {
    /// Whole currency units; 0 on failure
    pub fee_amount: u32,
    pub success: bool,
    pub message: String,
    /// Present when the calculation succeeded
    pub breakdown: Option<TollBreakdown>,
    /// Set when `success` is false
    pub error: Option<DomainError>,
}

impl TollResponse {
    fn charged(breakdown: TollBreakdown, currency: &str) -> Self {
        Self {
            fee_amount: breakdown.total,
            success: true,
            message: format!("Total toll fee: {} {}", breakdown.total, currency),
            breakdown: Some(breakdown),
            error: None,
        }
    }

    fn failed(error: DomainError) -> Self {
        Self {
            fee_amount: 0,
            success: false,
            message: error.to_string(),
            breakdown: None,
            error: Some(error),
        }
    }
}

pub struct TollService {
    validator: RequestValidator,
    calculator: TollCalculator,
    currency: String,
    zone: Tz,
}

impl TollService {
    pub fn new(
        validator: RequestValidator,
        calculator: TollCalculator,
        currency: impl Into<String>,
        zone: Tz,
    ) -> Self {
        Self {
            validator,
            calculator,
            currency: currency.into(),
            zone,
        }
    }

    pub fn calculator(&self) -> &TollCalculator {
        &self.calculator
    }

    pub fn vehicle_types(&self) -> &VehicleTypeTable {
        self.calculator.policy().vehicle_types()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// `None` when the request is acceptable, otherwise the rejection message.
    pub fn validate<Z: TimeZone>(
        &self,
        vehicle_type: &str,
        timestamps: &[DateTime<Z>],
    ) -> Option<String> {
        self.validator
            .validate(vehicle_type, timestamps)
            .err()
            .map(|e| e.to_string())
    }

    pub fn calculate_toll<Z: TimeZone>(
        &self,
        plate: &str,
        vehicle_type: &str,
        timestamps: &[DateTime<Z>],
    ) -> TollResponse {
        match self.try_calculate(plate, vehicle_type, timestamps) {
            Ok(breakdown) => {
                let outcome = if breakdown.exemption.is_some() {
                    "exempt"
                } else {
                    "charged"
                };
                metrics::counter!("toll_calculations_total", "outcome" => outcome).increment(1);
                metrics::histogram!("toll_fee_amount").record(breakdown.total as f64);

                info!(
                    plate,
                    vehicle_type,
                    passages = timestamps.len(),
                    fee = breakdown.total,
                    "Toll calculated"
                );
                TollResponse::charged(breakdown, &self.currency)
            }
            Err(e) => {
                let outcome = if e.is_client_error() {
                    "rejected"
                } else {
                    "failed"
                };
                metrics::counter!("toll_calculations_total", "outcome" => outcome).increment(1);

                warn!(plate, vehicle_type, "Toll request {}: {}", outcome, e);
                TollResponse::failed(e)
            }
        }
    }

    /// Validate and calculate, surfacing errors instead of a response.
    pub fn try_calculate<Z: TimeZone>(
        &self,
        plate: &str,
        vehicle_type: &str,
        timestamps: &[DateTime<Z>],
    ) -> DomainResult<TollBreakdown> {
        self.validator.validate(vehicle_type, timestamps)?;
        let vehicle = Vehicle::from_instants(plate, vehicle_type, timestamps, &self.zone);
        self.calculator.breakdown(&vehicle)
    }
}

// ── Tests ──────────────────────────────────────────────────────
