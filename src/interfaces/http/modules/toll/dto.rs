//! Toll DTOs

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{TollResponse, TollWindow};
use crate::domain::{FeeRange, VehicleTypeEntry};

/// Request body shared by the calculate and validate endpoints.
///
/// Carries no field rules: the toll validator decides what is acceptable,
/// in its own order, so an empty type with no timestamps still reports the
/// missing timestamps.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTollRequest {
    /// Opaque; only logged
    #[schema(example = "ABC123")]
    pub vehicle_plate: String,
    #[schema(example = "Car")]
    pub vehicle_type: String,
    /// RFC 3339 date-times with offset; all must fall on the same reference day
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["2024-08-26T06:15:00+02:00"]))]
    pub vehicle_date_times: Vec<DateTime<FixedOffset>>,
}

/// One charged hour window
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TollWindowDto {
    #[schema(value_type = String)]
    pub start: NaiveDateTime,
    /// Exclusive
    #[schema(value_type = String)]
    pub end: NaiveDateTime,
    pub fee: u32,
    #[schema(value_type = Vec<String>)]
    pub passages: Vec<NaiveDateTime>,
}

impl From<&TollWindow> for TollWindowDto {
    fn from(w: &TollWindow) -> Self {
        Self {
            start: w.start,
            end: w.end,
            fee: w.fee,
            passages: w.passages.clone(),
        }
    }
}

/// Result of `POST /api/v1/toll/vehicle`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TollFeeResponse {
    pub fee_amount: u32,
    pub success: bool,
    pub message: String,
    pub currency: String,
    pub windows: Vec<TollWindowDto>,
    /// Why the day was free, if it was
    pub exemption: Option<String>,
}

impl TollFeeResponse {
    pub fn from_response(response: &TollResponse, currency: &str) -> Self {
        let (windows, exemption) = match &response.breakdown {
            Some(b) => (
                b.windows.iter().map(TollWindowDto::from).collect(),
                b.exemption.as_ref().map(|r| r.to_string()),
            ),
            None => (Vec::new(), None),
        };

        Self {
            fee_amount: response.fee_amount,
            success: response.success,
            message: response.message.clone(),
            currency: currency.to_string(),
            windows,
            exemption,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeDto {
    pub vehicle_type: String,
    pub is_toll_free_vehicle: bool,
}

impl From<&VehicleTypeEntry> for VehicleTypeDto {
    fn from(e: &VehicleTypeEntry) -> Self {
        Self {
            vehicle_type: e.name.clone(),
            is_toll_free_vehicle: e.is_exempt,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeRangeDto {
    /// `HH:MM-HH:MM`, both ends inclusive
    pub time_point: String,
    pub fee_amount: u32,
}

impl From<&FeeRange> for FeeRangeDto {
    fn from(r: &FeeRange) -> Self {
        Self {
            time_point: r.to_string(),
            fee_amount: r.fee,
        }
    }
}

/// Configured ranges in lookup order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleResponse {
    pub ranges: Vec<FeeRangeDto>,
    pub daily_cap: u32,
    pub currency: String,
}
