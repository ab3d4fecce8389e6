//! JSON data file shapes
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::{FeeSchedule, VehicleTypeEntry, VehicleTypeTable};

/// `{"tollFees": [{"feeAmount": 8, "timePoints": ["06:00-06:29"]}]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollFeesFile {
    #[serde(default)]
    pub toll_fees: Vec<TollFeeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollFeeEntry {
    pub fee_amount: u32,
    #[serde(default)]
    pub time_points: Vec<String>,
}

/// `{"vehicleTypes": [{"vehicleType": "Car", "isTollFreeVehicle": false}]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypesFile {
    #[serde(default)]
    pub vehicle_types: Vec<VehicleTypeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTypeRecord {
    pub vehicle_type: String,
    #[serde(default)]
    pub is_toll_free_vehicle: bool,
}

impl From<&TollFeesFile> for FeeSchedule {
    fn from(file: &TollFeesFile) -> Self {
        FeeSchedule::from_time_points(
            file.toll_fees
                .iter()
                .map(|entry| (entry.fee_amount, entry.time_points.as_slice())),
        )
    }
}

impl From<VehicleTypesFile> for VehicleTypeTable {
    fn from(file: VehicleTypesFile) -> Self {
        VehicleTypeTable::new(
            file.vehicle_types
                .into_iter()
                .map(|record| VehicleTypeEntry::new(record.vehicle_type, record.is_toll_free_vehicle))
                .collect(),
        )
    }
}
