//! Configuration data loader
//!
//! Reads the fee schedule and vehicle-type tables once at startup. Failures
//! never abort startup: the fee schedule falls back to empty (every passage
//! costs 0) and the vehicle-type table to *unavailable*.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{error, info};

use super::files::{TollFeesFile, VehicleTypesFile};
use crate::config::ConfigError;
use crate::domain::{FeeSchedule, VehicleTypeTable};

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_fee_schedule(path: &Path) -> FeeSchedule {
    match read_json::<TollFeesFile>(path) {
        Ok(file) => {
            let schedule = FeeSchedule::from(&file);
            info!(
                "Loaded {} fee ranges from {}",
                schedule.len(),
                path.display()
            );
            schedule
        }
        Err(e) => {
            error!("Failed to load fee schedule: {}. All passages will be free.", e);
            FeeSchedule::empty()
        }
    }
}

pub fn load_vehicle_types(path: &Path) -> VehicleTypeTable {
    match read_json::<VehicleTypesFile>(path) {
        Ok(file) => {
            let table = VehicleTypeTable::from(file);
            info!(
                "Loaded {} vehicle types from {}",
                table.entries().len(),
                path.display()
            );
            table
        }
        Err(e) => {
            error!("Failed to load vehicle types: {}", e);
            VehicleTypeTable::unavailable()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
