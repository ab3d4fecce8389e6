//! Configuration data (fee schedule, vehicle types)

pub mod files;
pub mod loader;

pub use files::{TollFeeEntry, TollFeesFile, VehicleTypeRecord, VehicleTypesFile};
pub use loader::{load_fee_schedule, load_vehicle_types, read_json};
