//! Exemption aggregate
//!
//! Toll-free vehicle types and toll-free calendar days.

pub mod model;

pub use model::{
    CalendarRules, ExemptionPolicy, ExemptionReason, VehicleTypeEntry, VehicleTypeTable,
};
