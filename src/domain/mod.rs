pub mod error;
pub mod exemption;
pub mod fee_schedule;
pub mod ports;
pub mod vehicle;

// Re-export commonly used types
pub use error::{DomainError, DomainResult, FeeRangeError, ValidationError};
pub use exemption::{
    CalendarRules, ExemptionPolicy, ExemptionReason, VehicleTypeEntry, VehicleTypeTable,
};
pub use fee_schedule::{FeeRange, FeeSchedule};
pub use ports::HolidayCalendar;
pub use vehicle::{to_reference_time, Passage, Vehicle};
