//! Infrastructure layer - external concerns

pub mod configuration;
pub mod holidays;

pub use configuration::{load_fee_schedule, load_vehicle_types};
pub use holidays::{CompositeHolidayCalendar, FixedHolidayCalendar, SwedishHolidayCalendar};
