//! Holiday calendar adapters

mod fixed;
mod swedish;

pub use fixed::{CompositeHolidayCalendar, FixedHolidayCalendar};
pub use swedish::SwedishHolidayCalendar;
