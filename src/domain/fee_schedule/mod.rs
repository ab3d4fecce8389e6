//! Fee schedule aggregate
//!
//! Time-of-day ranges and the fee charged for a passage inside each of them.

pub mod model;

pub use model::{FeeRange, FeeSchedule};
