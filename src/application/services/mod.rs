//! Application services

mod toll_calculator;
mod toll_service;

pub use toll_calculator::{partition, TollBreakdown, TollCalculator, TollWindow, DEFAULT_DAILY_CAP};
pub use toll_service::{TollResponse, TollService};
