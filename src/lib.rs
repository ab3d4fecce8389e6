//! # Toll Fee Service
//!
//! Computes the daily congestion toll owed by a vehicle from the timestamps of
//! its toll-station passages on one calendar day.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Vehicles, fee schedules, exemption rules and the holiday port
//! - **application**: The hour-window toll calculator, request validation
//!   and the request-level service
//! - **infrastructure**: JSON table loading and holiday calendars
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export the request surface
pub use application::{TollResponse, TollService};

// Re-export API router
pub use interfaces::create_api_router;
