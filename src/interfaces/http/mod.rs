//! HTTP REST API interfaces
//!
//! - `common`: response envelope and validated JSON extractor
//! - `modules`: toll, health and metrics handlers plus request-id middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
