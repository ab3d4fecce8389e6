pub mod services;
pub mod validation;

// Re-export key types for convenience
pub use services::{TollBreakdown, TollCalculator, TollResponse, TollService, TollWindow};
pub use validation::RequestValidator;
