//! Domain errors

use thiserror::Error;

/// Rejections produced by the request validator.
///
/// The `Display` strings are returned verbatim to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No date times provided.")]
    NoTimestamps,

    #[error("All vehicle date times must be within the same day.")]
    MixedDays,

    #[error("Invalid vehicle type provided. Available types are: {}.", .available.join(", "))]
    UnknownVehicleType { available: Vec<String> },

    #[error("Vehicle types configuration could not be loaded.")]
    VehicleTypesUnavailable,
}

/// A `"HH:MM-HH:MM"` time point that could not be turned into a fee range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeRangeError {
    #[error("Invalid time range format: {0}")]
    Format(String),

    #[error("Invalid clock value '{value}' in time range {range}")]
    Clock { range: String, value: String },

    #[error("Time range {0} ends before it starts")]
    Inverted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

impl DomainError {
    /// Validation failures are the caller's fault; everything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
