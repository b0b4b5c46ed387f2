//! Validator error types

use thiserror::Error;

/// Errors that can occur when setting up validation
///
/// Rejected measurements are never errors; they come back as records inside
/// a [`fielder_domain::ValidationResult`].
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}
