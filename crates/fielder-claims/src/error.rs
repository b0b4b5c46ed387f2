//! Claims error types

use thiserror::Error;

/// Errors that can occur during claim inference
#[derive(Error, Debug)]
pub enum ClaimsError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference repository failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// A profile table had neither a qualifying nor a fallback profile
    #[error("No profile available for category: {0}")]
    NoProfile(String),
}
