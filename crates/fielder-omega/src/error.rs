//! Omega error types

use thiserror::Error;

/// Errors that can occur in omega operations
#[derive(Error, Debug)]
pub enum OmegaError {
    /// Calibration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference repository failed
    #[error("Repository error: {0}")]
    Repository(String),
}
