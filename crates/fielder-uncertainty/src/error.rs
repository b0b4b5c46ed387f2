//! Uncertainty error types

use thiserror::Error;

/// Errors that can occur while quantifying uncertainty
#[derive(Error, Debug)]
pub enum UncertaintyError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Too few finite samples for an empirical distribution
    #[error("Insufficient samples: need at least 2 finite values, got {0}")]
    InsufficientSamples(usize),
}
