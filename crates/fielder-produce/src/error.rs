//! Produce error types

use thiserror::Error;

/// Errors that can occur in produce operations
///
/// Predictions themselves never fail; only configuration can.
#[derive(Error, Debug)]
pub enum ProduceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
