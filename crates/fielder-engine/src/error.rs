//! Engine error types

use thiserror::Error;

/// Errors that can occur while orchestrating a prediction
///
/// Unknown cultivars, breeds or regions are not errors; they lower
/// confidence and add a data-quality note instead.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Claim classification failed
    #[error(transparent)]
    Claims(#[from] fielder_claims::ClaimsError),

    /// Omega prediction failed
    #[error(transparent)]
    Omega(#[from] fielder_omega::OmegaError),

    /// Reference repository failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Request was not usable for its category
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Blocking sampling worker panicked or was cancelled
    #[error("Sampling worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
