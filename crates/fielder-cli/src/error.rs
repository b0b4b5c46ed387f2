//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine error
    #[error("{0}")]
    Engine(#[from] fielder_engine::EngineError),

    /// Reference store error
    #[error("Reference data error: {0}")]
    Store(#[from] fielder_store::StoreError),

    /// Claim classification error
    #[error("{0}")]
    Claims(#[from] fielder_claims::ClaimsError),

    /// Omega prediction error
    #[error("{0}")]
    Omega(#[from] fielder_omega::OmegaError),

    /// Uncertainty error
    #[error("{0}")]
    Uncertainty(#[from] fielder_uncertainty::UncertaintyError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
