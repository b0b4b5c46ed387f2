//! Engine configuration
//!
//! One TOML document carries every tunable constant. Each section is
//! optional; a missing section takes that component's defaults.
//!
//! ```toml
//! [brix]
//! default_halfwidth = 150.0
//!
//! [uncertainty]
//! n_samples = 5000
//! seed = 7
//! ```

use std::path::Path;

use fielder_claims::ClaimsConfig;
use fielder_omega::OmegaCalibration;
use fielder_produce::BrixConfig;
use fielder_uncertainty::UncertaintyConfig;
use fielder_validator::ValidationConfig;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Aggregated configuration for every engine component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Brix predictor settings
    #[serde(default)]
    pub brix: BrixConfig,

    /// Omega calibration constants
    #[serde(default)]
    pub omega: OmegaCalibration,

    /// Claim scoring and confidence settings
    #[serde(default)]
    pub claims: ClaimsConfig,

    /// Validator ranges and thresholds
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Uncertainty sampling settings
    #[serde(default)]
    pub uncertainty: UncertaintyConfig,
}

impl EngineConfig {
    /// Validate every section, naming the section that failed
    pub fn validate(&self) -> Result<(), String> {
        self.brix.validate().map_err(|e| format!("[brix] {}", e))?;
        self.omega.validate().map_err(|e| format!("[omega] {}", e))?;
        self.claims.validate().map_err(|e| format!("[claims] {}", e))?;
        self.validation
            .validate()
            .map_err(|e| format!("[validation] {}", e))?;
        self.uncertainty
            .validate()
            .map_err(|e| format!("[uncertainty] {}", e))?;
        Ok(())
    }

    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Read, parse and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents).map_err(EngineError::Config)?;
        config.validate().map_err(EngineError::Config)?;
        Ok(config)
    }
}
