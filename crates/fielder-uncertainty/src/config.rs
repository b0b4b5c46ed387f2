//! Uncertainty quantifier configuration

use serde::{Deserialize, Serialize};

/// How a distribution was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Sampling with Box-Muller normals
    MonteCarlo,
    /// Closed-form normal percentiles
    Parametric,
    /// Statistics of a supplied historical sample
    Empirical,
}

impl Method {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::MonteCarlo => "monte_carlo",
            Method::Parametric => "parametric",
            Method::Empirical => "empirical",
        }
    }
}

/// Configuration of the uncertainty quantifier
///
/// # Examples
///
/// ```
/// use fielder_uncertainty::{Method, UncertaintyConfig};
///
/// let config = UncertaintyConfig::default();
/// assert_eq!(config.n_samples, 10_000);
/// assert_eq!(UncertaintyConfig::fast().method, Method::Parametric);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyConfig {
    /// Monte Carlo draws per call
    pub n_samples: usize,

    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Default method for model-based quantification
    pub method: Method,

    /// Upper limit on draws a caller may request
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

fn default_max_samples() -> usize {
    1_000_000
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            n_samples: 10_000,
            seed: None,
            method: Method::MonteCarlo,
            max_samples: default_max_samples(),
        }
    }
}

impl UncertaintyConfig {
    /// Closed-form percentiles, no sampling
    pub fn fast() -> Self {
        Self {
            n_samples: 1_000,
            method: Method::Parametric,
            ..Self::default()
        }
    }

    /// Ten times the default number of draws
    pub fn precise() -> Self {
        Self {
            n_samples: 100_000,
            method: Method::MonteCarlo,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.n_samples < 2 {
            return Err("n_samples must be at least 2".to_string());
        }
        if self.n_samples > self.max_samples {
            return Err(format!("n_samples cannot exceed max_samples ({})", self.max_samples));
        }
        if self.method == Method::Empirical {
            return Err("method empirical needs historical samples; use monte_carlo or parametric".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
