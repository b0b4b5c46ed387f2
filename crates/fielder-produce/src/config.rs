//! Brix prediction configuration

use serde::{Deserialize, Serialize};

/// Tunable constants of the Brix predictor and harvest projections
///
/// # Examples
///
/// ```
/// use fielder_produce::BrixConfig;
///
/// let config = BrixConfig::default();
/// assert_eq!(config.default_halfwidth, 150.0);
/// assert_eq!(config.commodity_brix, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrixConfig {
    /// Half-width of the peak window in GDD when the caller gives none
    pub default_halfwidth: f64,

    /// Penalty at one half-width from peak when the caller gives none
    pub default_max_penalty: f64,

    /// Confidence when tree age is known
    pub age_known_confidence: f64,

    /// Confidence when tree age is unknown
    pub age_unknown_confidence: f64,

    /// Multiplier applied to confidence when crop targets fell back to defaults
    #[serde(default = "default_fallback_factor")]
    pub default_targets_factor: f64,

    /// Climatological average daily GDD used when a region is unknown
    #[serde(default = "default_avg_daily_gdd")]
    pub fallback_avg_daily_gdd: f64,

    /// Brix of typical commodity produce, used for comparisons
    pub commodity_brix: f64,

    /// Days either side of the projected peak date counted as peak
    pub peak_half_window_days: i64,

    /// Days after the peak window before the harvest window closes
    pub post_peak_days: i64,
}

fn default_fallback_factor() -> f64 {
    0.75
}

fn default_avg_daily_gdd() -> f64 {
    10.0
}

impl Default for BrixConfig {
    fn default() -> Self {
        Self {
            default_halfwidth: 150.0,
            default_max_penalty: 1.0,
            age_known_confidence: 0.8,
            age_unknown_confidence: 0.6,
            default_targets_factor: default_fallback_factor(),
            fallback_avg_daily_gdd: default_avg_daily_gdd(),
            commodity_brix: 8.0,
            peak_half_window_days: 15,
            post_peak_days: 30,
        }
    }
}

impl BrixConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_halfwidth <= 0.0 {
            return Err("default_halfwidth must be greater than 0".to_string());
        }
        if self.default_max_penalty < 0.0 {
            return Err("default_max_penalty cannot be negative".to_string());
        }
        for (name, value) in [
            ("age_known_confidence", self.age_known_confidence),
            ("age_unknown_confidence", self.age_unknown_confidence),
            ("default_targets_factor", self.default_targets_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
        }
        if self.fallback_avg_daily_gdd <= 0.0 {
            return Err("fallback_avg_daily_gdd must be greater than 0".to_string());
        }
        if self.commodity_brix <= 0.0 {
            return Err("commodity_brix must be greater than 0".to_string());
        }
        if self.peak_half_window_days < 0 || self.post_peak_days < 0 {
            return Err("window day counts cannot be negative".to_string());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BrixConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_halfwidth() {
        let config = BrixConfig {
            default_halfwidth: 0.0,
            ..BrixConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_confidence() {
        let config = BrixConfig {
            age_known_confidence: 1.2,
            ..BrixConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BrixConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = BrixConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_optional_fields_default() {
        let toml_str = r#"
            default_halfwidth = 200.0
            default_max_penalty = 1.0
            age_known_confidence = 0.8
            age_unknown_confidence = 0.6
            commodity_brix = 8.0
            peak_half_window_days = 15
            post_peak_days = 30
        "#;
        let parsed = BrixConfig::from_toml(toml_str).unwrap();
        assert_eq!(parsed.default_halfwidth, 200.0);
        assert_eq!(parsed.fallback_avg_daily_gdd, 10.0);
        assert_eq!(parsed.default_targets_factor, 0.75);
    }
}
