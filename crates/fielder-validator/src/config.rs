//! Validation configuration

use fielder_domain::{MetricKind, MetricRange};
use serde::{Deserialize, Serialize};

/// Which side of the typical range is desirable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// Values above typical are exceptional (Brix)
    HigherIsBetter,
    /// Values below typical are exceptional (omega ratio)
    LowerIsBetter,
    /// Neither side is desirable
    Neutral,
}

/// Soft range a value usually falls in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypicalRange {
    /// Lower bound of typical values
    pub low: f64,
    /// Upper bound of typical values
    pub high: f64,
    /// Desirable direction
    pub preference: Preference,
}

impl TypicalRange {
    /// Create a typical range
    pub const fn new(low: f64, high: f64, preference: Preference) -> Self {
        Self { low, high, preference }
    }
}

/// Physically possible range per metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardRanges {
    /// Brix, °Bx
    pub brix: MetricRange,
    /// Omega-6:3 ratio
    pub omega_ratio: MetricRange,
    /// Cumulative GDD
    pub gdd: MetricRange,
    /// Tree age, years
    pub tree_age: MetricRange,
    /// pH
    pub ph: MetricRange,
}

impl HardRanges {
    /// Range for a metric
    pub fn get(&self, kind: MetricKind) -> MetricRange {
        match kind {
            MetricKind::Brix => self.brix,
            MetricKind::OmegaRatio => self.omega_ratio,
            MetricKind::Gdd => self.gdd,
            MetricKind::TreeAge => self.tree_age,
            MetricKind::Ph => self.ph,
        }
    }
}

impl Default for HardRanges {
    fn default() -> Self {
        Self {
            brix: MetricRange::new(0.0, 30.0),
            omega_ratio: MetricRange::new(0.5, 50.0),
            gdd: MetricRange::new(0.0, 10_000.0),
            tree_age: MetricRange::new(0.0, 150.0),
            ph: MetricRange::new(0.0, 14.0),
        }
    }
}

/// Typical range per metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypicalRanges {
    /// Brix, °Bx
    pub brix: TypicalRange,
    /// Omega-6:3 ratio
    pub omega_ratio: TypicalRange,
    /// Cumulative GDD
    pub gdd: TypicalRange,
    /// Tree age, years
    pub tree_age: TypicalRange,
    /// pH
    pub ph: TypicalRange,
}

impl TypicalRanges {
    /// Range for a metric
    pub fn get(&self, kind: MetricKind) -> TypicalRange {
        match kind {
            MetricKind::Brix => self.brix,
            MetricKind::OmegaRatio => self.omega_ratio,
            MetricKind::Gdd => self.gdd,
            MetricKind::TreeAge => self.tree_age,
            MetricKind::Ph => self.ph,
        }
    }
}

impl Default for TypicalRanges {
    fn default() -> Self {
        Self {
            brix: TypicalRange::new(8.0, 16.0, Preference::HigherIsBetter),
            omega_ratio: TypicalRange::new(3.0, 20.0, Preference::LowerIsBetter),
            gdd: TypicalRange::new(500.0, 4500.0, Preference::Neutral),
            tree_age: TypicalRange::new(3.0, 40.0, Preference::Neutral),
            ph: TypicalRange::new(3.0, 7.0, Preference::Neutral),
        }
    }
}

/// Data-quality scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityConfig {
    /// Starting score for laboratory measurements
    pub lab_baseline: f64,
    /// Starting score for farm-reported measurements
    pub farm_baseline: f64,
    /// Starting score for consumer-submitted measurements
    pub consumer_baseline: f64,
    /// Subtracted when the category's primary metric is missing
    pub missing_primary_penalty: f64,
    /// Subtracted when no sample timestamp is given
    pub missing_timestamp_penalty: f64,
    /// Subtracted when no secondary measurement is given
    pub missing_secondary_penalty: f64,
    /// Scores below this recommend lab verification
    pub lab_verification_threshold: f64,
}

impl Default for DataQualityConfig {
    fn default() -> Self {
        Self {
            lab_baseline: 0.95,
            farm_baseline: 0.8,
            consumer_baseline: 0.6,
            missing_primary_penalty: 0.3,
            missing_timestamp_penalty: 0.1,
            missing_secondary_penalty: 0.1,
            lab_verification_threshold: 0.6,
        }
    }
}

/// Configuration of the physical-constraint validator
///
/// # Examples
///
/// ```
/// use fielder_validator::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.z_threshold, 2.5);
/// assert!(ValidationConfig::strict().z_threshold < config.z_threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// |z| above this is an anomaly
    pub z_threshold: f64,

    /// Fewest history samples for history-based anomaly detection
    pub min_history_samples: usize,

    /// Relative deviation beyond the expected range that turns a
    /// consistency warning critical
    pub critical_deviation: f64,

    /// Physically possible ranges
    #[serde(default)]
    pub hard_ranges: HardRanges,

    /// Typical ranges
    #[serde(default)]
    pub typical_ranges: TypicalRanges,

    /// Data-quality scoring
    #[serde(default)]
    pub data_quality: DataQualityConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.5,
            min_history_samples: 3,
            critical_deviation: 1.0,
            hard_ranges: HardRanges::default(),
            typical_ranges: TypicalRanges::default(),
            data_quality: DataQualityConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Tighter anomaly detection and lab-verification threshold
    pub fn strict() -> Self {
        Self {
            z_threshold: 2.0,
            min_history_samples: 5,
            critical_deviation: 0.5,
            data_quality: DataQualityConfig {
                lab_verification_threshold: 0.7,
                ..DataQualityConfig::default()
            },
            ..Self::default()
        }
    }

    /// Looser anomaly detection and lab-verification threshold
    pub fn lenient() -> Self {
        Self {
            z_threshold: 3.0,
            min_history_samples: 2,
            critical_deviation: 2.0,
            data_quality: DataQualityConfig {
                lab_verification_threshold: 0.5,
                ..DataQualityConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.z_threshold.is_nan() || self.z_threshold <= 0.0 {
            return Err("z_threshold must be greater than 0".to_string());
        }
        if self.min_history_samples < 2 {
            return Err("min_history_samples must be at least 2".to_string());
        }
        if self.critical_deviation <= 0.0 {
            return Err("critical_deviation must be greater than 0".to_string());
        }
        for kind in MetricKind::ALL {
            let typical = self.typical_ranges.get(kind);
            if typical.low > typical.high {
                return Err(format!("typical range for {} is reversed", kind));
            }
        }
        let q = &self.data_quality;
        for (name, value) in [
            ("lab_baseline", q.lab_baseline),
            ("farm_baseline", q.farm_baseline),
            ("consumer_baseline", q.consumer_baseline),
            ("missing_primary_penalty", q.missing_primary_penalty),
            ("missing_timestamp_penalty", q.missing_timestamp_penalty),
            ("missing_secondary_penalty", q.missing_secondary_penalty),
            ("lab_verification_threshold", q.lab_verification_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
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
