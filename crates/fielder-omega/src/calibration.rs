//! Omega calibration constants

use fielder_domain::DietType;
use serde::{Deserialize, Serialize};

/// Omega-6:3 baseline of each diet type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietBaselines {
    /// Grass and forage on pasture
    pub grass_only: f64,
    /// Pasture with forage supplements
    pub pasture_forage: f64,
    /// Pasture with concurrent grain supplement
    pub pasture_grain_supplemented: f64,
    /// Grain finishing ration
    pub grain_finished: f64,
    /// Extended feedlot grain ration
    pub grain_fed: f64,
}

impl DietBaselines {
    /// Baseline ratio of a diet type
    pub fn get(&self, diet: DietType) -> f64 {
        match diet {
            DietType::GrassOnly => self.grass_only,
            DietType::PastureForage => self.pasture_forage,
            DietType::PastureGrainSupplemented => self.pasture_grain_supplemented,
            DietType::GrainFinished => self.grain_finished,
            DietType::GrainFed => self.grain_fed,
        }
    }
}

impl Default for DietBaselines {
    fn default() -> Self {
        Self {
            grass_only: 3.0,
            pasture_forage: 4.0,
            pasture_grain_supplemented: 6.0,
            grain_finished: 15.0,
            grain_fed: 22.0,
        }
    }
}

/// Calibration of the diet-sequence omega predictor
///
/// # Examples
///
/// ```
/// use fielder_domain::DietType;
/// use fielder_omega::OmegaCalibration;
///
/// let calibration = OmegaCalibration::default();
/// assert_eq!(calibration.baselines.get(DietType::GrainFed), 22.0);
/// assert_eq!(calibration.finishing_weight, 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmegaCalibration {
    /// Baseline ratio per diet type
    #[serde(default)]
    pub baselines: DietBaselines,

    /// Weight of the finishing phase when earlier phases exist
    pub finishing_weight: f64,

    /// Grain finishing months before the duration penalty starts
    pub penalty_threshold_months: f64,

    /// Ratio added per grain finishing month beyond the threshold
    pub penalty_per_month: f64,

    /// Lowest reportable ratio
    pub min_ratio: f64,

    /// Highest reportable ratio
    pub max_ratio: f64,

    /// Ratio reported when no diet history is given
    pub unknown_diet_ratio: f64,

    /// Base half-width of the reported range
    pub base_uncertainty: f64,

    /// Added half-width when the breed is unknown
    pub unknown_breed_uncertainty: f64,

    /// Added half-width when the history covers too little of the animal's life
    pub low_coverage_uncertainty: f64,

    /// Fraction of age the diet history must cover to count as complete
    pub coverage_threshold: f64,

    /// Target maturity assumed for unknown breeds (months)
    pub default_maturity_months: f64,

    /// Numeric confidence of a high-confidence prediction
    pub high_confidence: f64,

    /// Numeric confidence of a medium-confidence prediction
    pub medium_confidence: f64,

    /// Numeric confidence of a low-confidence prediction
    pub low_confidence: f64,

    /// Confidence multiplier when phase durations exceed the animal's age
    #[serde(default = "default_overlong_factor")]
    pub overlong_history_factor: f64,
}

fn default_overlong_factor() -> f64 {
    0.8
}

impl Default for OmegaCalibration {
    fn default() -> Self {
        Self {
            baselines: DietBaselines::default(),
            finishing_weight: 0.75,
            penalty_threshold_months: 4.0,
            penalty_per_month: 1.0,
            min_ratio: 2.0,
            max_ratio: 30.0,
            unknown_diet_ratio: 16.0,
            base_uncertainty: 1.5,
            unknown_breed_uncertainty: 2.0,
            low_coverage_uncertainty: 1.0,
            coverage_threshold: 0.8,
            default_maturity_months: 20.0,
            high_confidence: 0.85,
            medium_confidence: 0.65,
            low_confidence: 0.45,
            overlong_history_factor: default_overlong_factor(),
        }
    }
}

impl OmegaCalibration {
    /// Validate the calibration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.finishing_weight) {
            return Err("finishing_weight must be between 0.0 and 1.0".to_string());
        }
        if self.min_ratio <= 0.0 || self.max_ratio <= self.min_ratio {
            return Err(format!(
                "ratio bounds must satisfy 0 < min ({}) < max ({})",
                self.min_ratio, self.max_ratio
            ));
        }
        let b = &self.baselines;
        for (name, value) in [
            ("grass_only", b.grass_only),
            ("pasture_forage", b.pasture_forage),
            ("pasture_grain_supplemented", b.pasture_grain_supplemented),
            ("grain_finished", b.grain_finished),
            ("grain_fed", b.grain_fed),
        ] {
            if value <= 0.0 {
                return Err(format!("baseline {} must be greater than 0", name));
            }
        }
        if self.penalty_threshold_months < 0.0 || self.penalty_per_month < 0.0 {
            return Err("penalty settings cannot be negative".to_string());
        }
        if self.base_uncertainty < 0.0
            || self.unknown_breed_uncertainty < 0.0
            || self.low_coverage_uncertainty < 0.0
        {
            return Err("uncertainty settings cannot be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.coverage_threshold) {
            return Err("coverage_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.default_maturity_months <= 0.0 {
            return Err("default_maturity_months must be greater than 0".to_string());
        }
        for (name, value) in [
            ("high_confidence", self.high_confidence),
            ("medium_confidence", self.medium_confidence),
            ("low_confidence", self.low_confidence),
            ("overlong_history_factor", self.overlong_history_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
        }
        Ok(())
    }

    /// Load calibration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize calibration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
