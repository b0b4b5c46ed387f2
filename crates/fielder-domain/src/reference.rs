//! Reference records read from the reference-data store
//!
//! These are immutable lookup values. They are loaded once, shared read-only
//! across calls, and replaced wholesale (never edited) on reload.

use serde::{Deserialize, Serialize};

/// A produce cultivar (variety) and its genetic Brix potential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CultivarRecord {
    /// Lookup key, e.g. `washington_navel`
    pub id: String,
    /// Display name
    pub name: String,
    /// Crop key used for GDD targets and sugar/acid curves, e.g. `navel_orange`
    pub crop: String,
    /// Typical Brix of this cultivar at peak on a neutral rootstock
    pub base_brix: f64,
}

/// A rootstock and its additive Brix modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootstockRecord {
    /// Lookup key, e.g. `carrizo`
    pub id: String,
    /// Display name
    pub name: String,
    /// Additive Brix modifier (may be negative for vigorous stocks)
    pub brix_modifier: f64,
}

/// Intramuscular fat potential of a breed, reported separately from omega
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarblingPotential {
    /// Lean breeds
    Low,
    /// Typical British and continental breeds
    Moderate,
    /// Angus-type breeds
    High,
    /// Wagyu and wagyu crosses
    VeryHigh,
}

impl MarblingPotential {
    /// Get the marbling potential as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MarblingPotential::Low => "low",
            MarblingPotential::Moderate => "moderate",
            MarblingPotential::High => "high",
            MarblingPotential::VeryHigh => "very_high",
        }
    }
}

/// A livestock breed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    /// Lookup key, e.g. `american_wagyu`
    pub id: String,
    /// Display name
    pub name: String,
    /// Age in months at which the breed typically reaches harvest maturity
    pub maturity_months: f64,
    /// Marbling potential
    pub marbling_potential: MarblingPotential,
}

/// A growing region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Lookup key, e.g. `indian_river_fl`
    pub id: String,
    /// Display name
    pub name: String,
    /// Climatological average daily GDD during the growing season
    pub avg_daily_gdd: f64,
}

/// Thermal-time targets of a crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GddTargets {
    /// Base temperature (°F)
    pub base_temp: f64,
    /// Cumulative GDD at which the crop is mature enough to harvest
    pub gdd_to_maturity: f64,
    /// Cumulative GDD at peak quality
    pub gdd_to_peak: f64,
    /// Width of the harvest window in GDD
    pub gdd_window: f64,
}

impl GddTargets {
    /// Targets used when the crop is not known
    pub const DEFAULT: GddTargets = GddTargets {
        base_temp: 50.0,
        gdd_to_maturity: 1800.0,
        gdd_to_peak: 2100.0,
        gdd_window: 200.0,
    };

    /// Create a new target set
    pub const fn new(base_temp: f64, gdd_to_maturity: f64, gdd_to_peak: f64, gdd_window: f64) -> Self {
        Self {
            base_temp,
            gdd_to_maturity,
            gdd_to_peak,
            gdd_window,
        }
    }

    /// Check the targets are internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_temp.is_finite() {
            return Err("base_temp must be finite".to_string());
        }
        if self.gdd_to_maturity < 0.0 || self.gdd_to_peak < 0.0 || self.gdd_window < 0.0 {
            return Err("GDD targets must be non-negative".to_string());
        }
        if self.gdd_to_peak < self.gdd_to_maturity {
            return Err(format!(
                "gdd_to_peak ({}) must not precede gdd_to_maturity ({})",
                self.gdd_to_peak, self.gdd_to_maturity
            ));
        }
        Ok(())
    }
}

impl Default for GddTargets {
    fn default() -> Self {
        Self::DEFAULT
    }
}
