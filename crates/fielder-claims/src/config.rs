//! Claim engine configuration

use serde::{Deserialize, Serialize};

/// Base confidence of each beef precedence-tree outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeefConfidence {
    /// Full grass claim with CAFO exclusion
    pub a: f64,
    /// CAFO exclusion without a full grass claim
    pub b: f64,
    /// Grass-fed only
    pub c: f64,
    /// Pasture-raised only
    pub d: f64,
    /// No recognized claims
    pub e: f64,
    /// Natural-family claims only
    pub e2: f64,
    /// Breed or grade claims without process claims
    pub f: f64,
}

impl Default for BeefConfidence {
    fn default() -> Self {
        Self {
            a: 0.9,
            b: 0.8,
            c: 0.7,
            d: 0.65,
            e: 0.5,
            e2: 0.7,
            f: 0.75,
        }
    }
}

/// Configuration of the claim inference engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimsConfig {
    /// Score for a profile whose required claims all matched
    pub required_score: i32,

    /// Score added per matched optional claim
    pub optional_score: i32,

    /// Score of a profile with a matched excluded claim
    pub excluded_score: i32,

    /// Distinguishing claims needed for the multi-claim confidence floor
    pub multi_claim_threshold: usize,

    /// Confidence floor once enough distinguishing claims matched
    pub multi_claim_confidence: f64,

    /// Beef precedence-tree base confidences
    #[serde(default)]
    pub beef: BeefConfidence,

    /// Scorer confidence for a winner with no optional matches
    pub scorer_base_confidence: f64,

    /// Scorer confidence added per matched optional claim
    pub scorer_optional_confidence: f64,

    /// Scorer confidence ceiling
    pub scorer_max_confidence: f64,

    /// Confidence when the scorer fell back to the commodity profile
    pub fallback_confidence: f64,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            required_score: 10,
            optional_score: 5,
            excluded_score: -1000,
            multi_claim_threshold: 2,
            multi_claim_confidence: 0.9,
            beef: BeefConfidence::default(),
            scorer_base_confidence: 0.6,
            scorer_optional_confidence: 0.1,
            scorer_max_confidence: 0.95,
            fallback_confidence: 0.4,
        }
    }
}

impl ClaimsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.required_score <= 0 {
            return Err("required_score must be greater than 0".to_string());
        }
        if self.optional_score < 0 {
            return Err("optional_score cannot be negative".to_string());
        }
        if self.excluded_score >= 0 {
            return Err("excluded_score must be negative".to_string());
        }
        let b = &self.beef;
        let checks = [
            ("multi_claim_confidence", self.multi_claim_confidence),
            ("scorer_base_confidence", self.scorer_base_confidence),
            ("scorer_optional_confidence", self.scorer_optional_confidence),
            ("scorer_max_confidence", self.scorer_max_confidence),
            ("fallback_confidence", self.fallback_confidence),
            ("beef.a", b.a),
            ("beef.b", b.b),
            ("beef.c", b.c),
            ("beef.d", b.d),
            ("beef.e", b.e),
            ("beef.e2", b.e2),
            ("beef.f", b.f),
        ];
        for (name, value) in checks {
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
