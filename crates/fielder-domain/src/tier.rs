//! Quality tier module - discrete quality bands attached to profiles

use serde::{Deserialize, Serialize};

/// Quality tier of a profile or prediction
///
/// Tiers are ordered from best to worst:
/// - Artisan: exceptional, verifiably best-practice production
/// - Premium: clearly above the commodity baseline
/// - Standard: marketing-differentiated but close to baseline
/// - Commodity: the industry default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Exceptional quality
    Artisan,

    /// Above-baseline quality
    Premium,

    /// Baseline-adjacent quality
    Standard,

    /// Industry default
    Commodity,
}

impl QualityTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Artisan => "artisan",
            QualityTier::Premium => "premium",
            QualityTier::Standard => "standard",
            QualityTier::Commodity => "commodity",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "artisan" => Some(QualityTier::Artisan),
            "premium" => Some(QualityTier::Premium),
            "standard" => Some(QualityTier::Standard),
            "commodity" => Some(QualityTier::Commodity),
            _ => None,
        }
    }

    /// Get the next better tier (None at the top)
    pub fn better(&self) -> Option<Self> {
        match self {
            QualityTier::Artisan => None,
            QualityTier::Premium => Some(QualityTier::Artisan),
            QualityTier::Standard => Some(QualityTier::Premium),
            QualityTier::Commodity => Some(QualityTier::Standard),
        }
    }

    /// Get the next worse tier (None at the bottom)
    pub fn worse(&self) -> Option<Self> {
        match self {
            QualityTier::Artisan => Some(QualityTier::Premium),
            QualityTier::Premium => Some(QualityTier::Standard),
            QualityTier::Standard => Some(QualityTier::Commodity),
            QualityTier::Commodity => None,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid quality tier: {}", s))
    }
}
