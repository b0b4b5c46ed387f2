//! Profile module - immutable reference records classifying claim sets

use serde::{Deserialize, Serialize};

use crate::{Category, MetricKind, MetricRange, QualityTier};

/// A discrete quality profile a claim set can be classified into
///
/// Profiles are loaded once, shared read-only, and never mutated. Claim
/// lists hold *normalized* claim phrases (see `fielder-claims`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Short identifier, unique within a category (e.g. `A`, `eggs_pasture`)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Category owning this profile
    pub category: Category,

    /// Every one of these must match for the profile to qualify
    #[serde(default)]
    pub required_claims: Vec<String>,

    /// Any match disqualifies the profile
    #[serde(default)]
    pub excluded_claims: Vec<String>,

    /// Each match adds to the profile's score
    #[serde(default)]
    pub optional_claims: Vec<String>,

    /// Metric the expected range is expressed in
    pub metric: MetricKind,

    /// Expected metric range for products matching this profile
    pub expected_range: MetricRange,

    /// Quality tier
    pub quality_tier: QualityTier,

    /// Whether the profile implies confinement (CAFO / feedlot) finishing
    #[serde(default)]
    pub confined: bool,
}

impl Profile {
    /// Expected range rendered for display, e.g. `4-6:1`
    pub fn expected_range_display(&self) -> String {
        self.expected_range.display_for(self.metric)
    }

    /// Whether this is the commodity-tier profile of its category
    pub fn is_commodity(&self) -> bool {
        self.quality_tier == QualityTier::Commodity
    }
}
