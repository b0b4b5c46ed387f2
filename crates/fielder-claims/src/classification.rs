//! Classification result

use fielder_domain::{Category, MetricKind, MetricRange, Profile, QualityTier, Warning};
use serde::{Deserialize, Serialize};

/// Which engine produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Dedicated short-circuit precedence tree
    PrecedenceTree,
    /// Generic weighted scorer
    WeightedScore,
}

impl Strategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::PrecedenceTree => "precedence_tree",
            Strategy::WeightedScore => "weighted_score",
        }
    }
}

/// Outcome of classifying a claim set into a category profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Category classified within
    pub category: Category,
    /// Chosen profile id
    pub profile_id: String,
    /// Chosen profile name
    pub profile_name: String,
    /// Engine used
    pub strategy: Strategy,
    /// Whether the profile implies confinement (CAFO) finishing
    pub is_cafo: bool,
    /// Metric of the expected range
    pub metric: MetricKind,
    /// Expected metric range
    pub expected_range: MetricRange,
    /// Expected range for display, e.g. `4-6:1`
    pub expected_range_display: String,
    /// Quality tier of the profile
    pub quality_tier: QualityTier,
    /// Confidence in the classification
    pub confidence: f64,
    /// Winning score (weighted scorer only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    /// Normalized claims that contributed to the decision
    pub matched_claims: Vec<String>,
    /// Normalized claims no rule recognized
    pub unrecognized_claims: Vec<String>,
    /// Templated caveats about the claim set
    pub warnings: Vec<Warning>,
}

impl Classification {
    pub(crate) fn from_profile(profile: &Profile, strategy: Strategy, confidence: f64) -> Self {
        Self {
            category: profile.category,
            profile_id: profile.id.clone(),
            profile_name: profile.name.clone(),
            strategy,
            is_cafo: profile.confined,
            metric: profile.metric,
            expected_range: profile.expected_range,
            expected_range_display: profile.expected_range_display(),
            quality_tier: profile.quality_tier,
            confidence,
            score: None,
            matched_claims: Vec::new(),
            unrecognized_claims: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
