//! Prediction result envelope

use fielder_claims::Classification;
use fielder_domain::{
    Category, ConfidenceInterval, ConfidenceLevel, PredictionId, PrimaryMetric, QualityTier,
    ValidationResult, Warning,
};
use fielder_omega::OmegaPrediction;
use fielder_produce::{BrixPrediction, GddProjection, HarvestStatus, HarvestWindow, SugarAcidEstimate};
use fielder_uncertainty::Distribution;
use fielder_validator::{AnomalyCheck, ConsistencyCheck, DataQuality};
use serde::{Deserialize, Serialize};

/// One SHARE pillar's contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Additive contribution to the point estimate, when the pillar has one
    pub contribution: Option<f64>,
    /// Share of total variance in `[0, 1]`
    pub variance_share: f64,
    /// What the pillar was resolved from
    pub source: String,
}

/// Heritage, soil, agricultural and ripen pillars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarBreakdown {
    /// Cultivar or breed
    pub heritage: Pillar,
    /// Rootstock or region
    pub soil: Pillar,
    /// Practice: tree age or diet
    pub agricultural: Pillar,
    /// Harvest timing or finishing duration
    pub ripen: Pillar,
}

/// Produce-only details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduceDetail {
    /// Brix breakdown
    pub brix: BrixPrediction,
    /// Season-to-date GDD used
    pub current_gdd: f64,
    /// Where the crop sits in its harvest season
    pub harvest_status: HarvestStatus,
    /// Dated harvest window, when an `as_of` date was given
    pub harvest_window: Option<HarvestWindow>,
    /// Projection to peak GDD, when an `as_of` date was given
    pub peak_projection: Option<GddProjection>,
    /// Sugar/acid balance, for crop families with curve parameters
    pub sugar_acid: Option<SugarAcidEstimate>,
    /// Percent difference from commodity Brix
    pub vs_commodity_pct: f64,
    /// Consumer-facing quality message
    pub quality_message: String,
}

/// Checks run against a supplied measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    /// Measured value of the primary metric
    pub value: f64,
    /// Physical and typical-range validation
    pub validation: ValidationResult,
    /// Agreement with the classified profile; `None` when the value was unusable
    pub consistency: Option<ConsistencyCheck>,
    /// Deviation from the reading history, when enough history was given
    pub anomaly: Option<AnomalyCheck>,
    /// Composite data-quality score
    pub data_quality: DataQuality,
}

/// Uniform result of one prediction
///
/// Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Correlation id
    pub prediction_id: PredictionId,
    /// Category predicted for
    pub category: Category,
    /// Point estimate of the primary metric
    pub primary_metric: PrimaryMetric,
    /// Tier of the point estimate
    pub quality_tier: QualityTier,
    /// Numeric confidence in `[0, 1]`
    pub confidence: f64,
    /// Confidence tier
    pub confidence_level: ConfidenceLevel,
    /// 90% interval from the distribution
    pub confidence_interval: ConfidenceInterval,
    /// Per-pillar breakdown
    pub pillars: PillarBreakdown,
    /// Claim classification
    pub classification: Classification,
    /// Produce details; `None` for animal categories
    pub produce: Option<ProduceDetail>,
    /// Omega details; `None` for produce
    pub omega: Option<OmegaPrediction>,
    /// Distribution summary
    pub distribution: Distribution,
    /// Physical validation of the point estimate
    pub validation: ValidationResult,
    /// Measurement checks, when a measurement was supplied
    pub measurement: Option<MeasurementReport>,
    /// Every warning raised along the way
    pub warnings: Vec<Warning>,
    /// Notes on defaults and degraded inputs
    pub data_quality_notes: Vec<String>,
}

impl PredictionResult {
    /// Harvest status, for produce
    pub fn harvest_status(&self) -> Option<HarvestStatus> {
        self.produce.as_ref().map(|p| p.harvest_status)
    }

    /// Consistency check, when a measurement was supplied
    pub fn consistency(&self) -> Option<&ConsistencyCheck> {
        self.measurement.as_ref().and_then(|m| m.consistency.as_ref())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize result: {}", e))
    }
}
