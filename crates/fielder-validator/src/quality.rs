//! Composite data-quality score

use serde::{Deserialize, Serialize};

use crate::config::DataQualityConfig;
use crate::measurement::{DataSource, Measurement};

/// Data-quality assessment of one measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Score in `[0, 1]`
    pub score: f64,
    /// What lowered the score
    pub issues: Vec<String>,
    /// What would raise it
    pub recommendations: Vec<String>,
}

impl DataQuality {
    /// Whether the score is below the lab-verification threshold
    pub fn needs_verification(&self, config: &DataQualityConfig) -> bool {
        self.score < config.lab_verification_threshold
    }
}

/// Score a measurement
///
/// Starts at the source baseline, subtracts the configured penalties and
/// clamps to `[0, 1]`.
pub fn assess(measurement: &Measurement, config: &DataQualityConfig) -> DataQuality {
    let mut score = match measurement.source {
        DataSource::Lab => config.lab_baseline,
        DataSource::Farm => config.farm_baseline,
        DataSource::Consumer => config.consumer_baseline,
    };
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let primary = measurement.primary_metric();
    if measurement.value(primary).is_none() {
        score -= config.missing_primary_penalty;
        issues.push(format!("No {} reading", primary));
        recommendations.push(format!("Record a {} reading", primary));
    }
    if measurement.timestamp.is_none() {
        score -= config.missing_timestamp_penalty;
        issues.push("No sample timestamp".to_string());
        recommendations.push("Record when the sample was taken".to_string());
    }
    if !measurement.has_secondary() {
        score -= config.missing_secondary_penalty;
        issues.push("No secondary measurement".to_string());
        recommendations.push("Add a secondary measurement to corroborate the reading".to_string());
    }

    let score = score.clamp(0.0, 1.0);
    if score < config.lab_verification_threshold {
        recommendations.push("Seek lab verification".to_string());
    }

    DataQuality {
        score,
        issues,
        recommendations,
    }
}
