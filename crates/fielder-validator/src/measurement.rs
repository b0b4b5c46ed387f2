//! Parsed measurement input

use chrono::{DateTime, Utc};
use fielder_domain::{Category, MetricKind};
use serde::{Deserialize, Serialize};

/// Who produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Accredited laboratory
    Lab,
    /// Grower or producer
    Farm,
    /// Consumer refractometer or kit
    Consumer,
}

impl DataSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Lab => "lab",
            DataSource::Farm => "farm",
            DataSource::Consumer => "consumer",
        }
    }

    /// Parse a source name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lab" | "laboratory" => Some(DataSource::Lab),
            "farm" | "grower" | "producer" => Some(DataSource::Farm),
            "consumer" | "user" => Some(DataSource::Consumer),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-parsed measurement fields of one sample
///
/// The category's primary metric (Brix for produce, omega ratio otherwise)
/// is required; every other field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Product category
    pub category: Category,
    /// Who measured
    pub source: DataSource,
    /// Brix reading
    #[serde(default)]
    pub brix: Option<f64>,
    /// Omega-6:3 ratio
    #[serde(default)]
    pub omega_ratio: Option<f64>,
    /// Cumulative GDD at sampling
    #[serde(default)]
    pub gdd: Option<f64>,
    /// Tree age in years
    #[serde(default)]
    pub tree_age: Option<f64>,
    /// Juice pH
    #[serde(default)]
    pub ph: Option<f64>,
    /// When the sample was taken
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Measurement {
    /// Create an empty measurement
    pub fn new(category: Category, source: DataSource) -> Self {
        Self {
            category,
            source,
            brix: None,
            omega_ratio: None,
            gdd: None,
            tree_age: None,
            ph: None,
            timestamp: None,
        }
    }

    /// Set a field value
    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        let slot = match kind {
            MetricKind::Brix => &mut self.brix,
            MetricKind::OmegaRatio => &mut self.omega_ratio,
            MetricKind::Gdd => &mut self.gdd,
            MetricKind::TreeAge => &mut self.tree_age,
            MetricKind::Ph => &mut self.ph,
        };
        *slot = Some(value);
        self
    }

    /// Set the sampling time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Value of a field
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Brix => self.brix,
            MetricKind::OmegaRatio => self.omega_ratio,
            MetricKind::Gdd => self.gdd,
            MetricKind::TreeAge => self.tree_age,
            MetricKind::Ph => self.ph,
        }
    }

    /// The required field of this measurement's category
    pub fn primary_metric(&self) -> MetricKind {
        self.category.primary_metric()
    }

    /// Whether any field besides the primary one was measured
    pub fn has_secondary(&self) -> bool {
        let primary = self.primary_metric();
        MetricKind::ALL
            .iter()
            .filter(|k| **k != primary)
            .any(|k| self.value(*k).is_some())
    }
}
