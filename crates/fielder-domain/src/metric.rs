//! Metric kinds, ranges and the primary metric carried in results

use serde::{Deserialize, Serialize};

/// A numeric quantity the engine predicts, measures or validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Dissolved solids in juice, °Bx
    Brix,
    /// Omega-6 to omega-3 fatty-acid ratio (x:1)
    OmegaRatio,
    /// Cumulative growing degree days, °F·day
    Gdd,
    /// Tree age, years
    TreeAge,
    /// Acidity, pH
    Ph,
}

impl MetricKind {
    /// Every metric, in declaration order
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Brix,
        MetricKind::OmegaRatio,
        MetricKind::Gdd,
        MetricKind::TreeAge,
        MetricKind::Ph,
    ];

    /// Field name used in validation records
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Brix => "brix",
            MetricKind::OmegaRatio => "omega_ratio",
            MetricKind::Gdd => "gdd",
            MetricKind::TreeAge => "tree_age",
            MetricKind::Ph => "ph",
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Brix => "°Bx",
            MetricKind::OmegaRatio => ":1",
            MetricKind::Gdd => "GDD",
            MetricKind::TreeAge => "years",
            MetricKind::Ph => "pH",
        }
    }

    /// Parse a metric name (accepts camelCase and snake_case)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "brix" => Some(MetricKind::Brix),
            "omegaratio" | "omega" => Some(MetricKind::OmegaRatio),
            "gdd" => Some(MetricKind::Gdd),
            "treeage" | "age" => Some(MetricKind::TreeAge),
            "ph" => Some(MetricKind::Ph),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid metric: {}", s))
    }
}

/// Closed numeric range `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    /// Inclusive lower bound
    pub low: f64,
    /// Inclusive upper bound
    pub high: f64,
}

impl MetricRange {
    /// Create a range, reordering reversed bounds
    pub const fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self { low: high, high: low }
        }
    }

    /// Check if the range contains a value
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Clamp a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }

    /// Midpoint of the range
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Human-readable form for a metric, e.g. `4-6:1` or `10-14 °Bx`
    pub fn display_for(&self, kind: MetricKind) -> String {
        match kind {
            MetricKind::OmegaRatio => format!("{}-{}:1", trim_float(self.low), trim_float(self.high)),
            _ => format!(
                "{}-{} {}",
                trim_float(self.low),
                trim_float(self.high),
                kind.unit()
            ),
        }
    }
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// The headline value of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryMetric {
    /// Which metric
    #[serde(rename = "type")]
    pub kind: MetricKind,
    /// Point estimate
    pub value: f64,
    /// Display unit
    pub unit: String,
}

impl PrimaryMetric {
    /// Create a primary metric with the kind's default unit
    pub fn new(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            value,
            unit: kind.unit().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_names() {
        assert_eq!(MetricKind::parse("omegaRatio"), Some(MetricKind::OmegaRatio));
        assert_eq!(MetricKind::parse("tree_age"), Some(MetricKind::TreeAge));
        assert_eq!(MetricKind::parse("PH"), Some(MetricKind::Ph));
        assert_eq!(MetricKind::parse("weight"), None);
    }

    #[test]
    fn test_range_display() {
        let omega = MetricRange::new(4.0, 6.0);
        assert_eq!(omega.display_for(MetricKind::OmegaRatio), "4-6:1");

        let brix = MetricRange::new(10.0, 12.5);
        assert_eq!(brix.display_for(MetricKind::Brix), "10-12.5 °Bx");
    }

    #[test]
    fn test_range_reorders_and_clamps() {
        let range = MetricRange::new(30.0, 0.0);
        assert_eq!(range.low, 0.0);
        assert_eq!(range.clamp(35.0), 30.0);
        assert!(range.contains(0.0));
        assert_eq!(range.midpoint(), 15.0);
    }

    #[test]
    fn test_primary_metric_serializes_type_field() {
        let metric = PrimaryMetric::new(MetricKind::Brix, 12.3);
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["type"], "brix");
        assert_eq!(json["unit"], "°Bx");
    }
}
