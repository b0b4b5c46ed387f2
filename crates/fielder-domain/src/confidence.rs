//! Confidence module - intervals around a predicted metric and coarse
//! confidence levels for reporting

use serde::{Deserialize, Serialize};

/// Interval `[lower, upper]` around a predicted metric value
///
/// `coverage` is the nominal probability mass inside the interval
/// (0.9 for a p5..p95 interval).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound (metric units)
    pub lower: f64,
    /// Upper bound (metric units)
    pub upper: f64,
    /// Nominal coverage in (0, 1]
    pub coverage: f64,
}

impl ConfidenceInterval {
    /// Create a new interval; bounds are reordered if given backwards
    pub fn new(lower: f64, upper: f64, coverage: f64) -> Self {
        Self {
            lower: lower.min(upper),
            upper: lower.max(upper),
            coverage,
        }
    }

    /// Symmetric interval `center ± half_width`
    pub fn around(center: f64, half_width: f64, coverage: f64) -> Self {
        Self::new(center - half_width.abs(), center + half_width.abs(), coverage)
    }

    /// Get the midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Get the width of the interval (uncertainty measure)
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if the interval contains a value
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Clamp both bounds into `[floor, ceiling]`
    pub fn clamped(&self, floor: f64, ceiling: f64) -> Self {
        Self::new(
            self.lower.clamp(floor, ceiling),
            self.upper.clamp(floor, ceiling),
            self.coverage,
        )
    }
}

/// Coarse confidence band derived from a numeric confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// 0.8 and above
    High,
    /// 0.6 up to 0.8
    Medium,
    /// 0.4 up to 0.6
    Low,
    /// Below 0.4
    Speculative,
}

impl ConfidenceLevel {
    /// Classify a numeric confidence
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else if confidence >= 0.4 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Speculative
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Speculative => "speculative",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval_creation() {
        let ci = ConfidenceInterval::new(4.0, 6.0, 0.9);
        assert_eq!(ci.lower, 4.0);
        assert_eq!(ci.upper, 6.0);
    }

    #[test]
    fn test_reversed_bounds_are_reordered() {
        let ci = ConfidenceInterval::new(9.0, 5.0, 0.9);
        assert_eq!(ci.lower, 5.0);
        assert_eq!(ci.upper, 9.0);
    }

    #[test]
    fn test_midpoint_and_width() {
        let ci = ConfidenceInterval::around(12.0, 1.5, 0.9);
        assert_eq!(ci.midpoint(), 12.0);
        assert_eq!(ci.width(), 3.0);
        assert!(ci.contains(13.0));
        assert!(!ci.contains(14.0));
    }

    #[test]
    fn test_clamped() {
        let ci = ConfidenceInterval::new(-1.0, 3.0, 0.9).clamped(0.0, 30.0);
        assert_eq!(ci.lower, 0.0);
        assert_eq!(ci.upper, 3.0);
    }

    #[test]
    fn test_levels() {
        assert_eq!(ConfidenceLevel::from_score(0.85), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.65), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.4), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.1), ConfidenceLevel::Speculative);
    }
}
