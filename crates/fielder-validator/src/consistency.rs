//! Profile consistency check
//!
//! Compares a measured value with the expected range of the profile a claim
//! set was classified into. For omega ratios lower is better: landing above
//! the range contradicts the claims, landing below it is a pleasant
//! surprise. For Brix the direction flips.

use fielder_domain::{MetricKind, MetricRange, Profile, Severity};
use serde::{Deserialize, Serialize};

use crate::ValidationConfig;

/// Outcome of comparing a measurement with a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    /// Whether the measurement supports the profile
    pub is_consistent: bool,
    /// Severity of the finding
    pub severity: Severity,
    /// Distance beyond the expected range on the worse side, relative to
    /// the violated bound (0 when consistent)
    pub deviation: f64,
    /// Measured value
    pub measured: f64,
    /// Expected range
    pub expected_range: MetricRange,
    /// Expected range for display
    pub expected_display: String,
    /// Human-readable explanation
    pub message: String,
}

/// Cross-checks profile expectations against measured values
#[derive(Debug, Clone)]
pub struct ProfileOmegaValidator {
    critical_deviation: f64,
}

impl ProfileOmegaValidator {
    /// Create a validator; relative deviations above `critical_deviation`
    /// are critical
    pub fn new(critical_deviation: f64) -> Self {
        Self { critical_deviation }
    }

    /// Create a validator from the shared configuration
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(config.critical_deviation)
    }

    /// Check a measurement against a profile's expected range
    pub fn check(&self, profile: &Profile, measured: f64) -> ConsistencyCheck {
        self.check_range(profile.metric, profile.expected_range, measured, &profile.id)
    }

    /// Check a measurement against an explicit range
    pub fn check_range(
        &self,
        metric: MetricKind,
        expected: MetricRange,
        measured: f64,
        label: &str,
    ) -> ConsistencyCheck {
        let expected_display = expected.display_for(metric);
        let higher_is_better = metric == MetricKind::Brix;
        let shown = display_value(metric, measured);

        let (worse, better) = if higher_is_better {
            (measured < expected.low, measured > expected.high)
        } else {
            (measured > expected.high, measured < expected.low)
        };

        if worse {
            let bound = if higher_is_better { expected.low } else { expected.high };
            let deviation = if bound.abs() > f64::EPSILON {
                (measured - bound).abs() / bound.abs()
            } else {
                f64::INFINITY
            };
            let severity = if deviation > self.critical_deviation {
                Severity::Critical
            } else {
                Severity::Warning
            };
            tracing::warn!(
                profile = label,
                measured,
                expected = %expected_display,
                deviation,
                "Measurement inconsistent with profile"
            );
            return ConsistencyCheck {
                is_consistent: false,
                severity,
                deviation,
                measured,
                expected_range: expected,
                message: format!(
                    "Measured {} is worse than the {} expected for profile {}; the claims are inconsistent with the measurement",
                    shown, expected_display, label
                ),
                expected_display,
            };
        }

        let message = if better {
            format!(
                "Measured {} is better than expected ({}) for profile {}",
                shown, expected_display, label
            )
        } else {
            format!(
                "Measured {} is within the {} expected for profile {}",
                shown, expected_display, label
            )
        };

        ConsistencyCheck {
            is_consistent: true,
            severity: Severity::Info,
            deviation: 0.0,
            measured,
            expected_range: expected,
            expected_display,
            message,
        }
    }
}

impl Default for ProfileOmegaValidator {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

fn display_value(metric: MetricKind, value: f64) -> String {
    match metric {
        MetricKind::OmegaRatio => format!("{}:1", value),
        _ => format!("{} {}", value, metric.unit()),
    }
}
