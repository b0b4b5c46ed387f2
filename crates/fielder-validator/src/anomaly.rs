//! Z-score anomaly detection

use serde::{Deserialize, Serialize};

/// Side of the mean an anomaly lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Above the mean
    Above,
    /// Below the mean
    Below,
}

/// Result of an anomaly check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyCheck {
    /// Whether |z| exceeded the threshold
    pub is_anomaly: bool,
    /// Standardized distance from the mean (infinite when the spread is zero
    /// and the value differs from the mean)
    pub z_score: f64,
    /// Side of the mean, for anomalies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Explanation, for anomalies and for values that could not be scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Standardized distance of `value` from `mean`
///
/// A zero spread makes any differing value maximally anomalous.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    let diff = value - mean;
    if std_dev <= 0.0 {
        if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(diff)
        }
    } else {
        diff / std_dev
    }
}

/// Check a value against an explicit mean and standard deviation
///
/// A value or statistic that is not finite cannot be scored: the check is
/// not an anomaly, its z-score is NaN and the reason says why.
pub fn detect_anomaly(value: f64, mean: f64, std_dev: f64, threshold: f64) -> AnomalyCheck {
    if !value.is_finite() || !mean.is_finite() || std_dev.is_nan() {
        tracing::debug!(value, mean, std_dev, "Anomaly check skipped");
        return AnomalyCheck {
            is_anomaly: false,
            z_score: f64::NAN,
            direction: None,
            reason: Some(format!("Value {} cannot be scored against mean {}", value, mean)),
        };
    }

    let z = z_score(value, mean, std_dev);
    if z.abs() <= threshold {
        return AnomalyCheck {
            is_anomaly: false,
            z_score: z,
            direction: None,
            reason: None,
        };
    }

    let direction = if z > 0.0 { Direction::Above } else { Direction::Below };
    let side = match direction {
        Direction::Above => "above",
        Direction::Below => "below",
    };
    let reason = if z.is_infinite() {
        format!("Value {} differs from a constant history of {}", value, mean)
    } else {
        format!(
            "Value {} is {:.1} standard deviations {} the mean of {:.2}",
            value,
            z.abs(),
            side,
            mean
        )
    };

    tracing::debug!(value, mean, std_dev, z, "Anomaly detected");

    AnomalyCheck {
        is_anomaly: true,
        z_score: z,
        direction: Some(direction),
        reason: Some(reason),
    }
}

/// Sample mean and sample standard deviation (n − 1); `None` below two values
pub fn sample_stats(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some((mean, var.sqrt()))
}

/// Check a value against statistics of a history window
///
/// Returns `None` when the history has fewer than `min_samples` finite
/// values.
pub fn detect_from_history(
    value: f64,
    history: &[f64],
    threshold: f64,
    min_samples: usize,
) -> Option<AnomalyCheck> {
    let finite: Vec<f64> = history.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < min_samples.max(2) {
        return None;
    }
    let (mean, std_dev) = sample_stats(&finite)?;
    Some(detect_anomaly(value, mean, std_dev, threshold))
}
