//! Distribution summaries

use fielder_domain::ConfidenceInterval;
use serde::{Deserialize, Serialize};

use crate::components::PillarShares;
use crate::Method;

/// Reported percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 5th percentile
    pub p5: f64,
    /// 10th percentile
    pub p10: f64,
    /// 25th percentile
    pub p25: f64,
    /// Median
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
}

/// Probability distribution around a point estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// How it was obtained
    pub method: Method,
    /// Point estimate the distribution is centred on (empirical: sample mean)
    pub point_estimate: f64,
    /// Mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Percentiles
    pub percentiles: Percentiles,
    /// Interquartile range, p75 − p25
    pub iqr: f64,
    /// 90% interval, `[p5, p95]`
    pub ci90: ConfidenceInterval,
    /// Samples drawn or supplied (0 for parametric)
    pub n_samples: usize,
    /// Physical floor values were clamped at
    pub floor: f64,
    /// Share of variance per pillar (model-based methods only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_shares: Option<PillarShares>,
}

/// Percentile of sorted data with linear interpolation between ranks
///
/// `p` is in percent. `sorted` must be non-empty and ascending.
pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Summarize sorted samples
pub(crate) fn summarize(
    method: Method,
    point_estimate: f64,
    sorted: &[f64],
    floor: f64,
    pillar_shares: Option<PillarShares>,
) -> Distribution {
    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0).max(1.0);

    let percentiles = Percentiles {
        p5: percentile(sorted, 5.0),
        p10: percentile(sorted, 10.0),
        p25: percentile(sorted, 25.0),
        p50: percentile(sorted, 50.0),
        p75: percentile(sorted, 75.0),
        p90: percentile(sorted, 90.0),
        p95: percentile(sorted, 95.0),
    };

    Distribution {
        method,
        point_estimate,
        mean,
        median: percentiles.p50,
        std_dev: var.sqrt(),
        iqr: percentiles.p75 - percentiles.p25,
        ci90: ConfidenceInterval::new(percentiles.p5, percentiles.p95, 0.9),
        percentiles,
        n_samples: sorted.len(),
        floor,
        pillar_shares,
    }
}
