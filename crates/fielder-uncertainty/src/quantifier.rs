//! Uncertainty quantifier

use std::f64::consts::PI;

use fielder_domain::MetricKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::VarianceComponents;
use crate::distribution::{summarize, Distribution, Percentiles};
use crate::{Method, UncertaintyConfig, UncertaintyError};

/// Standard-normal quantiles of the reported percentiles
const Z_P95: f64 = 1.6449;
const Z_P90: f64 = 1.2816;
const Z_P75: f64 = 0.6745;

/// Lowest physically possible value of a metric
pub fn physical_floor(metric: MetricKind) -> f64 {
    match metric {
        MetricKind::OmegaRatio => 0.5,
        _ => 0.0,
    }
}

/// Draw `n` standard-normal values with the Box-Muller transform
pub fn standard_normals<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n + 1);
    while out.len() < n {
        // (0, 1] keeps ln finite
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = rng.gen::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        out.push(r * theta.cos());
        out.push(r * theta.sin());
    }
    out.truncate(n);
    out
}

/// Monte Carlo distribution from an explicit RNG
///
/// Samples are `point + total_std_dev · z`, clamped at `floor`.
pub fn monte_carlo_with_rng<R: Rng>(
    rng: &mut R,
    point: f64,
    components: &VarianceComponents,
    floor: f64,
    n_samples: usize,
) -> Distribution {
    let sd = components.total_std_dev();
    let mut samples: Vec<f64> = standard_normals(rng, n_samples.max(2))
        .into_iter()
        .map(|z| (point + sd * z).max(floor))
        .collect();
    samples.sort_by(f64::total_cmp);
    summarize(Method::MonteCarlo, point, &samples, floor, components.shares())
}

/// Turns point estimates into probability distributions
pub struct UncertaintyQuantifier {
    config: UncertaintyConfig,
}

impl UncertaintyQuantifier {
    /// Create a quantifier with the given configuration
    pub fn new(config: UncertaintyConfig) -> Self {
        Self { config }
    }

    /// Create a quantifier, validating the configuration first
    pub fn try_new(config: UncertaintyConfig) -> Result<Self, UncertaintyError> {
        config.validate().map_err(UncertaintyError::Config)?;
        Ok(Self::new(config))
    }

    /// Get the quantifier configuration
    pub fn config(&self) -> &UncertaintyConfig {
        &self.config
    }

    /// Quantify with the configured method
    ///
    /// `n_samples` overrides the configured draw count (capped at
    /// `max_samples`) and is ignored by the parametric method.
    pub fn quantify(
        &self,
        point: f64,
        components: &VarianceComponents,
        floor: f64,
        n_samples: Option<usize>,
    ) -> Distribution {
        match self.config.method {
            Method::Parametric => self.parametric(point, components, floor),
            _ => self.monte_carlo(point, components, floor, n_samples),
        }
    }

    /// Monte Carlo distribution
    pub fn monte_carlo(
        &self,
        point: f64,
        components: &VarianceComponents,
        floor: f64,
        n_samples: Option<usize>,
    ) -> Distribution {
        let n = n_samples
            .unwrap_or(self.config.n_samples)
            .clamp(2, self.config.max_samples.max(2));
        tracing::debug!(
            n_samples = n,
            point,
            total_std_dev = components.total_std_dev(),
            seeded = self.config.seed.is_some(),
            "Running Monte Carlo"
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        monte_carlo_with_rng(&mut rng, point, components, floor, n)
    }

    /// Closed-form normal percentiles, clamped at `floor`
    pub fn parametric(&self, point: f64, components: &VarianceComponents, floor: f64) -> Distribution {
        let sd = components.total_std_dev();
        let at = |z: f64| (point + z * sd).max(floor);
        let percentiles = Percentiles {
            p5: at(-Z_P95),
            p10: at(-Z_P90),
            p25: at(-Z_P75),
            p50: at(0.0),
            p75: at(Z_P75),
            p90: at(Z_P90),
            p95: at(Z_P95),
        };

        Distribution {
            method: Method::Parametric,
            point_estimate: point,
            mean: point,
            median: percentiles.p50,
            std_dev: sd,
            iqr: percentiles.p75 - percentiles.p25,
            ci90: fielder_domain::ConfidenceInterval::new(percentiles.p5, percentiles.p95, 0.9),
            percentiles,
            n_samples: 0,
            floor,
            pillar_shares: components.shares(),
        }
    }

    /// Statistics of a historical sample
    ///
    /// Non-finite values are dropped; at least two must remain.
    pub fn empirical(&self, samples: &[f64]) -> Result<Distribution, UncertaintyError> {
        let mut finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() < 2 {
            return Err(UncertaintyError::InsufficientSamples(finite.len()));
        }
        finite.sort_by(f64::total_cmp);
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        let floor = finite[0];
        Ok(summarize(Method::Empirical, mean, &finite, floor, None))
    }
}

impl Default for UncertaintyQuantifier {
    fn default() -> Self {
        Self::new(UncertaintyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: usize) -> UncertaintyQuantifier {
        UncertaintyQuantifier::new(UncertaintyConfig {
            n_samples: n,
            seed: Some(7),
            ..UncertaintyConfig::default()
        })
    }

    #[test]
    fn test_normals_have_unit_spread() {
        let mut rng = StdRng::seed_from_u64(1);
        let z = standard_normals(&mut rng, 20_001);
        assert_eq!(z.len(), 20_001);
        let mean = z.iter().sum::<f64>() / z.len() as f64;
        let var = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (z.len() - 1) as f64;
        assert!(mean.abs() < 0.05);
        assert!((var - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_monte_carlo_centres_on_point() {
        let q = seeded(10_000);
        let c = VarianceComponents::new(0.6, 0.5, 0.4, 0.8);
        let d = q.monte_carlo(12.0, &c, 0.0, None);
        let sd = c.total_std_dev();

        assert_eq!(d.n_samples, 10_000);
        assert!((d.percentiles.p50 - 12.0).abs() < 0.1 * sd);
        assert!(d.percentiles.p5 < d.percentiles.p50);
        assert!(d.percentiles.p50 < d.percentiles.p95);
        assert!((d.std_dev - sd).abs() < 0.05 * sd);
        assert_eq!(d.ci90.lower, d.percentiles.p5);
        assert_eq!(d.ci90.upper, d.percentiles.p95);
    }

    #[test]
    fn test_same_seed_same_result() {
        let c = VarianceComponents::for_category(fielder_domain::Category::Produce);
        let a = seeded(2_000).monte_carlo(11.0, &c, 0.0, None);
        let b = seeded(2_000).monte_carlo(11.0, &c, 0.0, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_floor_clamps_samples() {
        let q = seeded(5_000);
        let c = VarianceComponents::new(2.0, 0.0, 0.0, 0.0);
        let d = q.monte_carlo(1.0, &c, 0.5, None);
        assert!(d.percentiles.p5 >= 0.5);
        assert_eq!(d.percentiles.p5, 0.5);
        assert_eq!(d.floor, 0.5);
    }

    #[test]
    fn test_override_sample_count() {
        let q = seeded(10_000);
        let c = VarianceComponents::new(1.0, 0.0, 0.0, 0.0);
        let d = q.monte_carlo(5.0, &c, 0.0, Some(500));
        assert_eq!(d.n_samples, 500);
    }

    #[test]
    fn test_parametric_matches_normal_quantiles() {
        let q = UncertaintyQuantifier::new(UncertaintyConfig::fast());
        let c = VarianceComponents::new(1.0, 0.0, 0.0, 0.0);
        let d = q.quantify(10.0, &c, 0.0, None);

        assert_eq!(d.method, Method::Parametric);
        assert_eq!(d.percentiles.p50, 10.0);
        assert!((d.percentiles.p95 - 11.6449).abs() < 1e-9);
        assert!((d.percentiles.p5 - 8.3551).abs() < 1e-9);
        assert!((d.iqr - 1.349).abs() < 1e-9);
    }

    #[test]
    fn test_parametric_close_to_monte_carlo() {
        let c = VarianceComponents::new(0.8, 0.5, 0.4, 0.9);
        let mc = seeded(20_000).monte_carlo(12.0, &c, 0.0, None);
        let pm = seeded(20_000).parametric(12.0, &c, 0.0);
        assert!((mc.percentiles.p95 - pm.percentiles.p95).abs() < 0.1);
        assert!((mc.percentiles.p5 - pm.percentiles.p5).abs() < 0.1);
    }

    #[test]
    fn test_empirical() {
        let q = UncertaintyQuantifier::default();
        let d = q.empirical(&[10.0, 12.0, 11.0, f64::NAN, 13.0, 9.0]).unwrap();
        assert_eq!(d.method, Method::Empirical);
        assert_eq!(d.n_samples, 5);
        assert_eq!(d.mean, 11.0);
        assert_eq!(d.median, 11.0);
        assert!(d.pillar_shares.is_none());
    }

    #[test]
    fn test_empirical_needs_two_values() {
        let q = UncertaintyQuantifier::default();
        assert!(matches!(
            q.empirical(&[1.0, f64::NAN]),
            Err(UncertaintyError::InsufficientSamples(1))
        ));
    }

    #[test]
    fn test_physical_floor() {
        assert_eq!(physical_floor(MetricKind::OmegaRatio), 0.5);
        assert_eq!(physical_floor(MetricKind::Brix), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn percentiles_are_ordered(point in 5.0f64..25.0, sd in 0.1f64..3.0, seed in any::<u64>()) {
            let q = UncertaintyQuantifier::new(UncertaintyConfig {
                n_samples: 2_000,
                seed: Some(seed),
                ..UncertaintyConfig::default()
            });
            let d = q.monte_carlo(point, &VarianceComponents::new(sd, 0.0, 0.0, 0.0), 0.0, None);
            let p = d.percentiles;
            prop_assert!(p.p5 <= p.p10 && p.p10 <= p.p25 && p.p25 <= p.p50);
            prop_assert!(p.p50 <= p.p75 && p.p75 <= p.p90 && p.p90 <= p.p95);
            prop_assert!(p.p5 < p.p95);
        }

        #[test]
        fn ci_width_scales_with_spread(point in 10.0f64..20.0, sd in 0.1f64..2.0) {
            let q = UncertaintyQuantifier::new(UncertaintyConfig::fast());
            let narrow = q.parametric(point, &VarianceComponents::new(sd, 0.0, 0.0, 0.0), 0.0);
            let wide = q.parametric(point, &VarianceComponents::new(2.0 * sd, 0.0, 0.0, 0.0), 0.0);
            prop_assert!(wide.ci90.width() > narrow.ci90.width());
        }
    }
}
