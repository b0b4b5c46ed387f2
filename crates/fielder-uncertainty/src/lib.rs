//! Fielder Uncertainty
//!
//! Turns a point estimate plus per-pillar variance components into a full
//! probability distribution.
//!
//! Three paths produce the same [`Distribution`] summary:
//!
//! - **Monte Carlo**: Box-Muller normals scaled by the total standard
//!   deviation, clamped at the metric's physical floor
//! - **Parametric**: closed-form normal percentiles, no sampling
//! - **Empirical**: statistics of a supplied historical sample
//!
//! Sampling is CPU-bound and never logged per draw. Seed the RNG through
//! [`UncertaintyConfig::seed`] for reproducible output.
//!
//! # Examples
//!
//! ```
//! use fielder_uncertainty::{UncertaintyConfig, UncertaintyQuantifier, VarianceComponents};
//!
//! let quantifier = UncertaintyQuantifier::new(UncertaintyConfig {
//!     seed: Some(42),
//!     ..UncertaintyConfig::default()
//! });
//! let components = VarianceComponents::new(0.8, 0.5, 0.4, 0.9);
//! let d = quantifier.quantify(12.0, &components, 0.0, None);
//! assert!(d.percentiles.p5 < d.percentiles.p50);
//! assert!(d.percentiles.p50 < d.percentiles.p95);
//! ```

#![warn(missing_docs)]

mod components;
mod config;
mod distribution;
mod error;
mod quantifier;

pub use components::{PillarShares, VarianceComponents};
pub use config::{Method, UncertaintyConfig};
pub use distribution::{Distribution, Percentiles};
pub use error::UncertaintyError;
pub use quantifier::{
    monte_carlo_with_rng, physical_floor, standard_normals, UncertaintyQuantifier,
};
