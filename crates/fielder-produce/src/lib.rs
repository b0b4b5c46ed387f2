//! Fielder Produce
//!
//! Thermal-time phenology and Brix prediction for fruit crops.
//!
//! This crate provides:
//! - Growing-degree-day accumulation from daily weather ([`phenology`])
//! - Forecast projection to a GDD target and season-vs-normal comparison
//! - Crop GDD targets with a documented default for unknown crops ([`targets`])
//! - Logistic sugar and exponential acid curves per crop family ([`curves`])
//! - The six-state harvest-status machine and dated harvest windows ([`status`])
//! - The Brix point estimate: cultivar + rootstock + age + timing ([`brix`])
//! - Post-harvest freshness decay ([`freshness`])
//!
//! # Examples
//!
//! ```
//! use fielder_produce::{BrixConfig, BrixPredictor, BrixRequest};
//!
//! let predictor = BrixPredictor::new(BrixConfig::default());
//! let prediction = predictor.predict(&BrixRequest {
//!     cultivar_base: 12.0,
//!     rootstock_modifier: 0.6,
//!     tree_age_years: Some(12.0),
//!     current_gdd: 6100.0,
//!     peak_gdd: 6100.0,
//!     halfwidth: None,
//!     max_penalty: None,
//! });
//! assert!((prediction.predicted_brix - 12.6).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod brix;
mod config;
pub mod curves;
mod error;
pub mod freshness;
pub mod phenology;
pub mod status;
pub mod targets;

pub use brix::{
    age_modifier, tier_for_brix, timing_modifier, BrixPrediction, BrixPredictor, BrixRequest,
};
pub use config::BrixConfig;
pub use curves::{
    acid_decay, estimate_sugar_acid, logistic_ssc, CropFamily, SugarAcidEstimate, SugarAcidParams,
    SugarCurve,
};
pub use error::ProduceError;
pub use freshness::{freshness_multiplier, freshness_window_days};
pub use phenology::{
    compare_to_normal, cumulative_gdd, daily_gdd, days_to_target, project_to_target,
    GddAccumulation, GddProjection, SeasonComparison, SeasonPace,
};
pub use status::{harvest_window, HarvestStatus, HarvestWindow};
pub use targets::{builtin_crop_targets, crop_key, crop_targets, ResolvedTargets};
