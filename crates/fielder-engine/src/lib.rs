//! Fielder Engine
//!
//! Ties the claim engine, the category predictors, the validator and the
//! uncertainty quantifier into one call. A [`PredictionRequest`] goes in; a
//! [`PredictionResult`] envelope comes out with the point estimate, its
//! distribution, a per-pillar breakdown and every warning raised on the way.
//!
//! # Examples
//!
//! ```
//! use fielder_domain::{Category, MetricKind};
//! use fielder_engine::{EngineConfig, PredictionOrchestrator, PredictionRequest};
//!
//! let mut config = EngineConfig::default();
//! config.uncertainty.seed = Some(7);
//! let orchestrator = PredictionOrchestrator::with_builtin(config).unwrap();
//!
//! let request = PredictionRequest::new(Category::Beef).with_claims(["100% grass-fed"]);
//! let result = orchestrator.predict(&request).unwrap();
//!
//! assert_eq!(result.primary_metric.kind, MetricKind::OmegaRatio);
//! assert_eq!(result.classification.profile_id, "A");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod orchestrator;
mod request;
mod result;

pub use config::EngineConfig;
pub use error::EngineError;
pub use orchestrator::PredictionOrchestrator;
pub use request::{AnimalInput, MeasuredValue, PredictionRequest, ProduceInput};
pub use result::{
    MeasurementReport, Pillar, PillarBreakdown, PredictionResult, ProduceDetail,
};
