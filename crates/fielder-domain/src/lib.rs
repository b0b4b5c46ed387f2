//! Fielder Domain Layer
//!
//! Shared value types, reference-record types and trait interfaces for the
//! quality inference and prediction engine. Every other crate in the
//! workspace depends on this one; it depends on nothing but serialization
//! and identifier primitives.
//!
//! ## Key Concepts
//!
//! - **Category**: the product family a prediction is about (beef, eggs,
//!   poultry, pork, dairy, produce)
//! - **Profile**: immutable reference record mapping claims to an expected
//!   metric range and a quality tier
//! - **Diet phase**: one segment of an animal's feeding history
//! - **Weather day**: daily high/low used for thermal-time accumulation
//! - **Validation result**: typed error and warning records, never panics
//!
//! ## Architecture
//!
//! - Pure data and pure functions only
//! - Reference data is read through the [`traits::ReferenceRepository`]
//!   trait; implementations live in `fielder-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod confidence;
pub mod diet;
pub mod id;
pub mod metric;
pub mod profile;
pub mod reference;
pub mod tier;
pub mod traits;
pub mod validation;
pub mod weather;

// Re-exports for convenience
pub use category::Category;
pub use confidence::{ConfidenceInterval, ConfidenceLevel};
pub use diet::{DietPhase, DietType, FeedComposition};
pub use id::PredictionId;
pub use metric::{MetricKind, MetricRange, PrimaryMetric};
pub use profile::Profile;
pub use reference::{
    BreedRecord, CultivarRecord, GddTargets, MarblingPotential, RegionRecord, RootstockRecord,
};
pub use tier::QualityTier;
pub use validation::{ErrorCode, Severity, ValidationError, ValidationResult, Warning};
pub use weather::WeatherDay;
