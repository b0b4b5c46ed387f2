//! Fielder Claims
//!
//! Classifies a product's marketing claims into a quality profile of its
//! category. Each profile carries an expected metric range, a quality tier
//! and a confinement flag.
//!
//! Two engines exist:
//!
//! - [`BeefPrecedenceEngine`] walks a fixed short-circuit tree. Beef claims
//!   interact (a breed claim means something different next to "no
//!   feedlot"), so ordering is explicit.
//! - [`WeightedScorer`] handles every other category: required claims gate
//!   a profile, optional claims add score, excluded claims disqualify.
//!
//! [`ClaimInferenceEngine`] picks the engine by category. Claims are
//! normalized first (lowercase, punctuation folded to spaces) so "Grass-Fed"
//! and "grass fed" match the same rules.

#![warn(missing_docs)]

pub mod beef;
mod catalog;
mod classification;
mod config;
mod engine;
mod error;
mod normalize;
pub mod scorer;

pub use beef::{BeefPrecedenceEngine, BeefProfile};
pub use catalog::{builtin_profiles, fallback_profile};
pub use classification::{Classification, Strategy};
pub use config::{BeefConfidence, ClaimsConfig};
pub use engine::ClaimInferenceEngine;
pub use error::ClaimsError;
pub use normalize::{contains_phrase, normalize_claim, normalize_claims};
pub use scorer::{ProfileScore, WeightedScorer};
