//! Fielder Omega
//!
//! Predicts the omega-6:omega-3 ratio of an animal product from the animal's
//! feeding history.
//!
//! The finishing phase (last diet phase) dominates: it carries 75% of the
//! weight, earlier phases share the rest by duration. Long grain finishing
//! in confinement adds a per-month penalty; grain supplementation while the
//! animal stays on pasture does not. Breed never changes the ratio. It only
//! feeds confidence (through maturity) and a separately reported marbling
//! potential.
//!
//! All constants come from [`OmegaCalibration`], which is external
//! configuration rather than something fitted at runtime.

#![warn(missing_docs)]

pub mod breeds;
mod calibration;
mod error;
pub mod predictor;

pub use breeds::{builtin_breeds, maturity_factor};
pub use calibration::{DietBaselines, OmegaCalibration};
pub use error::OmegaError;
pub use predictor::{OmegaGrade, OmegaPrediction, OmegaPredictor, PhaseContribution};
