//! Fielder Validator
//!
//! Checks measured and predicted values before they are trusted:
//!
//! - hard physical ranges (rejects with a clamp suggestion)
//! - typical ranges (directional warnings only)
//! - z-score anomaly detection, explicit or over a history window
//! - a composite data-quality score for a measurement
//! - consistency between a measurement and the profile its claims imply
//!
//! Nothing here returns `Err` for bad input. Rejections are
//! [`fielder_domain::ValidationError`] records and every consistency problem
//! is a severity-graded [`fielder_domain::Warning`].
//!
//! # Examples
//!
//! ```
//! use fielder_domain::ErrorCode;
//! use fielder_validator::PhysicalConstraintValidator;
//!
//! let validator = PhysicalConstraintValidator::default();
//! let result = validator.enforce_brix(35.0);
//! assert!(!result.is_valid);
//! assert_eq!(result.corrected_value, Some(30.0));
//! assert!(result.has_error(ErrorCode::OutOfRange));
//! ```

#![warn(missing_docs)]

pub mod anomaly;
mod config;
mod consistency;
mod error;
mod measurement;
mod physical;
mod quality;

pub use anomaly::{AnomalyCheck, Direction};
pub use config::{DataQualityConfig, HardRanges, Preference, TypicalRange, TypicalRanges, ValidationConfig};
pub use consistency::{ConsistencyCheck, ProfileOmegaValidator};
pub use error::ValidatorError;
pub use measurement::{DataSource, Measurement};
pub use physical::PhysicalConstraintValidator;
pub use quality::{assess as assess_data_quality, DataQuality};
