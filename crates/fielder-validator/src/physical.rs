//! Physical-constraint validation

use fielder_domain::{ErrorCode, MetricKind, Severity, ValidationError, ValidationResult, Warning};

use crate::anomaly::{self, AnomalyCheck};
use crate::config::Preference;
use crate::measurement::Measurement;
use crate::quality::{self, DataQuality};
use crate::{ValidationConfig, ValidatorError};

/// Enforces hard and typical ranges and detects anomalies
pub struct PhysicalConstraintValidator {
    config: ValidationConfig,
}

impl PhysicalConstraintValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator, validating the configuration first
    pub fn try_new(config: ValidationConfig) -> Result<Self, ValidatorError> {
        config.validate().map_err(ValidatorError::Config)?;
        Ok(Self::new(config))
    }

    /// Get the validator configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one field
    ///
    /// - missing ⇒ `MISSING_REQUIRED`
    /// - NaN or infinite ⇒ `INVALID_FORMAT`, no correction
    /// - outside the hard range ⇒ `OUT_OF_RANGE` with the clamped value as
    ///   correction
    /// - outside the typical range ⇒ valid with a directional warning
    pub fn enforce(&self, kind: MetricKind, value: Option<f64>) -> ValidationResult {
        let field = kind.as_str();
        let mut result = ValidationResult::valid();

        let Some(value) = value else {
            result.push_error(ValidationError::new(
                ErrorCode::MissingRequired,
                field,
                format!("{} is required", field),
            ));
            return result;
        };

        if !value.is_finite() {
            tracing::debug!(field, "Rejected non-numeric value");
            result.push_error(ValidationError::new(
                ErrorCode::InvalidFormat,
                field,
                format!("{} must be a finite number", field),
            ));
            return result;
        }

        let hard = self.config.hard_ranges.get(kind);
        if !hard.contains(value) {
            let corrected = hard.clamp(value);
            tracing::debug!(field, value, corrected, "Value outside physical range");
            result.push_error(
                ValidationError::new(
                    ErrorCode::OutOfRange,
                    field,
                    format!(
                        "{} {} is outside the physical range [{}, {}]",
                        field, value, hard.low, hard.high
                    ),
                )
                .with_correction(corrected),
            );
            result.corrected_value = Some(corrected);
            return result;
        }

        if let Some(warning) = self.check_typical(kind, value) {
            result.push_warning(warning);
        }
        result
    }

    /// Validate one present value
    pub fn enforce_value(&self, kind: MetricKind, value: f64) -> ValidationResult {
        self.enforce(kind, Some(value))
    }

    /// Validate a Brix reading
    pub fn enforce_brix(&self, value: f64) -> ValidationResult {
        self.enforce_value(MetricKind::Brix, value)
    }

    /// Validate an omega-6:3 ratio
    pub fn enforce_omega_ratio(&self, value: f64) -> ValidationResult {
        self.enforce_value(MetricKind::OmegaRatio, value)
    }

    /// Directional warning for a physically valid value outside its
    /// typical range
    pub fn check_typical(&self, kind: MetricKind, value: f64) -> Option<Warning> {
        let typical = self.config.typical_ranges.get(kind);
        let field = kind.as_str();

        let (below, above) = (value < typical.low, value > typical.high);
        if !below && !above {
            return None;
        }

        let exceptional = matches!(
            (typical.preference, below),
            (Preference::LowerIsBetter, true) | (Preference::HigherIsBetter, false)
        );
        if exceptional {
            return Some(Warning::info(
                "EXCEPTIONAL",
                format!("{} {} is exceptional; verify the reading", field, value),
            ));
        }

        Some(if below {
            Warning::new(
                "BELOW_TYPICAL",
                Severity::Warning,
                format!("{} {} is below typical ({}-{})", field, value, typical.low, typical.high),
            )
        } else {
            Warning::new(
                "ABOVE_TYPICAL",
                Severity::Warning,
                format!("{} {} is above typical ({}-{})", field, value, typical.low, typical.high),
            )
        })
    }

    /// Validate every field of a measurement
    ///
    /// The category's primary metric is required; other fields are checked
    /// only when present. Errors from all fields are aggregated.
    /// `corrected_value` is the primary metric's clamp; secondary fields
    /// carry theirs on their own errors.
    pub fn validate_measurement(&self, measurement: &Measurement) -> ValidationResult {
        let primary = measurement.primary_metric();
        let mut result = self.enforce(primary, measurement.value(primary));

        for kind in MetricKind::ALL {
            if kind == primary {
                continue;
            }
            if let Some(value) = measurement.value(kind) {
                result.merge(self.enforce_value(kind, value));
            }
        }

        if !result.is_valid {
            tracing::info!(
                category = %measurement.category,
                errors = result.errors.len(),
                "Measurement rejected"
            );
        }
        result
    }

    /// Z-score check against an explicit mean and standard deviation
    pub fn detect_anomaly(&self, value: f64, mean: f64, std_dev: f64) -> AnomalyCheck {
        anomaly::detect_anomaly(value, mean, std_dev, self.config.z_threshold)
    }

    /// Z-score check against a history window; `None` when the history is
    /// too short
    pub fn detect_from_history(&self, value: f64, history: &[f64]) -> Option<AnomalyCheck> {
        anomaly::detect_from_history(
            value,
            history,
            self.config.z_threshold,
            self.config.min_history_samples,
        )
    }

    /// Composite data-quality score of a measurement
    pub fn data_quality(&self, measurement: &Measurement) -> DataQuality {
        quality::assess(measurement, &self.config.data_quality)
    }
}

impl Default for PhysicalConstraintValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn corrected_value_is_itself_valid(kind_idx in 0usize..5, value in -1.0e5f64..1.0e5) {
            let v = PhysicalConstraintValidator::default();
            let kind = MetricKind::ALL[kind_idx];
            let r = v.enforce_value(kind, value);
            if let Some(corrected) = r.corrected_value {
                prop_assert!(v.enforce_value(kind, corrected).is_valid);
            } else {
                prop_assert!(r.is_valid);
            }
        }
    }
}
