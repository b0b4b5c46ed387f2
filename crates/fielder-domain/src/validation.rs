//! Validation records
//!
//! Input rejection and consistency problems are reported as data, never as
//! Rust errors. A single call can carry several errors and warnings.

use serde::{Deserialize, Serialize};

/// Machine-readable reason a value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Finite value outside the physically possible range
    OutOfRange,
    /// Required field absent
    MissingRequired,
    /// Value is not a usable number (NaN, infinite)
    InvalidFormat,
}

impl ErrorCode {
    /// Wire form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::MissingRequired => "MISSING_REQUIRED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning severity, ordered `Info < Warning < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,
    /// Needs attention
    Warning,
    /// Strong contradiction
    Critical,
}

impl Severity {
    /// Get the severity as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Reason code
    pub code: ErrorCode,
    /// Field name, e.g. `brix`
    pub field: String,
    /// Human-readable explanation
    pub message: String,
    /// Clamped value for this field, for `OUT_OF_RANGE` errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_value: Option<f64>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.into(),
            message: message.into(),
            corrected_value: None,
        }
    }

    /// Attach the clamped value for this field
    pub fn with_correction(mut self, value: f64) -> Self {
        self.corrected_value = Some(value);
        self
    }
}

/// A non-fatal observation about a valid value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Short machine-readable tag, e.g. `BELOW_TYPICAL`
    pub code: String,
    /// Severity grade
    pub severity: Severity,
    /// Human-readable explanation
    pub message: String,
}

impl Warning {
    /// Create a new warning
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
        }
    }

    /// Informational warning
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, message)
    }
}

/// Outcome of validating one or more values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False when at least one error was recorded
    pub is_valid: bool,
    /// Clamp suggestion for the value this result was built for; in a
    /// merged result, the field validated first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_value: Option<f64>,
    /// Rejected fields
    pub errors: Vec<ValidationError>,
    /// Non-fatal observations
    pub warnings: Vec<Warning>,
}

impl ValidationResult {
    /// A result with no errors and no warnings
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            corrected_value: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an error; the result becomes invalid
    pub fn push_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Record a warning; validity is unchanged
    pub fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Fold another field's result into this one
    ///
    /// `corrected_value` keeps this result's own correction. Corrections of
    /// the merged field stay on its errors; see [`correction_for`](Self::correction_for).
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Clamped value suggested for `field`, if it was out of range
    pub fn correction_for(&self, field: &str) -> Option<f64> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .find_map(|e| e.corrected_value)
    }

    /// Highest warning severity, if any warning was recorded
    pub fn max_severity(&self) -> Option<Severity> {
        self.warnings.iter().map(|w| w.severity).max()
    }

    /// Whether any error carries the given code
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_error_invalidates() {
        let mut r = ValidationResult::valid();
        r.push_warning(Warning::info("NOTE", "fine"));
        assert!(r.is_valid);
        r.push_error(ValidationError::new(ErrorCode::OutOfRange, "brix", "too high"));
        assert!(!r.is_valid);
        assert!(r.has_error(ErrorCode::OutOfRange));
        assert!(!r.has_error(ErrorCode::InvalidFormat));
    }

    fn out_of_range(field: &str, corrected: f64) -> ValidationResult {
        let mut r = ValidationResult::valid();
        r.push_error(
            ValidationError::new(ErrorCode::OutOfRange, field, "out of range").with_correction(corrected),
        );
        r.corrected_value = Some(corrected);
        r
    }

    #[test]
    fn test_merge_keeps_own_correction() {
        let mut a = out_of_range("brix", 30.0);
        a.merge(out_of_range("ph", 14.0));
        assert_eq!(a.corrected_value, Some(30.0));
        assert_eq!(a.correction_for("brix"), Some(30.0));
        assert_eq!(a.correction_for("ph"), Some(14.0));
        assert_eq!(a.errors.len(), 2);
    }

    #[test]
    fn test_merge_does_not_adopt_other_correction() {
        let mut c = ValidationResult::valid();
        c.push_error(ValidationError::new(ErrorCode::MissingRequired, "brix", "brix is required"));
        c.merge(out_of_range("ph", 14.0));
        assert!(!c.is_valid);
        assert_eq!(c.corrected_value, None);
        assert_eq!(c.correction_for("ph"), Some(14.0));
        assert_eq!(c.correction_for("brix"), None);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_error_code_wire_form() {
        let json = serde_json::to_string(&ErrorCode::InvalidFormat).unwrap();
        assert_eq!(json, "\"INVALID_FORMAT\"");
        assert_eq!(ErrorCode::MissingRequired.to_string(), "MISSING_REQUIRED");
    }
}
