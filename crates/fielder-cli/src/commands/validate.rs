//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_domain::{MetricKind, ValidationResult};
use fielder_validator::{AnomalyCheck, ConsistencyCheck, DataQuality, Measurement, ProfileOmegaValidator};
use serde::Serialize;

/// Everything the validator reports about one measurement.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// The measurement as validated
    pub measurement: Measurement,
    /// Physical and typical-range result
    pub validation: ValidationResult,
    /// Composite data-quality score
    pub data_quality: DataQuality,
    /// History-based anomaly check, when history was given
    pub anomaly: Option<AnomalyCheck>,
    /// Agreement with the claimed profile, when claims were given
    pub consistency: Option<ConsistencyCheck>,
}

/// Execute the validate command.
pub fn execute_validate(
    args: ValidateArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<String> {
    let report = validate(&args, orchestrator)?;
    formatter.format_validation(&report)
}

/// Build the measurement from the arguments and run every check.
pub fn validate(args: &ValidateArgs, orchestrator: &Orchestrator) -> Result<ValidationReport> {
    let mut measurement = Measurement::new(args.category, args.source);
    for (kind, value) in [
        (MetricKind::Brix, args.brix),
        (MetricKind::OmegaRatio, args.omega),
        (MetricKind::Gdd, args.gdd),
        (MetricKind::TreeAge, args.tree_age),
        (MetricKind::Ph, args.ph),
    ] {
        if let Some(v) = value {
            measurement = measurement.with(kind, v);
        }
    }
    if let Some(ts) = args.timestamp {
        measurement = measurement.at(ts);
    }

    let validator = orchestrator.validator();
    let validation = validator.validate_measurement(&measurement);
    let primary = measurement
        .value(measurement.primary_metric())
        .filter(|v| v.is_finite());

    let anomaly = primary.and_then(|v| validator.detect_from_history(v, &args.history));

    let consistency = match primary {
        Some(v) if !args.claims.is_empty() => {
            let classification = orchestrator.claims().classify_from(
                orchestrator.repository(),
                args.category,
                &args.claims,
            )?;
            let checker = ProfileOmegaValidator::from_config(validator.config());
            Some(checker.check_range(
                classification.metric,
                classification.expected_range,
                v,
                &classification.profile_id,
            ))
        }
        _ => None,
    };

    Ok(ValidationReport {
        data_quality: validator.data_quality(&measurement),
        measurement,
        validation,
        anomaly,
        consistency,
    })
}
