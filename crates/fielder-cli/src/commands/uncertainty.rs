//! Uncertainty command implementation.

use crate::cli::UncertaintyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_uncertainty::{physical_floor, Distribution, VarianceComponents};

/// Execute the uncertainty command.
pub fn execute_uncertainty(
    args: UncertaintyArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<String> {
    let distribution = quantify(&args, orchestrator)?;
    formatter.format_distribution(&distribution, args.category.primary_metric())
}

/// Pick the method from the arguments and quantify.
pub fn quantify(args: &UncertaintyArgs, orchestrator: &Orchestrator) -> Result<Distribution> {
    let quantifier = orchestrator.quantifier();
    if !args.empirical.is_empty() {
        return Ok(quantifier.empirical(&args.empirical)?);
    }
    if !args.point.is_finite() {
        return Err(CliError::InvalidInput(format!(
            "point estimate must be finite, got {}",
            args.point
        )));
    }

    let defaults = VarianceComponents::for_category(args.category);
    let components = VarianceComponents::new(
        args.heritage.unwrap_or(defaults.heritage),
        args.soil.unwrap_or(defaults.soil),
        args.agricultural.unwrap_or(defaults.agricultural),
        args.ripen.unwrap_or(defaults.ripen),
    );
    let floor = physical_floor(args.category.primary_metric());

    Ok(if args.parametric {
        quantifier.parametric(args.point, &components, floor)
    } else {
        quantifier.monte_carlo(args.point, &components, floor, args.samples)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fielder_domain::Category;
    use fielder_engine::EngineConfig;
    use fielder_uncertainty::{Method, UncertaintyError};

    fn orchestrator() -> Orchestrator {
        let mut config = EngineConfig::default();
        config.uncertainty.seed = Some(5);
        Orchestrator::with_builtin(config).unwrap()
    }

    fn args(point: f64) -> UncertaintyArgs {
        UncertaintyArgs {
            point,
            category: Category::Produce,
            heritage: None,
            soil: None,
            agricultural: None,
            ripen: None,
            samples: Some(3000),
            parametric: false,
            empirical: Vec::new(),
        }
    }

    #[test]
    fn test_monte_carlo_brackets_point() {
        let d = quantify(&args(12.0), &orchestrator()).unwrap();
        assert_eq!(d.method, Method::MonteCarlo);
        assert_eq!(d.n_samples, 3000);
        assert!(d.percentiles.p5 < 12.0 && 12.0 < d.percentiles.p95);
    }

    #[test]
    fn test_parametric_flag() {
        let a = UncertaintyArgs {
            parametric: true,
            heritage: Some(1.0),
            soil: Some(0.0),
            agricultural: Some(0.0),
            ripen: Some(0.0),
            ..args(10.0)
        };
        let d = quantify(&a, &orchestrator()).unwrap();
        assert_eq!(d.method, Method::Parametric);
        assert!((d.percentiles.p95 - 11.6449).abs() < 1e-3);
    }

    #[test]
    fn test_empirical_needs_two_values() {
        let a = UncertaintyArgs {
            empirical: vec![4.0],
            ..args(0.0)
        };
        let err = quantify(&a, &orchestrator()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Uncertainty(UncertaintyError::InsufficientSamples(1))
        ));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let err = quantify(&args(f64::NAN), &orchestrator()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
