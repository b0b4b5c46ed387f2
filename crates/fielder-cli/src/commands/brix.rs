//! Brix command implementation.

use crate::cli::BrixArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_domain::traits::{PinnableRepository, ReferenceRepository};
use fielder_domain::GddTargets;
use fielder_produce::{crop_targets, BrixPrediction, BrixRequest};

/// Execute the brix command.
pub fn execute_brix(args: BrixArgs, orchestrator: &Orchestrator, formatter: &Formatter) -> Result<String> {
    let prediction = predict(&args, orchestrator)?;
    formatter.format_brix(&prediction, orchestrator.config().brix.commodity_brix)
}

/// Resolve reference data for the arguments and predict.
///
/// Explicit numeric flags win over reference records. Anything left
/// unresolved falls back to defaults with lowered confidence.
pub fn predict(args: &BrixArgs, orchestrator: &Orchestrator) -> Result<BrixPrediction> {
    let repo = orchestrator.repository().pin()?;
    let config = &orchestrator.config().brix;
    let mut fallbacks = Vec::new();

    let cultivar = match args.cultivar.as_deref() {
        Some(id) => repo.cultivar(id)?,
        None => None,
    };
    let cultivar_base = match (args.base, &cultivar) {
        (Some(base), _) => base,
        (None, Some(c)) => c.base_brix,
        (None, None) => {
            fallbacks.push(format!(
                "Cultivar base unknown; commodity {:.1} °Bx assumed",
                config.commodity_brix
            ));
            config.commodity_brix
        }
    };

    let rootstock_modifier = match (args.rootstock_modifier, args.rootstock.as_deref()) {
        (Some(m), _) => m,
        (None, Some(id)) => match repo.rootstock(id)? {
            Some(r) => r.brix_modifier,
            None => {
                fallbacks.push(format!("Rootstock '{}' not found; no modifier applied", id));
                0.0
            }
        },
        (None, None) => 0.0,
    };

    let crop = cultivar
        .as_ref()
        .map(|c| c.crop.clone())
        .or_else(|| args.crop.clone());
    let peak_gdd = match (args.peak_gdd, crop.as_deref()) {
        (Some(peak), _) => peak,
        (None, Some(crop)) => match repo.crop_targets(crop)? {
            Some(t) => t.gdd_to_peak,
            None => {
                let resolved = crop_targets(crop);
                if resolved.is_default {
                    fallbacks.push(format!("No GDD targets for '{}'; defaults used", crop));
                }
                resolved.targets.gdd_to_peak
            }
        },
        (None, None) => {
            fallbacks.push("Crop unknown; default peak GDD used".to_string());
            GddTargets::DEFAULT.gdd_to_peak
        }
    };

    let mut prediction = orchestrator.brix().predict(&BrixRequest {
        cultivar_base,
        rootstock_modifier,
        tree_age_years: args.age,
        current_gdd: args.gdd,
        peak_gdd,
        halfwidth: args.halfwidth,
        max_penalty: args.max_penalty,
    });
    for note in fallbacks {
        prediction.degrade(config.default_targets_factor, note);
    }
    Ok(prediction)
}
