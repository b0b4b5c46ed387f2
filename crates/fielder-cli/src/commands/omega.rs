//! Omega command implementation.

use crate::cli::OmegaArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_domain::diet::total_duration_months;

/// Execute the omega command.
pub fn execute_omega(args: OmegaArgs, orchestrator: &Orchestrator, formatter: &Formatter) -> Result<String> {
    let age = args
        .age
        .unwrap_or_else(|| total_duration_months(&args.diet));
    let prediction = orchestrator.omega().predict_omega_ratio(
        orchestrator.repository(),
        &args.breed,
        &args.diet,
        age,
    )?;
    formatter.format_omega(&prediction)
}
