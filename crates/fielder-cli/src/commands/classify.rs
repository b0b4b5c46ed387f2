//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::Orchestrator;

/// Execute the classify command.
pub fn execute_classify(
    args: ClassifyArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<String> {
    let classification = orchestrator.claims().classify_from(
        orchestrator.repository(),
        args.category,
        &args.claims,
    )?;
    formatter.format_classification(&classification)
}
