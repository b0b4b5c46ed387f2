//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it.

pub mod brix;
pub mod classify;
pub mod config;
pub mod omega;
pub mod predict;
pub mod uncertainty;
pub mod validate;

pub use self::brix::execute_brix;
pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::omega::execute_omega;
pub use self::predict::execute_predict;
pub use self::uncertainty::execute_uncertainty;
pub use self::validate::execute_validate;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::Orchestrator;
use fielder_store::InMemoryStore;

/// Build the orchestrator the configuration describes, loading the
/// reference overlay when one is set.
pub fn orchestrator(config: &Config) -> Result<Orchestrator> {
    let store = match &config.settings.reference_file {
        Some(path) => InMemoryStore::from_file(path)?,
        None => InMemoryStore::new(),
    };
    Ok(Orchestrator::new(store, config.engine.clone())?)
}

/// Run one command and return its rendered output.
///
/// Only commands that predict or classify load reference data.
pub async fn execute(command: Command, config: &Config, formatter: &Formatter) -> Result<String> {
    match command {
        Command::Config(args) => execute_config(args, config, formatter),
        Command::Classify(args) => execute_classify(args, &orchestrator(config)?, formatter),
        Command::Brix(args) => execute_brix(args, &orchestrator(config)?, formatter),
        Command::Omega(args) => execute_omega(args, &orchestrator(config)?, formatter),
        Command::Validate(args) => execute_validate(args, &orchestrator(config)?, formatter),
        Command::Uncertainty(args) => execute_uncertainty(args, &orchestrator(config)?, formatter),
        Command::Predict(args) => execute_predict(args, &orchestrator(config)?, formatter).await,
    }
}
