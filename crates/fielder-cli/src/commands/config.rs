//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the config command.
///
/// Prints the effective configuration, or with `--init` writes it to the
/// config path when no file exists there yet.
pub fn execute_config(args: ConfigArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    if args.init {
        let path = match &config.source {
            Some(p) => p.clone(),
            None => Config::default_path()?,
        };
        if path.exists() {
            return Err(CliError::InvalidInput(format!(
                "{} already exists",
                path.display()
            )));
        }
        config.save(&path)?;
        return Ok(formatter.success(&format!("Wrote {}", path.display())));
    }

    match formatter.format() {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "settings": config.settings,
            "engine": config.engine,
        }))?),
        OutputFormat::Table => config.to_toml(),
    }
}
