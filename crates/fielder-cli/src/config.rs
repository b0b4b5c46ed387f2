//! Configuration management for the CLI.
//!
//! One TOML file holds the CLI's own `[settings]` table next to the engine
//! sections (`[brix]`, `[omega]`, `[claims]`, `[validation]`,
//! `[uncertainty]`). Each view ignores the other's tables.

use crate::error::{CliError, Result};
use fielder_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// CLI settings
    pub settings: Settings,

    /// Engine configuration
    pub engine: EngineConfig,

    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Reference-data overlay file for the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_file: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: Settings,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".fielder").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path falls back to defaults
    /// when the file is missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_path()?;
                if !p.exists() {
                    tracing::debug!(path = %p.display(), "No config file, using defaults");
                    return Ok(Self::default());
                }
                p
            }
        };

        let contents = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&contents)?;
        config.source = Some(path);
        Ok(config)
    }

    /// Parse both views from one TOML document and validate the engine part.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(contents)?;
        let engine = EngineConfig::from_toml(contents).map_err(CliError::Config)?;
        engine.validate().map_err(CliError::Config)?;
        Ok(Self {
            settings: file.settings,
            engine,
            source: None,
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        let settings = toml::to_string_pretty(&SettingsFile {
            settings: self.settings.clone(),
        })
        .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        let engine = self.engine.to_toml().map_err(CliError::Config)?;
        Ok(format!("{}\n{}", settings, engine))
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            reference_file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
