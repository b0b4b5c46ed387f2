//! CLI command definitions and argument parsing.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fielder_domain::{Category, DietPhase, DietType};
use fielder_validator::DataSource;
use std::path::PathBuf;

/// Fielder - infer food quality from claims, weather and measurements.
#[derive(Debug, Parser)]
#[command(name = "fielder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FIELDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify marketing claims into a quality profile
    Classify(ClassifyArgs),

    /// Predict Brix from cultivar, rootstock, age and timing
    Brix(BrixArgs),

    /// Predict the omega-6:3 ratio from a diet history
    Omega(OmegaArgs),

    /// Validate a measurement against physical and typical ranges
    Validate(ValidateArgs),

    /// Quantify uncertainty around a point estimate
    Uncertainty(UncertaintyArgs),

    /// Run a full prediction from a JSON request
    Predict(PredictArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Product category (beef, eggs, poultry, pork, dairy, produce)
    #[arg(value_parser = parse_category)]
    pub category: Category,

    /// Claims as printed on the label
    pub claims: Vec<String>,
}

/// Arguments for the brix command.
#[derive(Debug, Parser)]
pub struct BrixArgs {
    /// Cultivar id; supplies base Brix and crop
    #[arg(long)]
    pub cultivar: Option<String>,

    /// Cultivar base Brix, overrides the cultivar record
    #[arg(long)]
    pub base: Option<f64>,

    /// Rootstock id
    #[arg(long)]
    pub rootstock: Option<String>,

    /// Rootstock modifier, overrides the rootstock record
    #[arg(long, allow_hyphen_values = true)]
    pub rootstock_modifier: Option<f64>,

    /// Tree age in years
    #[arg(long)]
    pub age: Option<f64>,

    /// Season-to-date GDD
    #[arg(long)]
    pub gdd: f64,

    /// Crop, when no cultivar is given; supplies peak GDD
    #[arg(long)]
    pub crop: Option<String>,

    /// Peak GDD, overrides the crop targets
    #[arg(long)]
    pub peak_gdd: Option<f64>,

    /// Timing half-width in GDD
    #[arg(long)]
    pub halfwidth: Option<f64>,

    /// Maximum timing penalty in Brix
    #[arg(long)]
    pub max_penalty: Option<f64>,
}

/// Arguments for the omega command.
#[derive(Debug, Parser)]
pub struct OmegaArgs {
    /// Breed id
    #[arg(long, default_value = "unknown")]
    pub breed: String,

    /// Diet phase as `type:months`, in order; the last is the finish
    #[arg(long = "diet", value_parser = parse_diet_phase)]
    pub diet: Vec<DietPhase>,

    /// Age at harvest in months; defaults to the total diet duration
    #[arg(long)]
    pub age: Option<f64>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Product category
    #[arg(value_parser = parse_category)]
    pub category: Category,

    /// Who took the measurement
    #[arg(long, value_parser = parse_source, default_value = "consumer")]
    pub source: DataSource,

    /// Brix reading
    #[arg(long)]
    pub brix: Option<f64>,

    /// Omega-6:3 ratio
    #[arg(long)]
    pub omega: Option<f64>,

    /// GDD at sampling
    #[arg(long)]
    pub gdd: Option<f64>,

    /// Tree age in years
    #[arg(long)]
    pub tree_age: Option<f64>,

    /// pH reading
    #[arg(long)]
    pub ph: Option<f64>,

    /// Sampling time, RFC 3339
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Earlier readings of the primary metric, comma separated
    #[arg(long, value_delimiter = ',')]
    pub history: Vec<f64>,

    /// Claims to check the primary metric against
    #[arg(long = "claim")]
    pub claims: Vec<String>,
}

/// Arguments for the uncertainty command.
#[derive(Debug, Parser)]
pub struct UncertaintyArgs {
    /// Point estimate
    pub point: f64,

    /// Category; selects default pillar variances and the physical floor
    #[arg(long, value_parser = parse_category, default_value = "produce")]
    pub category: Category,

    /// Heritage standard deviation
    #[arg(long)]
    pub heritage: Option<f64>,

    /// Soil standard deviation
    #[arg(long)]
    pub soil: Option<f64>,

    /// Agricultural standard deviation
    #[arg(long)]
    pub agricultural: Option<f64>,

    /// Ripen standard deviation
    #[arg(long)]
    pub ripen: Option<f64>,

    /// Monte Carlo draw count
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Use the closed-form normal percentiles
    #[arg(long)]
    pub parametric: bool,

    /// Summarize these observed values instead, comma separated
    #[arg(long, value_delimiter = ',')]
    pub empirical: Vec<f64>,
}

/// Arguments for the predict command.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// JSON request file
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Read the JSON request from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config path
    #[arg(long)]
    pub init: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

/// Parse a category name.
pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| format!("unknown category '{}'", s))
}

/// Parse a data source name.
pub fn parse_source(s: &str) -> Result<DataSource, String> {
    DataSource::parse(s).ok_or_else(|| format!("unknown source '{}'", s))
}

/// Parse an RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

/// Parse a `type:months` diet phase.
pub fn parse_diet_phase(s: &str) -> Result<DietPhase, String> {
    let (kind, months) = s
        .split_once(':')
        .ok_or_else(|| format!("expected type:months, got '{}'", s))?;
    let diet_type =
        DietType::parse(kind.trim()).ok_or_else(|| format!("unknown diet type '{}'", kind))?;
    let months: f64 = months
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}'", months))?;
    if months.is_nan() || months < 0.0 {
        return Err(format!("duration must be non-negative, got {}", months));
    }
    Ok(DietPhase::new(diet_type, months))
}
