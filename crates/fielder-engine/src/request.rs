//! Prediction requests

use chrono::{DateTime, NaiveDate, Utc};
use fielder_domain::{Category, DietPhase, WeatherDay};
use fielder_validator::DataSource;
use serde::{Deserialize, Serialize};

/// Produce-side inputs
///
/// Every field is optional. Missing data falls back to documented defaults
/// with lowered confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProduceInput {
    /// Cultivar id in the reference store
    pub cultivar_id: Option<String>,
    /// Crop name, used when the cultivar is unknown
    pub crop: Option<String>,
    /// Rootstock id in the reference store
    pub rootstock_id: Option<String>,
    /// Growing region id, supplies the climatological daily GDD
    pub region_id: Option<String>,
    /// Tree age in years
    pub tree_age_years: Option<f64>,
    /// Cultivar base Brix when no cultivar record is available
    pub cultivar_base_brix: Option<f64>,
    /// Season-to-date GDD; overrides the sum over `weather`
    pub current_gdd: Option<f64>,
    /// Observed weather since bloom
    pub weather: Vec<WeatherDay>,
    /// Forecast weather, used to project dates
    pub forecast: Vec<WeatherDay>,
    /// Date the prediction is made for; enables dated projections
    pub as_of: Option<NaiveDate>,
}

/// Animal-side inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimalInput {
    /// Breed id in the reference store
    pub breed_id: Option<String>,
    /// Ordered feeding history; the last phase is the finishing phase
    pub diet: Vec<DietPhase>,
    /// Age at harvest; defaults to the total diet duration
    pub age_at_harvest_months: Option<f64>,
}

/// A direct measurement of the category's primary metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredValue {
    /// Measured Brix or omega ratio
    pub value: f64,
    /// Who took the measurement
    #[serde(default = "default_source")]
    pub source: DataSource,
    /// When the measurement was taken
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Earlier readings of the same metric for anomaly detection
    #[serde(default)]
    pub history: Vec<f64>,
}

fn default_source() -> DataSource {
    DataSource::Consumer
}

/// Everything the orchestrator needs for one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Product category; selects the predictor
    pub category: Category,
    /// Free-text marketing claims
    #[serde(default)]
    pub claims: Vec<String>,
    /// Produce inputs, ignored for animal categories
    #[serde(default)]
    pub produce: Option<ProduceInput>,
    /// Animal inputs, ignored for produce
    #[serde(default)]
    pub animal: Option<AnimalInput>,
    /// Optional measurement to cross-check against the claims
    #[serde(default)]
    pub measurement: Option<MeasuredValue>,
    /// Monte Carlo draw count override
    #[serde(default)]
    pub n_samples: Option<usize>,
}

impl PredictionRequest {
    /// Start a request for a category with no inputs
    pub fn new(category: Category) -> Self {
        Self {
            category,
            claims: Vec::new(),
            produce: None,
            animal: None,
            measurement: None,
            n_samples: None,
        }
    }

    /// Set the claims
    pub fn with_claims<S: Into<String>>(mut self, claims: impl IntoIterator<Item = S>) -> Self {
        self.claims = claims.into_iter().map(Into::into).collect();
        self
    }

    /// Set the produce inputs
    pub fn with_produce(mut self, produce: ProduceInput) -> Self {
        self.produce = Some(produce);
        self
    }

    /// Set the animal inputs
    pub fn with_animal(mut self, animal: AnimalInput) -> Self {
        self.animal = Some(animal);
        self
    }

    /// Attach a measurement
    pub fn with_measurement(mut self, value: f64, source: DataSource) -> Self {
        self.measurement = Some(MeasuredValue {
            value,
            source,
            timestamp: None,
            history: Vec::new(),
        });
        self
    }

    /// Attach earlier readings to the measurement
    ///
    /// Has no effect without a measurement.
    pub fn with_history(mut self, history: Vec<f64>) -> Self {
        if let Some(m) = self.measurement.as_mut() {
            m.history = history;
        }
        self
    }

    /// Parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse request JSON: {}", e))
    }
}
