//! Weather module - externally supplied daily observations and forecasts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather, observed or forecast (°F)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    /// Calendar day
    pub date: NaiveDate,
    /// Daily maximum temperature
    pub high_temp: f64,
    /// Daily minimum temperature
    pub low_temp: f64,
    /// Present on forecast days: provider confidence in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_confidence: Option<f64>,
}

impl WeatherDay {
    /// An observed day
    pub fn observed(date: NaiveDate, high_temp: f64, low_temp: f64) -> Self {
        Self {
            date,
            high_temp,
            low_temp,
            forecast_confidence: None,
        }
    }

    /// A forecast day with provider confidence
    pub fn forecast(date: NaiveDate, high_temp: f64, low_temp: f64, confidence: f64) -> Self {
        Self {
            date,
            high_temp,
            low_temp,
            forecast_confidence: Some(confidence),
        }
    }

    /// Mean of high and low
    pub fn mean_temp(&self) -> f64 {
        (self.high_temp + self.low_temp) / 2.0
    }

    /// Whether this day is a forecast rather than an observation
    pub fn is_forecast(&self) -> bool {
        self.forecast_confidence.is_some()
    }
}
