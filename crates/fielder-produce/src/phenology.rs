//! Thermal-time accumulation
//!
//! Growing degree days (GDD) use the simple averaging method:
//! `max(0, (high + low) / 2 - base)`. For a fixed base temperature the
//! cumulative sum never decreases as days are appended.

use chrono::{Duration, NaiveDate};
use fielder_domain::WeatherDay;
use serde::{Deserialize, Serialize};

/// Default base temperature (°F), the citrus base
pub const DEFAULT_BASE_TEMP: f64 = 55.0;

/// Confidence of a projection that is already at its target
const REACHED_CONFIDENCE: f64 = 0.95;
/// Confidence of a projection driven by forecast days
const FORECAST_CONFIDENCE: f64 = 0.8;
/// Confidence of a projection driven by climatology
const CLIMATOLOGY_CONFIDENCE: f64 = 0.6;
/// Deviation (percent) beyond which a season counts as ahead or behind
const PACE_TOLERANCE_PCT: f64 = 10.0;

/// Thermal units accumulated on one day
///
/// ```
/// use fielder_produce::daily_gdd;
///
/// assert_eq!(daily_gdd(80.0, 60.0, 55.0), 15.0);
/// assert_eq!(daily_gdd(50.0, 40.0, 55.0), 0.0);
/// ```
pub fn daily_gdd(high: f64, low: f64, base_temp: f64) -> f64 {
    ((high + low) / 2.0 - base_temp).max(0.0)
}

/// Sum of daily GDD over a sequence of days (empty sequence gives 0)
pub fn cumulative_gdd(days: &[WeatherDay], base_temp: f64) -> f64 {
    days.iter()
        .map(|d| daily_gdd(d.high_temp, d.low_temp, base_temp))
        .sum()
}

/// Days until `target` is reached at `avg_daily` GDD per day
///
/// Returns `Some(0)` when the target is already reached and `None` when no
/// estimate is possible (non-positive daily rate).
pub fn days_to_target(current: f64, target: f64, avg_daily: f64) -> Option<u32> {
    let remaining = target - current;
    if remaining <= 0.0 {
        return Some(0);
    }
    if avg_daily <= 0.0 {
        return None;
    }
    Some((remaining / avg_daily).floor() as u32)
}

/// `from` shifted by `days`, `None` past the calendar's range
pub(crate) fn offset_date(from: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| from.checked_add_signed(d))
}

/// Running GDD total from a reference date such as bloom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GddAccumulation {
    /// Base temperature (°F)
    pub base_temp: f64,
    /// Cumulative GDD to date
    pub cumulative_gdd: f64,
    /// Number of days added
    pub days_counted: u32,
    /// Date of the most recently added day
    pub last_date: Option<NaiveDate>,
    /// GDD at which the crop is harvestable
    pub gdd_to_maturity: Option<f64>,
    /// GDD at peak quality
    pub gdd_to_peak: Option<f64>,
}

impl GddAccumulation {
    /// Start an empty accumulation
    pub fn new(base_temp: f64) -> Self {
        Self {
            base_temp,
            cumulative_gdd: 0.0,
            days_counted: 0,
            last_date: None,
            gdd_to_maturity: None,
            gdd_to_peak: None,
        }
    }

    /// Attach maturity and peak targets
    pub fn with_targets(mut self, gdd_to_maturity: f64, gdd_to_peak: f64) -> Self {
        self.gdd_to_maturity = Some(gdd_to_maturity);
        self.gdd_to_peak = Some(gdd_to_peak);
        self
    }

    /// Accumulate one day and return that day's GDD
    pub fn add_day(&mut self, day: &WeatherDay) -> f64 {
        let gdd = daily_gdd(day.high_temp, day.low_temp, self.base_temp);
        self.cumulative_gdd += gdd;
        self.days_counted += 1;
        self.last_date = Some(day.date);
        gdd
    }

    /// Accumulate a sequence of days
    pub fn extend<'a>(&mut self, days: impl IntoIterator<Item = &'a WeatherDay>) {
        for day in days {
            self.add_day(day);
        }
    }

    /// Mean GDD per counted day, zero before any day is added
    pub fn avg_daily_gdd(&self) -> f64 {
        if self.days_counted == 0 {
            0.0
        } else {
            self.cumulative_gdd / self.days_counted as f64
        }
    }

    /// Percentage progress toward maturity, capped at 100
    pub fn pct_to_maturity(&self) -> Option<f64> {
        self.gdd_to_maturity.map(|t| pct_of(self.cumulative_gdd, t))
    }

    /// Percentage progress toward peak, capped at 100
    pub fn pct_to_peak(&self) -> Option<f64> {
        self.gdd_to_peak.map(|t| pct_of(self.cumulative_gdd, t))
    }

    /// Days until `target` at `avg_daily` GDD per day
    pub fn days_to_target(&self, target: f64, avg_daily: f64) -> Option<u32> {
        days_to_target(self.cumulative_gdd, target, avg_daily)
    }
}

fn pct_of(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (value / target * 100.0).min(100.0)
}

/// Projected arrival at a GDD target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GddProjection {
    /// Days from `from` until the target, `None` when the rate is not positive
    pub days_to_target: Option<u32>,
    /// Calendar date of arrival
    pub projected_date: Option<NaiveDate>,
    /// GDD per day used for the projection
    pub avg_daily_gdd: f64,
    /// Whether forecast days (rather than climatology) drove the rate
    pub forecast_based: bool,
    /// Confidence in the projected date
    pub confidence: f64,
}

/// Project when `target` GDD will be reached
///
/// Forecast days set the daily rate when present; otherwise
/// `fallback_avg_daily` (regional climatology) is used at lower confidence.
/// Confidence shrinks for projections beyond two weeks and again beyond a
/// month.
pub fn project_to_target(
    current: f64,
    target: f64,
    forecast: &[WeatherDay],
    base_temp: f64,
    fallback_avg_daily: f64,
    from: NaiveDate,
) -> GddProjection {
    if target - current <= 0.0 {
        return GddProjection {
            days_to_target: Some(0),
            projected_date: Some(from),
            avg_daily_gdd: fallback_avg_daily,
            forecast_based: !forecast.is_empty(),
            confidence: REACHED_CONFIDENCE,
        };
    }

    let (avg_daily, mut confidence, forecast_based) = if forecast.is_empty() {
        (fallback_avg_daily, CLIMATOLOGY_CONFIDENCE, false)
    } else {
        let avg = cumulative_gdd(forecast, base_temp) / forecast.len() as f64;
        let provider = forecast
            .iter()
            .map(|d| d.forecast_confidence.unwrap_or(1.0).clamp(0.0, 1.0))
            .sum::<f64>()
            / forecast.len() as f64;
        (avg, FORECAST_CONFIDENCE.min(provider), true)
    };

    let days = days_to_target(current, target, avg_daily);
    match days {
        Some(d) => {
            if d > 14 {
                confidence *= 0.9;
            }
            if d > 30 {
                confidence *= 0.8;
            }
        }
        None => confidence *= 0.5,
    }

    GddProjection {
        days_to_target: days,
        projected_date: days.and_then(|d| offset_date(from, i64::from(d))),
        avg_daily_gdd: avg_daily,
        forecast_based,
        confidence: (confidence * 100.0).round() / 100.0,
    }
}

/// Pace of the season relative to climatology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPace {
    /// More than 10% above expected accumulation
    Ahead,
    /// More than 10% below expected accumulation
    Behind,
    /// Within 10% of expected accumulation
    Normal,
}

/// Current season against the expected accumulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonComparison {
    /// Ahead, behind or normal
    pub pace: SeasonPace,
    /// GDD expected by now
    pub expected_gdd: f64,
    /// `current - expected`
    pub deviation_gdd: f64,
    /// Deviation as a percentage of expected
    pub deviation_pct: f64,
    /// Human-readable summary
    pub message: String,
}

/// Compare the season to the expected accumulation over `days_elapsed`
pub fn compare_to_normal(current_gdd: f64, days_elapsed: u32, normal_avg_daily: f64) -> SeasonComparison {
    let expected = f64::from(days_elapsed) * normal_avg_daily;
    let deviation = current_gdd - expected;
    let pct = if expected > 0.0 {
        deviation / expected * 100.0
    } else {
        0.0
    };

    let (pace, message) = if pct > PACE_TOLERANCE_PCT {
        (SeasonPace::Ahead, format!("Season running {:.0}% ahead of normal", pct.abs()))
    } else if pct < -PACE_TOLERANCE_PCT {
        (SeasonPace::Behind, format!("Season running {:.0}% behind normal", pct.abs()))
    } else {
        (SeasonPace::Normal, "Season tracking close to normal".to_string())
    };

    SeasonComparison {
        pace,
        expected_gdd: expected,
        deviation_gdd: deviation,
        deviation_pct: (pct * 10.0).round() / 10.0,
        message,
    }
}
