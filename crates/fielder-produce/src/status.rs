//! Harvest status and harvest windows
//!
//! Status is a deterministic function of cumulative GDD against a crop's
//! targets. With maturity `M`, peak `P` and window `W`:
//!
//! | status         | condition                        |
//! |----------------|----------------------------------|
//! | `pre_season`   | `gdd < 0.7 M`                    |
//! | `approaching`  | `gdd < M`                        |
//! | `in_window`    | `gdd < P - W/4`                  |
//! | `at_peak`      | `gdd <= P + W/4` (middle half)   |
//! | `past_peak`    | `gdd <= P + W`                   |
//! | `season_ended` | otherwise                        |

use chrono::NaiveDate;
use fielder_domain::GddTargets;
use serde::{Deserialize, Serialize};

use crate::phenology::{days_to_target, offset_date};

/// Fraction of maturity GDD before which a crop is off-season
const PRE_SEASON_FRACTION: f64 = 0.7;

/// Position of a crop within its season
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestStatus {
    /// Well before maturity
    PreSeason,
    /// Nearing maturity
    Approaching,
    /// Harvestable, quality still rising
    InWindow,
    /// In the middle half of the window around peak
    AtPeak,
    /// Harvestable, quality declining
    PastPeak,
    /// Window closed
    SeasonEnded,
}

impl HarvestStatus {
    /// Classify cumulative GDD against crop targets
    pub fn classify(gdd: f64, targets: &GddTargets) -> Self {
        let quarter = targets.gdd_window / 4.0;
        if gdd < targets.gdd_to_maturity * PRE_SEASON_FRACTION {
            HarvestStatus::PreSeason
        } else if gdd < targets.gdd_to_maturity {
            HarvestStatus::Approaching
        } else if gdd < targets.gdd_to_peak - quarter {
            HarvestStatus::InWindow
        } else if gdd <= targets.gdd_to_peak + quarter {
            HarvestStatus::AtPeak
        } else if gdd <= targets.gdd_to_peak + targets.gdd_window {
            HarvestStatus::PastPeak
        } else {
            HarvestStatus::SeasonEnded
        }
    }

    /// Get the status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HarvestStatus::PreSeason => "pre_season",
            HarvestStatus::Approaching => "approaching",
            HarvestStatus::InWindow => "in_window",
            HarvestStatus::AtPeak => "at_peak",
            HarvestStatus::PastPeak => "past_peak",
            HarvestStatus::SeasonEnded => "season_ended",
        }
    }

    /// Whether fruit can be picked in this state
    pub fn is_harvestable(&self) -> bool {
        matches!(
            self,
            HarvestStatus::InWindow | HarvestStatus::AtPeak | HarvestStatus::PastPeak
        )
    }
}

impl std::fmt::Display for HarvestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dated harvest window projected from the current accumulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestWindow {
    /// First harvestable day
    pub window_start: NaiveDate,
    /// Last harvestable day
    pub window_end: NaiveDate,
    /// First day of peak quality
    pub peak_start: NaiveDate,
    /// Last day of peak quality
    pub peak_end: NaiveDate,
    /// Days from today to maturity
    pub days_to_maturity: u32,
    /// Days from today to the peak center
    pub days_to_peak: u32,
}

/// Project a dated window from `today`
///
/// Peak quality spans `peak_half_window_days` either side of the projected
/// peak date and the window closes `post_peak_days` after that. Returns
/// `None` when `avg_daily_gdd` is not positive or the projected dates fall
/// outside the calendar.
pub fn harvest_window(
    current_gdd: f64,
    targets: &GddTargets,
    avg_daily_gdd: f64,
    today: NaiveDate,
    peak_half_window_days: i64,
    post_peak_days: i64,
) -> Option<HarvestWindow> {
    let days_to_maturity = days_to_target(current_gdd, targets.gdd_to_maturity, avg_daily_gdd)?;
    let days_to_peak = days_to_target(current_gdd, targets.gdd_to_peak, avg_daily_gdd)?;

    let peak_center = offset_date(today, i64::from(days_to_peak))?;
    let peak_start = offset_date(peak_center, -peak_half_window_days)?;
    let peak_end = offset_date(peak_center, peak_half_window_days)?;

    Some(HarvestWindow {
        window_start: offset_date(today, i64::from(days_to_maturity))?,
        window_end: offset_date(peak_end, post_peak_days)?,
        peak_start,
        peak_end,
        days_to_maturity,
        days_to_peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn navel() -> GddTargets {
        GddTargets::new(55.0, 5100.0, 6100.0, 2000.0)
    }

    #[test]
    fn test_status_sequence() {
        let t = navel();
        assert_eq!(HarvestStatus::classify(0.0, &t), HarvestStatus::PreSeason);
        assert_eq!(HarvestStatus::classify(3569.0, &t), HarvestStatus::PreSeason);
        assert_eq!(HarvestStatus::classify(3570.0, &t), HarvestStatus::Approaching);
        assert_eq!(HarvestStatus::classify(5100.0, &t), HarvestStatus::InWindow);
        assert_eq!(HarvestStatus::classify(5600.0, &t), HarvestStatus::AtPeak);
        assert_eq!(HarvestStatus::classify(6600.0, &t), HarvestStatus::AtPeak);
        assert_eq!(HarvestStatus::classify(6601.0, &t), HarvestStatus::PastPeak);
        assert_eq!(HarvestStatus::classify(8100.0, &t), HarvestStatus::PastPeak);
        assert_eq!(HarvestStatus::classify(8101.0, &t), HarvestStatus::SeasonEnded);
    }

    #[test]
    fn test_status_is_monotonic_in_gdd() {
        let t = GddTargets::DEFAULT;
        let mut previous = HarvestStatus::PreSeason;
        let mut gdd = 0.0;
        while gdd < 4000.0 {
            let s = HarvestStatus::classify(gdd, &t);
            assert!(s >= previous, "{} regressed at {}", s, gdd);
            previous = s;
            gdd += 5.0;
        }
        assert_eq!(previous, HarvestStatus::SeasonEnded);
    }

    #[test]
    fn test_narrow_window_skips_in_window() {
        // P - W/4 below M: harvest opens directly at peak
        let t = GddTargets::new(45.0, 1800.0, 1820.0, 150.0);
        assert_eq!(HarvestStatus::classify(1800.0, &t), HarvestStatus::AtPeak);
    }

    #[test]
    fn test_harvestable() {
        assert!(HarvestStatus::AtPeak.is_harvestable());
        assert!(!HarvestStatus::Approaching.is_harvestable());
        assert!(!HarvestStatus::SeasonEnded.is_harvestable());
    }

    #[test]
    fn test_harvest_window_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let w = harvest_window(1000.0, &GddTargets::DEFAULT, 10.0, today, 15, 30).unwrap();
        assert_eq!(w.days_to_maturity, 80);
        assert_eq!(w.days_to_peak, 110);
        assert_eq!(w.window_start, today + Duration::days(80));
        assert_eq!(w.peak_start, today + Duration::days(95));
        assert_eq!(w.peak_end, today + Duration::days(125));
        assert_eq!(w.window_end, today + Duration::days(155));
    }

    #[test]
    fn test_harvest_window_beyond_calendar() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert!(harvest_window(1000.0, &GddTargets::DEFAULT, 1e-6, today, 15, 30).is_none());
    }

    #[test]
    fn test_harvest_window_needs_rate() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert!(harvest_window(1000.0, &GddTargets::DEFAULT, 0.0, today, 15, 30).is_none());
    }
}
