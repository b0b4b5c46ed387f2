//! Post-harvest freshness decay
//!
//! A multiplier in `[0, 1]` applied to at-harvest quality. Each crop family
//! has a stepped schedule for the first days after harvest followed by a
//! linear decline down to a floor, with separate cold-chain and ambient
//! schedules.

use crate::curves::CropFamily;

/// Stepped decay schedule with a linear tail
struct DecaySchedule {
    /// `(max_day_inclusive, multiplier)` in ascending day order
    steps: &'static [(u32, f64)],
    /// Day the linear tail is measured from
    tail_start: u32,
    /// Loss per day in the tail
    tail_rate: f64,
    /// Lowest multiplier
    floor: f64,
}

impl DecaySchedule {
    fn multiplier(&self, days: u32) -> f64 {
        if let Some((_, m)) = self.steps.iter().find(|(max_day, _)| days <= *max_day) {
            return *m;
        }
        let elapsed = f64::from(days.saturating_sub(self.tail_start));
        (1.0 - elapsed * self.tail_rate).max(self.floor)
    }
}

const fn schedule(steps: &'static [(u32, f64)], tail_start: u32, tail_rate: f64, floor: f64) -> DecaySchedule {
    DecaySchedule {
        steps,
        tail_start,
        tail_rate,
        floor,
    }
}

fn schedules(family: CropFamily) -> (DecaySchedule, DecaySchedule) {
    match family {
        CropFamily::Citrus => (
            schedule(&[(7, 1.0), (14, 0.98), (30, 0.95)], 30, 0.01, 0.8),
            schedule(&[(3, 1.0), (7, 0.95)], 7, 0.03, 0.7),
        ),
        CropFamily::Berry => (
            schedule(&[(1, 1.0), (3, 0.95), (5, 0.85)], 5, 0.1, 0.5),
            schedule(&[(1, 0.95), (2, 0.8)], 0, 0.2, 0.3),
        ),
        // Tomatoes ripen at room temperature; the chain makes no difference
        CropFamily::Tomato => (
            schedule(&[(2, 1.0), (5, 0.95), (7, 0.9)], 7, 0.05, 0.6),
            schedule(&[(2, 1.0), (5, 0.95), (7, 0.9)], 7, 0.05, 0.6),
        ),
        CropFamily::Peach => (
            schedule(&[(5, 1.0), (10, 0.95), (14, 0.85)], 14, 0.05, 0.5),
            schedule(&[(3, 1.0), (5, 0.9)], 5, 0.1, 0.4),
        ),
        CropFamily::Cherry => (
            schedule(&[(3, 1.0), (7, 0.95), (14, 0.85)], 14, 0.05, 0.5),
            schedule(&[(1, 1.0), (3, 0.85)], 3, 0.15, 0.3),
        ),
        CropFamily::Apple => (
            schedule(&[(30, 1.0), (60, 0.98), (90, 0.95), (180, 0.9)], 180, 0.002, 0.7),
            schedule(&[(7, 1.0), (14, 0.95), (30, 0.85)], 30, 0.02, 0.5),
        ),
        CropFamily::Pear => (
            schedule(&[(60, 1.0), (90, 0.98)], 90, 0.003, 0.8),
            schedule(&[(5, 1.0), (7, 0.9)], 7, 0.1, 0.4),
        ),
        CropFamily::Mango => (
            schedule(&[(7, 1.0), (14, 0.95)], 14, 0.03, 0.6),
            schedule(&[(8, 1.0), (10, 0.9)], 10, 0.1, 0.4),
        ),
        CropFamily::Pecan => (
            schedule(&[(180, 1.0), (365, 0.98)], 365, 0.0005, 0.85),
            schedule(&[(30, 1.0), (90, 0.95), (180, 0.85)], 180, 0.002, 0.5),
        ),
        CropFamily::Blueberry => (
            schedule(&[(5, 1.0), (10, 0.95), (14, 0.9)], 14, 0.03, 0.6),
            schedule(&[(3, 1.0), (5, 0.9)], 5, 0.1, 0.4),
        ),
    }
}

/// Quality multiplier `days_since_harvest` days after harvest
pub fn freshness_multiplier(family: CropFamily, days_since_harvest: u32, cold_chain: bool) -> f64 {
    let (cold, ambient) = schedules(family);
    if cold_chain {
        cold.multiplier(days_since_harvest)
    } else {
        ambient.multiplier(days_since_harvest)
    }
}

/// Days of optimal freshness after harvest
pub fn freshness_window_days(family: CropFamily) -> u32 {
    match family {
        CropFamily::Citrus => 30,
        CropFamily::Berry => 5,
        CropFamily::Blueberry => 10,
        CropFamily::Tomato => 7,
        CropFamily::Peach => 10,
        CropFamily::Cherry => 7,
        CropFamily::Apple => 60,
        CropFamily::Pear => 5,
        CropFamily::Mango => 8,
        CropFamily::Pecan => 180,
    }
}
