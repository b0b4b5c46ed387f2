//! Crop GDD targets
//!
//! Built-in thermal-time targets per crop. Unknown crops resolve to
//! [`GddTargets::DEFAULT`] and are flagged so callers can lower confidence.

use fielder_domain::GddTargets;
use serde::{Deserialize, Serialize};

const BUILTIN: &[(&str, GddTargets)] = &[
    ("navel_orange", GddTargets::new(55.0, 5100.0, 6100.0, 2000.0)),
    ("valencia", GddTargets::new(55.0, 8000.0, 9000.0, 2200.0)),
    ("grapefruit", GddTargets::new(55.0, 5500.0, 7100.0, 4000.0)),
    ("tangerine", GddTargets::new(55.0, 5300.0, 5700.0, 900.0)),
    ("satsuma", GddTargets::new(55.0, 4600.0, 5100.0, 700.0)),
    ("peach", GddTargets::new(45.0, 1800.0, 2000.0, 150.0)),
    ("sweet_cherry", GddTargets::new(40.0, 1400.0, 1550.0, 100.0)),
    ("tart_cherry", GddTargets::new(39.2, 1000.0, 1100.0, 80.0)),
    ("apple", GddTargets::new(43.0, 2200.0, 2500.0, 200.0)),
    ("pear", GddTargets::new(40.0, 2400.0, 2700.0, 800.0)),
    ("strawberry", GddTargets::new(50.0, 700.0, 1300.0, 1100.0)),
    ("blueberry", GddTargets::new(45.0, 1200.0, 1400.0, 100.0)),
    ("mango", GddTargets::new(60.0, 2800.0, 3200.0, 300.0)),
    ("pomegranate", GddTargets::new(50.0, 3800.0, 4500.0, 1000.0)),
    ("pecan", GddTargets::new(65.0, 2600.0, 2900.0, 400.0)),
];

/// Targets for a crop together with whether they are the fallback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTargets {
    /// The targets
    pub targets: GddTargets,
    /// True when the crop was unknown and defaults were substituted
    pub is_default: bool,
}

/// Every built-in crop and its targets, in table order
pub fn builtin_crop_targets() -> impl Iterator<Item = (&'static str, GddTargets)> {
    BUILTIN.iter().copied()
}

/// Canonical crop key: lowercase with `_` separators
pub fn crop_key(crop: &str) -> String {
    crop.trim()
        .to_lowercase()
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Look up built-in targets, falling back to the defaults
pub fn crop_targets(crop: &str) -> ResolvedTargets {
    let key = crop_key(crop);
    match BUILTIN.iter().find(|(id, _)| *id == key) {
        Some((_, targets)) => ResolvedTargets {
            targets: *targets,
            is_default: false,
        },
        None => {
            tracing::debug!(crop = %crop, "Unknown crop, using default GDD targets");
            ResolvedTargets {
                targets: GddTargets::DEFAULT,
                is_default: true,
            }
        }
    }
}
