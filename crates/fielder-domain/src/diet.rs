//! Diet module - feeding history of an animal

use serde::{Deserialize, Serialize};

/// Feeding regime of one diet phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    /// Grass and forage only, on pasture
    GrassOnly,
    /// Pasture-based with forage supplements (hay, silage), no grain
    PastureForage,
    /// On pasture while receiving grain supplement (concurrent, not confined)
    PastureGrainSupplemented,
    /// Grain finishing ration in confinement
    GrainFinished,
    /// Grain-based ration in a feedlot for an extended period
    GrainFed,
}

impl DietType {
    /// Every diet type, in declaration order
    pub const ALL: [DietType; 5] = [
        DietType::GrassOnly,
        DietType::PastureForage,
        DietType::PastureGrainSupplemented,
        DietType::GrainFinished,
        DietType::GrainFed,
    ];

    /// Get the diet type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::GrassOnly => "grass_only",
            DietType::PastureForage => "pasture_forage",
            DietType::PastureGrainSupplemented => "pasture_grain_supplemented",
            DietType::GrainFinished => "grain_finished",
            DietType::GrainFed => "grain_fed",
        }
    }

    /// Parse a diet type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "grass_only" | "grass" | "grass_fed" => Some(DietType::GrassOnly),
            "pasture_forage" | "pasture" => Some(DietType::PastureForage),
            "pasture_grain_supplemented" | "pasture_supplemented" => {
                Some(DietType::PastureGrainSupplemented)
            }
            "grain_finished" => Some(DietType::GrainFinished),
            "grain_fed" | "feedlot" => Some(DietType::GrainFed),
            _ => None,
        }
    }

    /// Whether this is a confinement grain ration (feedlot finishing)
    ///
    /// Grain supplementation while staying on pasture is not grain-based in
    /// this sense.
    pub fn is_grain_based(&self) -> bool {
        matches!(self, DietType::GrainFinished | DietType::GrainFed)
    }
}

impl std::fmt::Display for DietType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid diet type: {}", s))
    }
}

/// Optional feed composition of a phase, in percent of dry matter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedComposition {
    /// Grain share
    pub grain_pct: f64,
    /// Forage share (hay, silage, fresh pasture)
    pub forage_pct: f64,
}

/// One segment of a feeding history
///
/// A diet sequence is a `Vec<DietPhase>` in chronological order; its last
/// element is the finishing phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPhase {
    /// Feeding regime
    pub diet_type: DietType,
    /// Duration in months
    pub duration_months: f64,
    /// Optional composition detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_composition: Option<FeedComposition>,
}

impl DietPhase {
    /// Create a phase without composition detail
    pub fn new(diet_type: DietType, duration_months: f64) -> Self {
        Self {
            diet_type,
            duration_months,
            feed_composition: None,
        }
    }
}

/// Sum of phase durations in months (negative durations count as zero)
pub fn total_duration_months(phases: &[DietPhase]) -> f64 {
    phases.iter().map(|p| p.duration_months.max(0.0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grain_based() {
        assert!(DietType::GrainFed.is_grain_based());
        assert!(DietType::GrainFinished.is_grain_based());
        assert!(!DietType::PastureGrainSupplemented.is_grain_based());
        assert!(!DietType::GrassOnly.is_grain_based());
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(DietType::parse("grass-only"), Some(DietType::GrassOnly));
        assert_eq!(DietType::parse("Grain Fed"), Some(DietType::GrainFed));
        assert_eq!(
            DietType::parse("pasture_grain_supplemented"),
            Some(DietType::PastureGrainSupplemented)
        );
        assert_eq!(DietType::parse("corn"), None);
    }

    #[test]
    fn test_total_duration_ignores_negative() {
        let phases = vec![
            DietPhase::new(DietType::GrassOnly, 12.0),
            DietPhase::new(DietType::GrainFinished, -3.0),
            DietPhase::new(DietType::GrainFinished, 4.0),
        ];
        assert_eq!(total_duration_months(&phases), 16.0);
    }
}
