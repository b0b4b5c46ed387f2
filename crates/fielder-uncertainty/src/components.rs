//! Per-pillar variance components
//!
//! Each SHARE pillar contributes an independent standard deviation; the
//! total is their root sum of squares.

use fielder_domain::Category;
use serde::{Deserialize, Serialize};

/// Standard deviation contributed by each pillar (metric units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceComponents {
    /// Cultivar or breed
    pub heritage: f64,
    /// Region and soil
    pub soil: f64,
    /// Agricultural practice (diet, inputs)
    pub agricultural: f64,
    /// Ripening or harvest timing
    pub ripen: f64,
}

/// Fraction of total variance per pillar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarShares {
    /// Heritage share
    pub heritage: f64,
    /// Soil share
    pub soil: f64,
    /// Agricultural share
    pub agricultural: f64,
    /// Ripen share
    pub ripen: f64,
}

impl VarianceComponents {
    /// Create components; negative values count as zero
    pub fn new(heritage: f64, soil: f64, agricultural: f64, ripen: f64) -> Self {
        Self {
            heritage: heritage.max(0.0),
            soil: soil.max(0.0),
            agricultural: agricultural.max(0.0),
            ripen: ripen.max(0.0),
        }
    }

    /// Default components for a category's primary metric
    pub fn for_category(category: Category) -> Self {
        if category.is_animal() {
            // omega ratio; diet dominates
            Self::new(0.5, 0.3, 1.5, 0.5)
        } else {
            // Brix
            Self::new(0.8, 0.5, 0.4, 0.9)
        }
    }

    /// Total standard deviation
    pub fn total_std_dev(&self) -> f64 {
        self.total_variance().sqrt()
    }

    /// Total variance
    pub fn total_variance(&self) -> f64 {
        self.heritage.powi(2) + self.soil.powi(2) + self.agricultural.powi(2) + self.ripen.powi(2)
    }

    /// Every component multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.heritage * factor,
            self.soil * factor,
            self.agricultural * factor,
            self.ripen * factor,
        )
    }

    /// Widen components for a degraded prediction
    ///
    /// Confidence 1.0 leaves them unchanged; each point of confidence lost
    /// adds the same fraction of spread (confidence 0.5 ⇒ ×1.5).
    pub fn degraded_by(&self, confidence: f64) -> Self {
        let lost = (1.0 - confidence.clamp(0.0, 1.0)).max(0.0);
        self.scaled(1.0 + lost)
    }

    /// Share of total variance per pillar; `None` when the total is zero
    pub fn shares(&self) -> Option<PillarShares> {
        let total = self.total_variance();
        if total <= 0.0 {
            return None;
        }
        Some(PillarShares {
            heritage: self.heritage.powi(2) / total,
            soil: self.soil.powi(2) / total,
            agricultural: self.agricultural.powi(2) / total,
            ripen: self.ripen.powi(2) / total,
        })
    }
}
