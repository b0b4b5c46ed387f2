//! Brix point estimate
//!
//! `brix = cultivar_base + rootstock_modifier + age_modifier + timing_modifier`

use fielder_domain::QualityTier;
use serde::{Deserialize, Serialize};

use crate::{BrixConfig, ProduceError};

/// Brix modifier for tree age in years
///
/// Young trees and old trees produce less sugar; 8 to 18 years is prime.
/// Unknown age contributes nothing (confidence is lowered instead).
///
/// ```
/// use fielder_produce::age_modifier;
///
/// assert_eq!(age_modifier(Some(0.0)), -0.8);
/// assert_eq!(age_modifier(Some(12.0)), 0.0);
/// assert_eq!(age_modifier(None), 0.0);
/// ```
pub fn age_modifier(tree_age_years: Option<f64>) -> f64 {
    let Some(age) = tree_age_years else {
        return 0.0;
    };
    if age <= 2.0 {
        -0.8
    } else if age <= 4.0 {
        -0.5
    } else if age <= 7.0 {
        -0.2
    } else if age <= 18.0 {
        0.0
    } else if age <= 25.0 {
        -0.2
    } else {
        -0.3
    }
}

/// Brix modifier for harvest timing relative to peak
///
/// Zero inside the inner half of the window (`|gdd - peak| <= halfwidth/2`),
/// otherwise the parabolic penalty `-max_penalty * (d / halfwidth)^2`,
/// never worse than `-1.5 * max_penalty`.
pub fn timing_modifier(current_gdd: f64, peak_gdd: f64, halfwidth: f64, max_penalty: f64) -> f64 {
    let d = (current_gdd - peak_gdd).abs();
    if d <= halfwidth / 2.0 {
        return 0.0;
    }
    let penalty = max_penalty * (d / halfwidth).powi(2);
    -penalty.min(max_penalty * 1.5)
}

/// Inputs to a Brix prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrixRequest {
    /// Cultivar genetic base Brix
    pub cultivar_base: f64,
    /// Additive rootstock modifier
    pub rootstock_modifier: f64,
    /// Tree age, if known
    #[serde(default)]
    pub tree_age_years: Option<f64>,
    /// Cumulative GDD now
    pub current_gdd: f64,
    /// GDD at peak quality
    pub peak_gdd: f64,
    /// Peak window half-width; configuration default when absent
    #[serde(default)]
    pub halfwidth: Option<f64>,
    /// Maximum timing penalty; configuration default when absent
    #[serde(default)]
    pub max_penalty: Option<f64>,
}

/// A produce quality point estimate with its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrixPrediction {
    /// Predicted Brix (°Bx)
    pub predicted_brix: f64,
    /// Cultivar contribution
    pub cultivar_base: f64,
    /// Rootstock contribution
    pub rootstock_modifier: f64,
    /// Tree-age contribution
    pub age_modifier: f64,
    /// Timing contribution
    pub timing_modifier: f64,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Explanations for lowered confidence
    pub notes: Vec<String>,
}

impl BrixPrediction {
    /// Quality tier of the predicted Brix
    pub fn quality_tier(&self) -> QualityTier {
        tier_for_brix(self.predicted_brix)
    }

    /// Consumer-facing quality message
    pub fn quality_message(&self) -> &'static str {
        match self.quality_tier() {
            QualityTier::Artisan => "Exceptional sweetness - top 5% of produce",
            QualityTier::Premium => "Premium quality - significantly sweeter than grocery store",
            QualityTier::Standard => "Good quality - noticeably better than average",
            QualityTier::Commodity => "Standard quality",
        }
    }

    /// Percent difference from commodity Brix
    pub fn vs_commodity_pct(&self, commodity_brix: f64) -> f64 {
        if commodity_brix <= 0.0 {
            return 0.0;
        }
        ((self.predicted_brix - commodity_brix) / commodity_brix * 1000.0).round() / 10.0
    }

    /// Scale confidence down and record why
    pub fn degrade(&mut self, factor: f64, note: impl Into<String>) {
        self.confidence = (self.confidence * factor).clamp(0.0, 1.0);
        self.notes.push(note.into());
    }
}

/// Quality tier for a Brix value: 14+ artisan, 12+ premium, 10+ standard
pub fn tier_for_brix(brix: f64) -> QualityTier {
    if brix >= 14.0 {
        QualityTier::Artisan
    } else if brix >= 12.0 {
        QualityTier::Premium
    } else if brix >= 10.0 {
        QualityTier::Standard
    } else {
        QualityTier::Commodity
    }
}

/// Brix predictor
pub struct BrixPredictor {
    config: BrixConfig,
}

impl BrixPredictor {
    /// Create a new predictor with the given configuration
    pub fn new(config: BrixConfig) -> Self {
        Self { config }
    }

    /// Create a predictor after validating the configuration
    pub fn try_new(config: BrixConfig) -> Result<Self, ProduceError> {
        config.validate().map_err(ProduceError::Config)?;
        Ok(Self::new(config))
    }

    /// Get the current configuration
    pub fn config(&self) -> &BrixConfig {
        &self.config
    }

    /// Predict Brix from cultivar, rootstock, age and timing
    pub fn predict(&self, request: &BrixRequest) -> BrixPrediction {
        let halfwidth = request
            .halfwidth
            .filter(|h| *h > 0.0)
            .unwrap_or(self.config.default_halfwidth);
        let max_penalty = request
            .max_penalty
            .filter(|p| *p >= 0.0)
            .unwrap_or(self.config.default_max_penalty);

        let age_mod = age_modifier(request.tree_age_years);
        let timing_mod = timing_modifier(request.current_gdd, request.peak_gdd, halfwidth, max_penalty);

        let mut notes = Vec::new();
        let confidence = if request.tree_age_years.is_some() {
            self.config.age_known_confidence
        } else {
            notes.push("Tree age unknown; assumed prime age".to_string());
            self.config.age_unknown_confidence
        };

        let predicted = request.cultivar_base + request.rootstock_modifier + age_mod + timing_mod;
        tracing::debug!(
            predicted,
            age_mod,
            timing_mod,
            "Predicted Brix"
        );

        BrixPrediction {
            predicted_brix: predicted,
            cultivar_base: request.cultivar_base,
            rootstock_modifier: request.rootstock_modifier,
            age_modifier: age_mod,
            timing_modifier: timing_mod,
            confidence,
            notes,
        }
    }
}
