//! Diet-sequence omega-ratio predictor

use std::fmt::Display;

use fielder_domain::traits::ReferenceRepository;
use fielder_domain::{
    BreedRecord, ConfidenceInterval, ConfidenceLevel, DietPhase, DietType, MarblingPotential,
    QualityTier,
};
use serde::{Deserialize, Serialize};

use crate::breeds::maturity_factor;
use crate::{OmegaCalibration, OmegaError};

/// Omega ratio grade: lower ratios are better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OmegaGrade {
    /// Ratio at or below 3
    Exceptional,
    /// Ratio at or below 6
    Premium,
    /// Ratio at or below 12
    Standard,
    /// Ratio above 12
    Commodity,
}

impl OmegaGrade {
    /// Grade a ratio
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio <= 3.0 {
            OmegaGrade::Exceptional
        } else if ratio <= 6.0 {
            OmegaGrade::Premium
        } else if ratio <= 12.0 {
            OmegaGrade::Standard
        } else {
            OmegaGrade::Commodity
        }
    }

    /// Get the grade as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OmegaGrade::Exceptional => "exceptional",
            OmegaGrade::Premium => "premium",
            OmegaGrade::Standard => "standard",
            OmegaGrade::Commodity => "commodity",
        }
    }

    /// Matching quality tier
    pub fn quality_tier(&self) -> QualityTier {
        match self {
            OmegaGrade::Exceptional => QualityTier::Artisan,
            OmegaGrade::Premium => QualityTier::Premium,
            OmegaGrade::Standard => QualityTier::Standard,
            OmegaGrade::Commodity => QualityTier::Commodity,
        }
    }
}

/// Share of the diet contribution coming from one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseContribution {
    /// Diet type of the phase
    pub diet_type: DietType,
    /// Phase duration (months)
    pub duration_months: f64,
    /// Baseline ratio of the diet type
    pub baseline: f64,
    /// Weight of the phase in the diet contribution
    pub weight: f64,
    /// `baseline * weight`
    pub contribution: f64,
    /// Whether this is the finishing phase
    pub is_finishing: bool,
}

/// Predicted omega-6:3 ratio with its supporting detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmegaPrediction {
    /// Predicted ratio (x:1)
    pub ratio: f64,
    /// Ratio plus or minus `uncertainty`, clamped to the reportable bounds
    pub range: ConfidenceInterval,
    /// Half-width of the range
    pub uncertainty: f64,
    /// Weighted diet baselines before the duration penalty
    pub diet_contribution: f64,
    /// Grain finishing duration penalty
    pub finishing_penalty: f64,
    /// Ratio grade
    pub grade: OmegaGrade,
    /// Confidence factor from age vs. breed maturity
    pub maturity_factor: f64,
    /// Fraction of the animal's age covered by the diet history (capped at 1)
    pub coverage: f64,
    /// Confidence tier
    pub confidence_level: ConfidenceLevel,
    /// Numeric confidence
    pub confidence: f64,
    /// Whether the breed was found
    pub breed_known: bool,
    /// Marbling potential, reported separately from the ratio
    pub marbling_potential: Option<MarblingPotential>,
    /// Per-phase breakdown, finishing phase last
    pub phases: Vec<PhaseContribution>,
    /// Explanations for degraded confidence
    pub data_quality_notes: Vec<String>,
}

/// Diet-sequence omega predictor
pub struct OmegaPredictor {
    calibration: OmegaCalibration,
}

impl OmegaPredictor {
    /// Create a new predictor with the given calibration
    pub fn new(calibration: OmegaCalibration) -> Self {
        Self { calibration }
    }

    /// Create a predictor after validating the calibration
    pub fn try_new(calibration: OmegaCalibration) -> Result<Self, OmegaError> {
        calibration.validate().map_err(OmegaError::Config)?;
        Ok(Self::new(calibration))
    }

    /// Get the current calibration
    pub fn calibration(&self) -> &OmegaCalibration {
        &self.calibration
    }

    /// Predict by breed id, reading the breed from a reference repository
    ///
    /// An unknown breed is not an error; it widens the range and lowers
    /// confidence.
    pub fn predict_omega_ratio<R>(
        &self,
        repository: &R,
        breed_id: &str,
        diet: &[DietPhase],
        age_at_harvest_months: f64,
    ) -> Result<OmegaPrediction, OmegaError>
    where
        R: ReferenceRepository,
        R::Error: Display,
    {
        let breed = repository
            .breed(breed_id)
            .map_err(|e| OmegaError::Repository(e.to_string()))?;
        if breed.is_none() {
            tracing::debug!(breed_id = %breed_id, "Unknown breed, using default maturity");
        }
        Ok(self.predict(breed.as_ref(), diet, age_at_harvest_months))
    }

    /// Predict from an already resolved breed
    pub fn predict(
        &self,
        breed: Option<&BreedRecord>,
        diet: &[DietPhase],
        age_at_harvest_months: f64,
    ) -> OmegaPrediction {
        let cal = &self.calibration;
        let mut notes = Vec::new();

        let breed_known = breed.is_some();
        if !breed_known {
            notes.push("Breed unknown; default maturity assumed".to_string());
        }
        let target_maturity = breed
            .map(|b| b.maturity_months)
            .unwrap_or(cal.default_maturity_months);
        let maturity = maturity_factor(age_at_harvest_months, target_maturity);

        let Some((finishing, early)) = diet.split_last() else {
            notes.push("No diet history; unknown-diet ratio assumed".to_string());
            return self.unknown_diet(breed, maturity, age_at_harvest_months, notes);
        };

        let phases = self.weigh_phases(finishing, early);
        let diet_contribution: f64 = phases.iter().map(|p| p.contribution).sum();

        let finishing_months = finishing.duration_months.max(0.0);
        let finishing_penalty = if finishing.diet_type.is_grain_based() {
            (finishing_months - cal.penalty_threshold_months).max(0.0) * cal.penalty_per_month
        } else {
            0.0
        };

        let ratio = (diet_contribution + finishing_penalty).clamp(cal.min_ratio, cal.max_ratio);

        let total_months = fielder_domain::diet::total_duration_months(diet);
        let coverage = coverage(total_months, age_at_harvest_months);
        let overlong = age_at_harvest_months > 0.0 && total_months > age_at_harvest_months + 1e-9;
        if coverage < cal.coverage_threshold {
            notes.push(format!(
                "Diet history covers {:.0}% of the animal's age",
                coverage * 100.0
            ));
        }

        let mut uncertainty = cal.base_uncertainty;
        if !breed_known {
            uncertainty += cal.unknown_breed_uncertainty;
        }
        if coverage < cal.coverage_threshold {
            uncertainty += cal.low_coverage_uncertainty;
        }

        let complete = coverage >= cal.coverage_threshold;
        let level = match (breed_known, complete) {
            (true, true) => ConfidenceLevel::High,
            (false, false) => ConfidenceLevel::Low,
            _ => ConfidenceLevel::Medium,
        };

        let mut confidence = self.level_confidence(level) * maturity;
        if maturity < 1.0 {
            notes.push(format!(
                "Harvested at {:.0}% of target maturity",
                age_at_harvest_months / target_maturity * 100.0
            ));
        }
        if overlong {
            confidence *= cal.overlong_history_factor;
            notes.push(format!(
                "Diet phases total {:.1} months, longer than the animal's age of {:.1}",
                total_months, age_at_harvest_months
            ));
        }

        tracing::debug!(
            ratio,
            diet_contribution,
            finishing_penalty,
            coverage,
            "Predicted omega ratio"
        );

        OmegaPrediction {
            ratio,
            range: ConfidenceInterval::around(ratio, uncertainty, 0.9).clamped(cal.min_ratio, cal.max_ratio),
            uncertainty,
            diet_contribution,
            finishing_penalty,
            grade: OmegaGrade::for_ratio(ratio),
            maturity_factor: maturity,
            coverage,
            confidence_level: level,
            confidence: confidence.clamp(0.0, 1.0),
            breed_known,
            marbling_potential: breed.map(|b| b.marbling_potential),
            phases,
            data_quality_notes: notes,
        }
    }

    fn weigh_phases(&self, finishing: &DietPhase, early: &[DietPhase]) -> Vec<PhaseContribution> {
        let cal = &self.calibration;
        let finishing_weight = if early.is_empty() {
            1.0
        } else {
            cal.finishing_weight
        };
        let early_weight = 1.0 - finishing_weight;

        let early_total: f64 = early.iter().map(|p| p.duration_months.max(0.0)).sum();
        let mut phases: Vec<PhaseContribution> = early
            .iter()
            .map(|p| {
                let share = if early_total > 0.0 {
                    p.duration_months.max(0.0) / early_total
                } else {
                    1.0 / early.len() as f64
                };
                let baseline = cal.baselines.get(p.diet_type);
                let weight = early_weight * share;
                PhaseContribution {
                    diet_type: p.diet_type,
                    duration_months: p.duration_months,
                    baseline,
                    weight,
                    contribution: baseline * weight,
                    is_finishing: false,
                }
            })
            .collect();

        let baseline = cal.baselines.get(finishing.diet_type);
        phases.push(PhaseContribution {
            diet_type: finishing.diet_type,
            duration_months: finishing.duration_months,
            baseline,
            weight: finishing_weight,
            contribution: baseline * finishing_weight,
            is_finishing: true,
        });
        phases
    }

    fn unknown_diet(
        &self,
        breed: Option<&BreedRecord>,
        maturity: f64,
        age_at_harvest_months: f64,
        notes: Vec<String>,
    ) -> OmegaPrediction {
        let cal = &self.calibration;
        let ratio = cal.unknown_diet_ratio.clamp(cal.min_ratio, cal.max_ratio);
        let mut uncertainty = cal.base_uncertainty + cal.low_coverage_uncertainty;
        if breed.is_none() {
            uncertainty += cal.unknown_breed_uncertainty;
        }
        tracing::debug!(age_at_harvest_months, "Empty diet history, using unknown-diet ratio");
        OmegaPrediction {
            ratio,
            range: ConfidenceInterval::around(ratio, uncertainty, 0.9).clamped(cal.min_ratio, cal.max_ratio),
            uncertainty,
            diet_contribution: ratio,
            finishing_penalty: 0.0,
            grade: OmegaGrade::for_ratio(ratio),
            maturity_factor: maturity,
            coverage: 0.0,
            confidence_level: ConfidenceLevel::Low,
            confidence: (cal.low_confidence * maturity).clamp(0.0, 1.0),
            breed_known: breed.is_some(),
            marbling_potential: breed.map(|b| b.marbling_potential),
            phases: Vec::new(),
            data_quality_notes: notes,
        }
    }

    fn level_confidence(&self, level: ConfidenceLevel) -> f64 {
        match level {
            ConfidenceLevel::High => self.calibration.high_confidence,
            ConfidenceLevel::Medium => self.calibration.medium_confidence,
            ConfidenceLevel::Low | ConfidenceLevel::Speculative => self.calibration.low_confidence,
        }
    }
}

fn coverage(total_months: f64, age_months: f64) -> f64 {
    if age_months <= 0.0 {
        return 0.0;
    }
    (total_months / age_months).clamp(0.0, 1.0)
}
