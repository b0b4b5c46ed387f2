//! Integration tests for fielder-omega
//!
//! Exercise the predictor through the reference-repository boundary.

use fielder_domain::traits::ReferenceRepository;
use fielder_domain::{
    BreedRecord, Category, ConfidenceLevel, CultivarRecord, DietPhase, DietType, GddTargets,
    Profile, RegionRecord, RootstockRecord,
};
use fielder_omega::{builtin_breeds, OmegaCalibration, OmegaError, OmegaPredictor};

/// Breed-only repository backed by the built-in table
struct BreedTable {
    fail: bool,
}

impl ReferenceRepository for BreedTable {
    type Error = String;

    fn cultivar(&self, _id: &str) -> Result<Option<CultivarRecord>, String> {
        Ok(None)
    }

    fn rootstock(&self, _id: &str) -> Result<Option<RootstockRecord>, String> {
        Ok(None)
    }

    fn breed(&self, id: &str) -> Result<Option<BreedRecord>, String> {
        if self.fail {
            return Err("breed table unavailable".to_string());
        }
        Ok(builtin_breeds().into_iter().find(|b| b.id == id))
    }

    fn region(&self, _id: &str) -> Result<Option<RegionRecord>, String> {
        Ok(None)
    }

    fn crop_targets(&self, _crop: &str) -> Result<Option<GddTargets>, String> {
        Ok(None)
    }

    fn profiles(&self, _category: Category) -> Result<Vec<Profile>, String> {
        Ok(Vec::new())
    }
}

fn finish(diet: DietType, months: f64) -> Vec<DietPhase> {
    vec![
        DietPhase::new(DietType::GrassOnly, 12.0),
        DietPhase::new(diet, months),
    ]
}

#[test]
fn test_breed_invariance_through_repository() {
    let repo = BreedTable { fail: false };
    let predictor = OmegaPredictor::new(OmegaCalibration::default());
    let diet = vec![DietPhase::new(DietType::GrassOnly, 26.0)];

    let angus = predictor.predict_omega_ratio(&repo, "angus", &diet, 26.0).unwrap();
    let wagyu = predictor
        .predict_omega_ratio(&repo, "american_wagyu", &diet, 26.0)
        .unwrap();

    assert_eq!(angus.ratio, wagyu.ratio);
    assert_ne!(angus.marbling_potential, wagyu.marbling_potential);
}

#[test]
fn test_monotonic_in_finishing_duration() {
    let repo = BreedTable { fail: false };
    let predictor = OmegaPredictor::new(OmegaCalibration::default());

    let twelve = predictor
        .predict_omega_ratio(&repo, "angus", &finish(DietType::GrainFed, 12.0), 24.0)
        .unwrap();
    let eight = predictor
        .predict_omega_ratio(&repo, "angus", &finish(DietType::GrainFed, 8.0), 20.0)
        .unwrap();
    let four = predictor
        .predict_omega_ratio(&repo, "angus", &finish(DietType::GrainFinished, 4.0), 16.0)
        .unwrap();

    assert!(twelve.ratio > eight.ratio);
    assert!(eight.ratio > four.ratio);
}

#[test]
fn test_unknown_breed_is_not_an_error() {
    let repo = BreedTable { fail: false };
    let predictor = OmegaPredictor::new(OmegaCalibration::default());
    let p = predictor
        .predict_omega_ratio(&repo, "aurochs", &finish(DietType::GrainFinished, 4.0), 16.0)
        .unwrap();
    assert!(!p.breed_known);
    assert_eq!(p.confidence_level, ConfidenceLevel::Medium);
}

#[test]
fn test_repository_failure_propagates() {
    let repo = BreedTable { fail: true };
    let predictor = OmegaPredictor::new(OmegaCalibration::default());
    let result = predictor.predict_omega_ratio(&repo, "angus", &[], 20.0);
    assert!(matches!(result, Err(OmegaError::Repository(_))));
}

#[test]
fn test_custom_calibration_changes_baseline() {
    let mut calibration = OmegaCalibration::default();
    calibration.baselines.grain_fed = 18.0;
    let predictor = OmegaPredictor::try_new(calibration).unwrap();
    let p = predictor.predict(None, &[DietPhase::new(DietType::GrainFed, 4.0)], 20.0);
    assert_eq!(p.ratio, 18.0);
}
