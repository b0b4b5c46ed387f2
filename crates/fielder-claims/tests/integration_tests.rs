//! Integration tests for fielder-claims

use fielder_domain::traits::ReferenceRepository;
use fielder_domain::{
    BreedRecord, Category, CultivarRecord, GddTargets, Profile, QualityTier, RegionRecord,
    RootstockRecord,
};
use fielder_claims::{builtin_profiles, ClaimInferenceEngine, ClaimsError, Strategy};

/// Repository serving one category's profiles
struct ProfileTable {
    profiles: Vec<Profile>,
    fail: bool,
}

impl ReferenceRepository for ProfileTable {
    type Error = String;

    fn cultivar(&self, _id: &str) -> Result<Option<CultivarRecord>, String> {
        Ok(None)
    }

    fn rootstock(&self, _id: &str) -> Result<Option<RootstockRecord>, String> {
        Ok(None)
    }

    fn breed(&self, _id: &str) -> Result<Option<BreedRecord>, String> {
        Ok(None)
    }

    fn region(&self, _id: &str) -> Result<Option<RegionRecord>, String> {
        Ok(None)
    }

    fn crop_targets(&self, _crop: &str) -> Result<Option<GddTargets>, String> {
        Ok(None)
    }

    fn profiles(&self, category: Category) -> Result<Vec<Profile>, String> {
        if self.fail {
            return Err("profile table unavailable".to_string());
        }
        Ok(self
            .profiles
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}

#[test]
fn test_full_grass_beef() {
    let engine = ClaimInferenceEngine::default();
    let c = engine.classify(Category::Beef, &["100% grass-fed"]).unwrap();

    assert_eq!(c.profile_id, "A");
    assert!(!c.is_cafo);
    assert!(c.confidence >= 0.9);
    assert_eq!(c.quality_tier, QualityTier::Artisan);
    assert_eq!(c.strategy, Strategy::PrecedenceTree);
}

#[test]
fn test_breed_only_beef_is_extended_feedlot() {
    let engine = ClaimInferenceEngine::default();
    let c = engine.classify(Category::Beef, &["Wagyu"]).unwrap();

    assert_eq!(c.profile_id, "F");
    assert!(c.is_cafo);
    assert_eq!(c.expected_range_display, "20-26:1");
    assert!(c.warnings.iter().any(|w| w.code == "SILENT_ON_PRODUCTION"));
}

#[test]
fn test_breed_with_process_claim_is_not_f() {
    let engine = ClaimInferenceEngine::default();
    let c = engine.classify(Category::Beef, &["wagyu", "grass-fed"]).unwrap();
    assert_ne!(c.profile_id, "F");
}

#[test]
fn test_pasture_with_no_feedlot_is_b() {
    let engine = ClaimInferenceEngine::default();
    let c = engine
        .classify(Category::Beef, &["pasture-raised", "no feedlot"])
        .unwrap();

    assert_eq!(c.profile_id, "B");
    assert_eq!(c.expected_range_display, "4-6:1");
    assert!(!c.is_cafo);
}

#[test]
fn test_multiple_distinguishing_claims_raise_confidence() {
    let engine = ClaimInferenceEngine::default();
    let single = engine.classify(Category::Beef, &["no feedlot"]).unwrap();
    let double = engine
        .classify(Category::Beef, &["no feedlot", "never confined"])
        .unwrap();

    assert_eq!(single.profile_id, "B");
    assert_eq!(double.profile_id, "B");
    assert!(double.confidence >= 0.9);
    assert!(double.confidence > single.confidence);
}

#[test]
fn test_unrecognized_claims_are_reported() {
    let engine = ClaimInferenceEngine::default();
    let c = engine
        .classify(Category::Beef, &["grass-fed", "Family Owned"])
        .unwrap();

    assert_eq!(c.matched_claims, vec!["grass fed".to_string()]);
    assert_eq!(c.unrecognized_claims, vec!["family owned".to_string()]);
}

#[test]
fn test_empty_claims_fall_back_everywhere() {
    let engine = ClaimInferenceEngine::default();
    let none: [&str; 0] = [];
    for category in Category::ALL {
        let c = engine.classify(category, &none).unwrap();
        assert_eq!(c.quality_tier, QualityTier::Commodity, "{}", category);
    }
}

#[test]
fn test_excluded_claim_blocks_profile() {
    let engine = ClaimInferenceEngine::default();
    let c = engine
        .classify(Category::Eggs, &["free-range", "pasture raised"])
        .unwrap();
    assert_eq!(c.profile_id, "eggs_pasture_raised");
    assert!(c.score.is_some());
}

#[test]
fn test_produce_profile_uses_brix_display() {
    let engine = ClaimInferenceEngine::default();
    let c = engine
        .classify(Category::Produce, &["Tree-Ripened", "heirloom"])
        .unwrap();

    assert_eq!(c.profile_id, "produce_tree_ripened");
    assert_eq!(c.score, Some(15));
    assert!(c.expected_range_display.starts_with("11-14"));
}

#[test]
fn test_classify_from_repository() {
    let mut profiles = builtin_profiles(Category::Dairy);
    profiles.retain(|p| p.id != "dairy_grass_fed");
    let repo = ProfileTable { profiles, fail: false };
    let engine = ClaimInferenceEngine::default();

    let c = engine
        .classify_from(&repo, Category::Dairy, &["grass-fed"])
        .unwrap();
    assert_eq!(c.profile_id, "dairy_commodity");
}

#[test]
fn test_classify_from_empty_repository_uses_builtins() {
    let repo = ProfileTable { profiles: Vec::new(), fail: false };
    let engine = ClaimInferenceEngine::default();

    let c = engine
        .classify_from(&repo, Category::Dairy, &["grass-fed"])
        .unwrap();
    assert_eq!(c.profile_id, "dairy_grass_fed");
}

#[test]
fn test_repository_failure_surfaces() {
    let repo = ProfileTable { profiles: Vec::new(), fail: true };
    let engine = ClaimInferenceEngine::default();

    let result = engine.classify_from(&repo, Category::Pork, &["heritage breed"]);
    assert!(matches!(result, Err(ClaimsError::Repository(_))));
}
