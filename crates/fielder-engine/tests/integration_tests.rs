//! Integration tests for fielder-engine

use chrono::{Duration, NaiveDate};
use fielder_domain::{Category, DietPhase, DietType, MetricKind, Severity, WeatherDay};
use fielder_engine::{
    AnimalInput, EngineConfig, EngineError, PredictionOrchestrator, PredictionRequest, ProduceInput,
};
use fielder_produce::HarvestStatus;
use fielder_store::InMemoryStore;
use fielder_validator::DataSource;

fn seeded_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.uncertainty.seed = Some(2024);
    config.uncertainty.n_samples = 4000;
    config
}

fn weather(start: NaiveDate, days: i64, high: f64, low: f64) -> Vec<WeatherDay> {
    (0..days)
        .map(|i| WeatherDay::observed(start + Duration::days(i), high, low))
        .collect()
}

#[test]
fn test_claims_contradicted_by_measurement() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let request = PredictionRequest::new(Category::Beef)
        .with_claims(["pasture-raised", "no feedlot"])
        .with_measurement(18.0, DataSource::Lab);

    let result = orchestrator.predict(&request).unwrap();

    assert_eq!(result.classification.profile_id, "B");
    let check = result.consistency().unwrap();
    assert!(!check.is_consistent);
    assert!(check.severity >= Severity::Warning);
    let message = check.message.to_lowercase();
    assert!(message.contains("worse"));
    assert!(message.contains("inconsistent"));
}

#[test]
fn test_produce_season_from_weather() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let bloom = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let today = bloom + Duration::days(60);
    let forecast = (0..7)
        .map(|i| WeatherDay::forecast(today + Duration::days(i), 88.0, 70.0, 0.9))
        .collect();

    let request = PredictionRequest::new(Category::Produce)
        .with_claims(["organic"])
        .with_produce(ProduceInput {
            cultivar_id: Some("washington_navel".to_string()),
            rootstock_id: Some("carrizo".to_string()),
            region_id: Some("indian_river".to_string()),
            tree_age_years: Some(10.0),
            weather: weather(bloom, 60, 90.0, 70.0),
            forecast,
            as_of: Some(today),
            ..Default::default()
        });

    let result = orchestrator.predict(&request).unwrap();
    let produce = result.produce.as_ref().unwrap();

    // 25 GDD/day above a 55F base
    assert!((produce.current_gdd - 1500.0).abs() < 1e-9);
    assert_eq!(result.harvest_status(), Some(HarvestStatus::PreSeason));
    assert!(produce.harvest_window.is_some());
    let projection = produce.peak_projection.as_ref().unwrap();
    assert!(projection.forecast_based);
    assert!(projection.days_to_target.unwrap() > 0);
    assert!(produce.sugar_acid.is_some());
    // Far from peak: the timing penalty applies
    assert!(produce.brix.timing_modifier < 0.0);
}

#[test]
fn test_unknown_cultivar_lowers_confidence() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let known = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
        cultivar_id: Some("valencia".to_string()),
        tree_age_years: Some(12.0),
        current_gdd: Some(6000.0),
        ..Default::default()
    });
    let unknown = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
        cultivar_id: Some("mystery_orange".to_string()),
        tree_age_years: Some(12.0),
        current_gdd: Some(6000.0),
        ..Default::default()
    });

    let known = orchestrator.predict(&known).unwrap();
    let unknown = orchestrator.predict(&unknown).unwrap();

    assert!(unknown.confidence < known.confidence);
    assert!(unknown
        .data_quality_notes
        .iter()
        .any(|n| n.contains("mystery_orange")));
    // Wider variance for the degraded prediction
    assert!(unknown.confidence_interval.width() > known.confidence_interval.width());
}

#[test]
fn test_omega_breed_invariance_through_engine() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let diet = vec![DietPhase::new(DietType::GrassOnly, 26.0)];
    let request = |breed: &str| {
        PredictionRequest::new(Category::Beef).with_animal(AnimalInput {
            breed_id: Some(breed.to_string()),
            diet: diet.clone(),
            age_at_harvest_months: Some(26.0),
        })
    };

    let angus = orchestrator.predict(&request("angus")).unwrap();
    let wagyu = orchestrator.predict(&request("american_wagyu")).unwrap();

    assert_eq!(angus.primary_metric.value, wagyu.primary_metric.value);
    assert_eq!(angus.primary_metric.kind, MetricKind::OmegaRatio);
}

#[test]
fn test_grain_finish_worse_tier_than_grass() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let grass = PredictionRequest::new(Category::Beef).with_animal(AnimalInput {
        breed_id: None,
        diet: vec![DietPhase::new(DietType::GrassOnly, 24.0)],
        age_at_harvest_months: None,
    });
    let feedlot = PredictionRequest::new(Category::Beef).with_animal(AnimalInput {
        breed_id: None,
        diet: vec![
            DietPhase::new(DietType::GrassOnly, 8.0),
            DietPhase::new(DietType::GrainFed, 12.0),
        ],
        age_at_harvest_months: None,
    });

    let grass = orchestrator.predict(&grass).unwrap();
    let feedlot = orchestrator.predict(&feedlot).unwrap();

    assert!(grass.primary_metric.value < feedlot.primary_metric.value);
    assert!(grass.quality_tier < feedlot.quality_tier);
}

#[test]
fn test_history_anomaly_is_warned() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let request = PredictionRequest::new(Category::Produce)
        .with_measurement(15.5, DataSource::Farm)
        .with_history(vec![10.0, 10.2, 9.8, 10.1, 9.9]);

    let result = orchestrator.predict(&request).unwrap();

    let anomaly = result.measurement.as_ref().unwrap().anomaly.as_ref().unwrap();
    assert!(anomaly.is_anomaly);
    assert!(result.warnings.iter().any(|w| w.code == "ANOMALY"));
}

#[test]
fn test_hot_reload_visible_to_next_prediction() {
    let orchestrator = PredictionOrchestrator::new(InMemoryStore::new(), seeded_config()).unwrap();
    let request = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
        cultivar_id: Some("orchard_gold".to_string()),
        tree_age_years: Some(10.0),
        current_gdd: Some(2100.0),
        ..Default::default()
    });

    let before = orchestrator.predict(&request).unwrap();
    assert!(before
        .data_quality_notes
        .iter()
        .any(|n| n.contains("orchard_gold")));

    orchestrator
        .repository()
        .reload_toml(
            r#"
[[cultivars]]
id = "orchard_gold"
name = "Orchard Gold"
crop = "peach"
base_brix = 13.0
"#,
        )
        .unwrap();

    let after = orchestrator.predict(&request).unwrap();
    let produce = after.produce.as_ref().unwrap();
    assert_eq!(produce.brix.cultivar_base, 13.0);
    assert_eq!(after.pillars.heritage.source, "Orchard Gold");
}

#[test]
fn test_config_file_drives_orchestrator() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[uncertainty]
n_samples = 1000
method = "parametric"
"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    let orchestrator = PredictionOrchestrator::with_builtin(config).unwrap();
    let result = orchestrator
        .predict(&PredictionRequest::new(Category::Poultry))
        .unwrap();
    assert_eq!(result.distribution.n_samples, 0);
}

#[test]
fn test_invalid_config_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[brix]\ndefault_halfwidth = \"wide\"").unwrap();
    assert!(matches!(
        EngineConfig::load(file.path()),
        Err(EngineError::Config(_))
    ));
}

#[tokio::test]
async fn test_concurrent_offloaded_predictions() {
    use std::sync::Arc;

    let orchestrator = Arc::new(PredictionOrchestrator::with_builtin(seeded_config()).unwrap());
    let mut handles = Vec::new();
    for category in Category::ALL {
        let orch = Arc::clone(&orchestrator);
        handles.push(tokio::spawn(async move {
            orch.predict_offloaded(&PredictionRequest::new(category)).await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert!(result.distribution.percentiles.p5 <= result.distribution.percentiles.p95);
    }
}

#[test]
fn test_unknown_region_lowers_confidence() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
    let input = ProduceInput {
        cultivar_id: Some("washington_navel".to_string()),
        tree_age_years: Some(12.0),
        current_gdd: Some(4800.0),
        region_id: Some("indian_river".to_string()),
        as_of: Some(today),
        ..Default::default()
    };
    let unknown_input = ProduceInput {
        region_id: Some("atlantis".to_string()),
        ..input.clone()
    };

    let known = orchestrator
        .predict(&PredictionRequest::new(Category::Produce).with_produce(input))
        .unwrap();
    let unknown = orchestrator
        .predict(&PredictionRequest::new(Category::Produce).with_produce(unknown_input))
        .unwrap();

    assert!(unknown.confidence < known.confidence);
    assert!(unknown
        .data_quality_notes
        .iter()
        .any(|n| n.contains("atlantis")));
    assert!(!known.data_quality_notes.iter().any(|n| n.contains("not found")));
}

#[test]
fn test_unknown_region_noted_without_date() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let request = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
        cultivar_id: Some("washington_navel".to_string()),
        current_gdd: Some(4800.0),
        region_id: Some("atlantis".to_string()),
        ..Default::default()
    });

    let result = orchestrator.predict(&request).unwrap();
    assert!(result
        .data_quality_notes
        .iter()
        .any(|n| n.contains("Region 'atlantis' not found")));
}

#[test]
fn test_stalled_forecast_leaves_date_open() {
    let orchestrator = PredictionOrchestrator::with_builtin(seeded_config()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    // Forecast highs a hair above the base temperature: GDD/day near zero
    let request = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
        cultivar_id: Some("washington_navel".to_string()),
        current_gdd: Some(0.0),
        forecast: vec![WeatherDay::forecast(today, 55.00002, 55.0, 0.9)],
        as_of: Some(today),
        ..Default::default()
    });

    let result = orchestrator.predict(&request).unwrap();
    let projection = result.produce.as_ref().unwrap().peak_projection.as_ref().unwrap();
    assert!(projection.forecast_based);
    assert!(projection.projected_date.is_none());
}
