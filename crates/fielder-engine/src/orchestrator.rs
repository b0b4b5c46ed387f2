//! Prediction orchestration
//!
//! Routes a request to the Brix or omega predictor by category, validates
//! the point estimate, cross-checks any measurement against the claimed
//! profile and wraps everything with an uncertainty distribution.

use std::fmt::Display;

use fielder_claims::{ClaimInferenceEngine, Classification};
use fielder_domain::diet::total_duration_months;
use fielder_domain::traits::{PinnableRepository, ReferenceRepository};
use fielder_domain::{
    Category, ConfidenceLevel, GddTargets, MetricKind, PredictionId, PrimaryMetric, QualityTier,
    Severity, ValidationResult, Warning,
};
use fielder_omega::{OmegaGrade, OmegaPrediction, OmegaPredictor};
use fielder_produce::{
    crop_targets, cumulative_gdd, estimate_sugar_acid, harvest_window, project_to_target,
    tier_for_brix, BrixPredictor, BrixRequest, CropFamily, HarvestStatus,
};
use fielder_store::InMemoryStore;
use fielder_uncertainty::{physical_floor, Distribution, UncertaintyQuantifier, VarianceComponents};
use fielder_validator::{Measurement, PhysicalConstraintValidator, ProfileOmegaValidator};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::request::{AnimalInput, MeasuredValue, PredictionRequest, ProduceInput};
use crate::result::{MeasurementReport, Pillar, PillarBreakdown, PredictionResult, ProduceDetail};
use crate::EngineError;

/// Where each pillar's value came from, before variance shares are known
struct PillarSources {
    heritage: (Option<f64>, String),
    soil: (Option<f64>, String),
    agricultural: (Option<f64>, String),
    ripen: (Option<f64>, String),
}

/// Category prediction before validation
struct CategoryEstimate {
    point: f64,
    confidence: f64,
    pillars: PillarSources,
    produce: Option<ProduceDetail>,
    omega: Option<OmegaPrediction>,
    notes: Vec<String>,
}

/// Everything except the distribution
///
/// Split out so sampling can run on a blocking worker.
struct Draft {
    category: Category,
    metric: MetricKind,
    point: f64,
    confidence: f64,
    components: VarianceComponents,
    floor: f64,
    pillars: PillarSources,
    classification: Classification,
    produce: Option<ProduceDetail>,
    omega: Option<OmegaPrediction>,
    validation: ValidationResult,
    measurement: Option<MeasurementReport>,
    warnings: Vec<Warning>,
    notes: Vec<String>,
}

impl Draft {
    fn finish(self, distribution: Distribution) -> PredictionResult {
        let shares = self.components.shares();
        let pillar = |(contribution, source): (Option<f64>, String), share: Option<f64>| Pillar {
            contribution,
            variance_share: share.unwrap_or(0.0),
            source,
        };
        let pillars = PillarBreakdown {
            heritage: pillar(self.pillars.heritage, shares.map(|s| s.heritage)),
            soil: pillar(self.pillars.soil, shares.map(|s| s.soil)),
            agricultural: pillar(self.pillars.agricultural, shares.map(|s| s.agricultural)),
            ripen: pillar(self.pillars.ripen, shares.map(|s| s.ripen)),
        };

        PredictionResult {
            prediction_id: PredictionId::new(),
            category: self.category,
            primary_metric: PrimaryMetric::new(self.metric, self.point),
            quality_tier: tier_for(self.metric, self.point),
            confidence: self.confidence,
            confidence_level: ConfidenceLevel::from_score(self.confidence),
            confidence_interval: distribution.ci90,
            pillars,
            classification: self.classification,
            produce: self.produce,
            omega: self.omega,
            distribution,
            validation: self.validation,
            measurement: self.measurement,
            warnings: self.warnings,
            data_quality_notes: self.notes,
        }
    }
}

fn tier_for(metric: MetricKind, value: f64) -> QualityTier {
    match metric {
        MetricKind::OmegaRatio => OmegaGrade::for_ratio(value).quality_tier(),
        _ => tier_for_brix(value),
    }
}

/// Category-routing prediction orchestrator
///
/// Holds one instance of each component, built from a validated
/// [`EngineConfig`], and a read-only reference repository. Each prediction
/// pins the repository once, so a concurrent reload never mixes tables
/// within one result.
pub struct PredictionOrchestrator<R> {
    repository: R,
    config: EngineConfig,
    claims: ClaimInferenceEngine,
    brix: BrixPredictor,
    omega: OmegaPredictor,
    validator: PhysicalConstraintValidator,
    consistency: ProfileOmegaValidator,
    quantifier: UncertaintyQuantifier,
}

impl PredictionOrchestrator<InMemoryStore> {
    /// Orchestrator over the built-in reference tables
    pub fn with_builtin(config: EngineConfig) -> Result<Self, EngineError> {
        Self::new(InMemoryStore::new(), config)
    }
}

impl<R> PredictionOrchestrator<R>
where
    R: PinnableRepository,
    R::Error: Display,
{
    /// Create an orchestrator, validating the configuration first
    pub fn new(repository: R, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        Ok(Self {
            claims: ClaimInferenceEngine::new(config.claims.clone()),
            brix: BrixPredictor::new(config.brix.clone()),
            omega: OmegaPredictor::new(config.omega.clone()),
            validator: PhysicalConstraintValidator::new(config.validation.clone()),
            consistency: ProfileOmegaValidator::from_config(&config.validation),
            quantifier: UncertaintyQuantifier::new(config.uncertainty.clone()),
            repository,
            config,
        })
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the reference repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Claim inference engine
    pub fn claims(&self) -> &ClaimInferenceEngine {
        &self.claims
    }

    /// Brix predictor
    pub fn brix(&self) -> &BrixPredictor {
        &self.brix
    }

    /// Omega predictor
    pub fn omega(&self) -> &OmegaPredictor {
        &self.omega
    }

    /// Physical constraint validator
    pub fn validator(&self) -> &PhysicalConstraintValidator {
        &self.validator
    }

    /// Uncertainty quantifier
    pub fn quantifier(&self) -> &UncertaintyQuantifier {
        &self.quantifier
    }

    /// Predict synchronously, sampling on the calling thread
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, EngineError> {
        let draft = self.prepare(request)?;
        let distribution =
            self.quantifier
                .quantify(draft.point, &draft.components, draft.floor, request.n_samples);
        Ok(draft.finish(distribution))
    }

    /// Predict with Monte Carlo sampling moved to a blocking worker
    ///
    /// Classification and point prediction run on the caller's task; only
    /// the sampling loop is offloaded.
    pub async fn predict_offloaded(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, EngineError> {
        let draft = self.prepare(request)?;
        let quantifier = UncertaintyQuantifier::new(self.config.uncertainty.clone());
        let (point, components, floor, n_samples) =
            (draft.point, draft.components, draft.floor, request.n_samples);

        let distribution = tokio::task::spawn_blocking(move || {
            quantifier.quantify(point, &components, floor, n_samples)
        })
        .await?;

        Ok(draft.finish(distribution))
    }

    fn prepare(&self, request: &PredictionRequest) -> Result<Draft, EngineError> {
        let category = request.category;
        let metric = category.primary_metric();

        let reference = self.repository.pin().map_err(repo_err)?;
        let classification = self
            .claims
            .classify_from(&reference, category, &request.claims)?;

        let estimate = if category.is_animal() {
            info!(category = %category, predictor = "omega", "Routing prediction");
            self.estimate_omega(&reference, request.animal.as_ref(), &request.claims, &classification)?
        } else {
            info!(category = %category, predictor = "brix", "Routing prediction");
            self.estimate_brix(&reference, request.produce.as_ref(), &classification)?
        };

        let mut notes = estimate.notes;
        let mut warnings = classification.warnings.clone();

        let validation = self.validator.enforce_value(metric, estimate.point);
        let mut point = estimate.point;
        if !validation.is_valid {
            if let Some(corrected) = validation.corrected_value {
                warn!(point, corrected, "Point estimate outside physical range, clamped");
                notes.push(format!(
                    "Estimate {:.2} outside physical range; clamped to {:.2}",
                    point, corrected
                ));
                point = corrected;
            }
        }
        warnings.extend(validation.warnings.iter().cloned());

        let measurement = request
            .measurement
            .as_ref()
            .map(|m| self.check_measurement(category, &classification, m));
        if let Some(report) = &measurement {
            collect_measurement_warnings(report, &mut warnings, &mut notes);
        }

        let components = VarianceComponents::for_category(category).degraded_by(estimate.confidence);
        debug!(
            category = %category,
            point,
            confidence = estimate.confidence,
            total_std_dev = components.total_std_dev(),
            warnings = warnings.len(),
            "Prepared prediction"
        );

        Ok(Draft {
            category,
            metric,
            point,
            confidence: estimate.confidence,
            components,
            floor: physical_floor(metric),
            pillars: estimate.pillars,
            classification,
            produce: estimate.produce,
            omega: estimate.omega,
            validation,
            measurement,
            warnings,
            notes,
        })
    }

    fn estimate_brix(
        &self,
        reference: &R::Pinned,
        input: Option<&ProduceInput>,
        classification: &Classification,
    ) -> Result<CategoryEstimate, EngineError> {
        let default_input = ProduceInput::default();
        let input = input.unwrap_or(&default_input);
        let cfg = &self.config.brix;
        let mut notes = Vec::new();
        let mut degradations: Vec<String> = Vec::new();

        let cultivar = match input.cultivar_id.as_deref() {
            Some(id) => {
                let found = reference.cultivar(id).map_err(repo_err)?;
                if found.is_none() {
                    debug!(cultivar_id = %id, "Unknown cultivar");
                    notes.push(format!("Cultivar '{}' not found", id));
                }
                found
            }
            None => None,
        };
        let crop = cultivar
            .as_ref()
            .map(|c| c.crop.clone())
            .or_else(|| input.crop.clone());

        let (cultivar_base, heritage_source) = match (&cultivar, input.cultivar_base_brix) {
            (Some(c), _) => (c.base_brix, c.name.clone()),
            (None, Some(base)) => (base, "supplied base Brix".to_string()),
            (None, None) => {
                degradations.push("Cultivar unknown; base Brix taken from the claimed profile".to_string());
                let base = if classification.metric == MetricKind::Brix {
                    classification.expected_range.midpoint()
                } else {
                    cfg.commodity_brix
                };
                (base, format!("profile {}", classification.profile_id))
            }
        };

        let targets = match crop.as_deref() {
            Some(crop) => match reference.crop_targets(crop).map_err(repo_err)? {
                Some(targets) => targets,
                None => {
                    let resolved = crop_targets(crop);
                    if resolved.is_default {
                        debug!(crop = %crop, "Unknown crop, using default GDD targets");
                        degradations.push("Crop GDD targets unknown; defaults used".to_string());
                    }
                    resolved.targets
                }
            },
            None => {
                degradations.push("Crop unknown; default GDD targets used".to_string());
                GddTargets::DEFAULT
            }
        };

        let rootstock = match input.rootstock_id.as_deref() {
            Some(id) => {
                let found = reference.rootstock(id).map_err(repo_err)?;
                if found.is_none() {
                    notes.push(format!("Rootstock '{}' not found; no modifier applied", id));
                }
                found
            }
            None => None,
        };
        let rootstock_modifier = rootstock.as_ref().map_or(0.0, |r| r.brix_modifier);

        let region = match input.region_id.as_deref() {
            Some(id) => {
                let found = reference.region(id).map_err(repo_err)?;
                if found.is_none() {
                    debug!(region_id = %id, "Unknown region, using fallback daily GDD");
                    degradations.push(format!(
                        "Region '{}' not found; {:.1} GDD/day assumed",
                        id, cfg.fallback_avg_daily_gdd
                    ));
                }
                found
            }
            None => None,
        };
        let avg_daily_gdd = match &region {
            Some(r) => r.avg_daily_gdd,
            None => {
                if input.region_id.is_none() && input.as_of.is_some() {
                    notes.push(format!(
                        "No region given; {:.1} GDD/day assumed for projections",
                        cfg.fallback_avg_daily_gdd
                    ));
                }
                cfg.fallback_avg_daily_gdd
            }
        };

        let current_gdd = match input.current_gdd {
            Some(gdd) => gdd.max(0.0),
            None if !input.weather.is_empty() => cumulative_gdd(&input.weather, targets.base_temp),
            None => {
                degradations.push("No weather or GDD supplied; harvest at peak assumed".to_string());
                targets.gdd_to_peak
            }
        };

        let mut brix = self.brix.predict(&BrixRequest {
            cultivar_base,
            rootstock_modifier,
            tree_age_years: input.tree_age_years,
            current_gdd,
            peak_gdd: targets.gdd_to_peak,
            halfwidth: None,
            max_penalty: None,
        });
        for note in degradations {
            brix.degrade(cfg.default_targets_factor, note);
        }
        notes.extend(brix.notes.iter().cloned());

        let harvest_status = HarvestStatus::classify(current_gdd, &targets);
        let harvest_window = input.as_of.and_then(|today| {
            harvest_window(
                current_gdd,
                &targets,
                avg_daily_gdd,
                today,
                cfg.peak_half_window_days,
                cfg.post_peak_days,
            )
        });
        let peak_projection = input.as_of.map(|today| {
            project_to_target(
                current_gdd,
                targets.gdd_to_peak,
                &input.forecast,
                targets.base_temp,
                avg_daily_gdd,
                today,
            )
        });
        let sugar_acid = crop
            .as_deref()
            .and_then(|c| CropFamily::for_crop(c).sugar_acid_params())
            .map(|params| estimate_sugar_acid(current_gdd, &params, brix.predicted_brix));

        let soil_source = match (&rootstock, &region) {
            (Some(r), Some(g)) => format!("{} rootstock, {}", r.name, g.name),
            (Some(r), None) => format!("{} rootstock", r.name),
            (None, Some(g)) => g.name.clone(),
            (None, None) => "no rootstock".to_string(),
        };
        let agricultural_source = match input.tree_age_years {
            Some(age) => format!("tree age {} years", age),
            None => "tree age unknown".to_string(),
        };
        let pillars = PillarSources {
            heritage: (Some(brix.cultivar_base), heritage_source),
            soil: (Some(brix.rootstock_modifier), soil_source),
            agricultural: (Some(brix.age_modifier), agricultural_source),
            ripen: (
                Some(brix.timing_modifier),
                format!("{:.0} of {:.0} GDD to peak", current_gdd, targets.gdd_to_peak),
            ),
        };

        let produce = ProduceDetail {
            current_gdd,
            harvest_status,
            harvest_window,
            peak_projection,
            sugar_acid,
            vs_commodity_pct: brix.vs_commodity_pct(cfg.commodity_brix),
            quality_message: brix.quality_message().to_string(),
            brix,
        };

        Ok(CategoryEstimate {
            point: produce.brix.predicted_brix,
            confidence: produce.brix.confidence,
            pillars,
            produce: Some(produce),
            omega: None,
            notes,
        })
    }

    fn estimate_omega(
        &self,
        reference: &R::Pinned,
        input: Option<&AnimalInput>,
        claims: &[String],
        classification: &Classification,
    ) -> Result<CategoryEstimate, EngineError> {
        let default_input = AnimalInput::default();
        let input = input.unwrap_or(&default_input);

        let age = input
            .age_at_harvest_months
            .unwrap_or_else(|| total_duration_months(&input.diet));

        let (prediction, breed_source) = match input.breed_id.as_deref() {
            Some(id) => {
                let prediction =
                    self.omega
                        .predict_omega_ratio(reference, id, &input.diet, age)?;
                let source = if prediction.breed_known {
                    id.to_string()
                } else {
                    format!("{} (unknown breed)", id)
                };
                (prediction, source)
            }
            None => (
                self.omega.predict(None, &input.diet, age),
                "breed unknown".to_string(),
            ),
        };

        let mut notes = prediction.data_quality_notes.clone();
        let point = if input.diet.is_empty()
            && !claims.is_empty()
            && classification.metric == MetricKind::OmegaRatio
        {
            notes.push(format!(
                "No diet history; ratio taken from claimed profile {}",
                classification.profile_id
            ));
            classification.expected_range.midpoint()
        } else {
            prediction.ratio
        };

        let finishing = input
            .diet
            .last()
            .map(|p| format!("{} months {}", p.duration_months, p.diet_type.as_str()))
            .unwrap_or_else(|| "no finishing phase".to_string());
        let pillars = PillarSources {
            heritage: (None, breed_source),
            soil: (None, "not modeled for animal products".to_string()),
            agricultural: (
                Some(prediction.diet_contribution),
                format!("{} diet phases", input.diet.len()),
            ),
            ripen: (Some(prediction.finishing_penalty), finishing),
        };

        Ok(CategoryEstimate {
            point,
            confidence: prediction.confidence,
            pillars,
            produce: None,
            omega: Some(prediction),
            notes,
        })
    }

    fn check_measurement(
        &self,
        category: Category,
        classification: &Classification,
        measured: &MeasuredValue,
    ) -> MeasurementReport {
        let metric = category.primary_metric();
        let mut measurement = Measurement::new(category, measured.source).with(metric, measured.value);
        if let Some(ts) = measured.timestamp {
            measurement = measurement.at(ts);
        }

        let validation = self.validator.validate_measurement(&measurement);
        let usable = if validation.is_valid {
            Some(measured.value)
        } else {
            validation.corrected_value
        };
        let consistency = usable.map(|value| {
            self.consistency.check_range(
                classification.metric,
                classification.expected_range,
                value,
                &classification.profile_id,
            )
        });
        let anomaly = usable.and_then(|value| self.validator.detect_from_history(value, &measured.history));
        let data_quality = self.validator.data_quality(&measurement);

        MeasurementReport {
            value: measured.value,
            validation,
            consistency,
            anomaly,
            data_quality,
        }
    }
}

fn collect_measurement_warnings(
    report: &MeasurementReport,
    warnings: &mut Vec<Warning>,
    notes: &mut Vec<String>,
) {
    for error in &report.validation.errors {
        warnings.push(Warning::new(
            error.code.as_str(),
            Severity::Critical,
            format!("Measurement {}: {}", error.field, error.message),
        ));
    }
    warnings.extend(report.validation.warnings.iter().cloned());

    if let Some(check) = &report.consistency {
        if !check.is_consistent {
            warnings.push(Warning::new("PROFILE_INCONSISTENT", check.severity, check.message.clone()));
        }
    }
    if let Some(anomaly) = &report.anomaly {
        if anomaly.is_anomaly {
            let reason = anomaly
                .reason
                .clone()
                .unwrap_or_else(|| format!("z-score {:.2}", anomaly.z_score));
            warnings.push(Warning::new("ANOMALY", Severity::Warning, reason));
        }
    }
    notes.extend(report.data_quality.issues.iter().cloned());
    notes.extend(report.data_quality.recommendations.iter().cloned());
}

fn repo_err<E: Display>(e: E) -> EngineError {
    EngineError::Repository(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fielder_domain::{
        BreedRecord, CultivarRecord, DietPhase, DietType, Profile, RegionRecord, RootstockRecord,
    };
    use fielder_store::{PinnedSnapshot, StoreError};
    use fielder_validator::DataSource;

    fn orchestrator() -> PredictionOrchestrator<InMemoryStore> {
        let mut config = EngineConfig::default();
        config.uncertainty.seed = Some(42);
        config.uncertainty.n_samples = 2000;
        PredictionOrchestrator::with_builtin(config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.brix.default_halfwidth = -1.0;
        let result = PredictionOrchestrator::with_builtin(config);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_produce_routes_to_brix() {
        let request = PredictionRequest::new(Category::Produce).with_produce(ProduceInput {
            cultivar_id: Some("washington_navel".to_string()),
            rootstock_id: Some("carrizo".to_string()),
            tree_age_years: Some(12.0),
            current_gdd: Some(5100.0),
            ..Default::default()
        });
        let result = orchestrator().predict(&request).unwrap();

        assert_eq!(result.primary_metric.kind, MetricKind::Brix);
        assert!(result.omega.is_none());
        let produce = result.produce.as_ref().unwrap();
        assert_eq!(produce.brix.cultivar_base, 12.5);
        assert_eq!(produce.brix.rootstock_modifier, 0.6);
        assert_eq!(result.pillars.heritage.contribution, Some(12.5));
        assert!(result.confidence_interval.lower < result.primary_metric.value);
        assert!(result.confidence_interval.upper > result.primary_metric.value);
    }

    #[test]
    fn test_animal_routes_to_omega() {
        let request = PredictionRequest::new(Category::Beef).with_animal(AnimalInput {
            breed_id: Some("angus".to_string()),
            diet: vec![DietPhase::new(DietType::GrassOnly, 24.0)],
            age_at_harvest_months: Some(24.0),
        });
        let result = orchestrator().predict(&request).unwrap();

        assert_eq!(result.primary_metric.kind, MetricKind::OmegaRatio);
        assert!(result.produce.is_none());
        let omega = result.omega.as_ref().unwrap();
        assert_eq!(result.primary_metric.value, omega.ratio);
        assert!(result.pillars.heritage.contribution.is_none());
        assert!(result.distribution.percentiles.p5 >= 0.5);
    }

    #[test]
    fn test_empty_produce_input_degrades() {
        let result = orchestrator()
            .predict(&PredictionRequest::new(Category::Produce))
            .unwrap();
        let produce = result.produce.unwrap();
        assert!(produce.brix.confidence < 0.6);
        assert!(result
            .data_quality_notes
            .iter()
            .any(|n| n.contains("Cultivar unknown")));
    }

    #[test]
    fn test_empty_diet_uses_claimed_profile() {
        let request = PredictionRequest::new(Category::Beef).with_claims(["100% grass-fed"]);
        let result = orchestrator().predict(&request).unwrap();
        let expected = result.classification.expected_range.midpoint();
        assert_eq!(result.classification.profile_id, "A");
        assert!((result.primary_metric.value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_measurement_report_attached() {
        let request = PredictionRequest::new(Category::Beef)
            .with_claims(["pasture-raised", "no feedlot"])
            .with_measurement(18.0, DataSource::Lab);
        let result = orchestrator().predict(&request).unwrap();
        let check = result.consistency().unwrap();
        assert!(!check.is_consistent);
        assert!(result.warnings.iter().any(|w| w.code == "PROFILE_INCONSISTENT"));
    }

    #[test]
    fn test_invalid_measurement_skips_consistency() {
        let request = PredictionRequest::new(Category::Produce).with_measurement(f64::NAN, DataSource::Consumer);
        let result = orchestrator().predict(&request).unwrap();
        let report = result.measurement.unwrap();
        assert!(!report.validation.is_valid);
        assert!(report.consistency.is_none());
        assert!(result.warnings.iter().any(|w| w.severity == Severity::Critical));
    }

    #[test]
    fn test_each_prediction_gets_fresh_id() {
        let orch = orchestrator();
        let request = PredictionRequest::new(Category::Eggs);
        let a = orch.predict(&request).unwrap();
        let b = orch.predict(&request).unwrap();
        assert_ne!(a.prediction_id, b.prediction_id);
    }

    #[test]
    fn test_pillar_shares_sum_to_one() {
        let result = orchestrator()
            .predict(&PredictionRequest::new(Category::Pork))
            .unwrap();
        let p = &result.pillars;
        let total = p.heritage.variance_share
            + p.soil.variance_share
            + p.agricultural.variance_share
            + p.ripen.variance_share;
        assert!((total - 1.0).abs() < 1e-9);
    }

    /// Store that only answers through pinned views
    struct PinOnly {
        inner: InMemoryStore,
        pins: AtomicUsize,
    }

    fn direct<T>() -> Result<T, StoreError> {
        Err(StoreError::InvalidData("lookup outside a pinned view".to_string()))
    }

    impl ReferenceRepository for PinOnly {
        type Error = StoreError;

        fn cultivar(&self, _: &str) -> Result<Option<CultivarRecord>, StoreError> {
            direct()
        }
        fn rootstock(&self, _: &str) -> Result<Option<RootstockRecord>, StoreError> {
            direct()
        }
        fn breed(&self, _: &str) -> Result<Option<BreedRecord>, StoreError> {
            direct()
        }
        fn region(&self, _: &str) -> Result<Option<RegionRecord>, StoreError> {
            direct()
        }
        fn crop_targets(&self, _: &str) -> Result<Option<GddTargets>, StoreError> {
            direct()
        }
        fn profiles(&self, _: Category) -> Result<Vec<Profile>, StoreError> {
            direct()
        }
    }

    impl PinnableRepository for PinOnly {
        type Pinned = PinnedSnapshot;

        fn pin(&self) -> Result<PinnedSnapshot, StoreError> {
            self.pins.fetch_add(1, Ordering::SeqCst);
            self.inner.pin()
        }
    }

    #[test]
    fn test_one_pin_per_prediction() {
        let repo = PinOnly {
            inner: InMemoryStore::new(),
            pins: AtomicUsize::new(0),
        };
        let orch = PredictionOrchestrator::new(repo, EngineConfig::default()).unwrap();

        let produce = PredictionRequest::new(Category::Produce)
            .with_claims(["organic"])
            .with_produce(ProduceInput {
                cultivar_id: Some("washington_navel".to_string()),
                rootstock_id: Some("carrizo".to_string()),
                region_id: Some("indian_river".to_string()),
                current_gdd: Some(5100.0),
                ..Default::default()
            });
        let result = orch.predict(&produce).unwrap();
        assert_eq!(result.produce.unwrap().brix.cultivar_base, 12.5);

        let beef = PredictionRequest::new(Category::Beef)
            .with_claims(["grass-fed"])
            .with_animal(AnimalInput {
                breed_id: Some("angus".to_string()),
                diet: vec![DietPhase::new(DietType::GrassOnly, 24.0)],
                age_at_harvest_months: Some(24.0),
            });
        let result = orch.predict(&beef).unwrap();
        assert!(result.omega.unwrap().breed_known);

        assert_eq!(orch.repository().pins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_offloaded_matches_sync_with_seed() {
        let orch = orchestrator();
        let request = PredictionRequest::new(Category::Dairy).with_claims(["grass-fed"]);
        let sync = orch.predict(&request).unwrap();
        let offloaded = orch.predict_offloaded(&request).await.unwrap();
        assert_eq!(sync.primary_metric, offloaded.primary_metric);
        assert_eq!(sync.distribution, offloaded.distribution);
    }
}
