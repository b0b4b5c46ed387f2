//! Claim inference engine
//!
//! Routes beef through the dedicated precedence tree and every other
//! category through the weighted scorer.

use fielder_domain::traits::ReferenceRepository;
use fielder_domain::{Category, Profile};

use crate::beef::BeefPrecedenceEngine;
use crate::catalog::builtin_profiles;
use crate::classification::Classification;
use crate::normalize::normalize_claims;
use crate::scorer::WeightedScorer;
use crate::{ClaimsConfig, ClaimsError};

/// Classifies marketing claims into category profiles
pub struct ClaimInferenceEngine {
    config: ClaimsConfig,
}

impl ClaimInferenceEngine {
    /// Create an engine with the given configuration
    pub fn new(config: ClaimsConfig) -> Self {
        Self { config }
    }

    /// Create an engine, validating the configuration first
    pub fn try_new(config: ClaimsConfig) -> Result<Self, ClaimsError> {
        config.validate().map_err(ClaimsError::Config)?;
        Ok(Self::new(config))
    }

    /// Get the engine configuration
    pub fn config(&self) -> &ClaimsConfig {
        &self.config
    }

    /// Classify raw claims against the built-in profile table
    ///
    /// Built-in tables always carry a fallback profile, so this only fails
    /// if one is edited to drop it.
    pub fn classify<S: AsRef<str>>(
        &self,
        category: Category,
        claims: &[S],
    ) -> Result<Classification, ClaimsError> {
        self.classify_with_profiles(category, claims, &builtin_profiles(category))
    }

    /// Classify raw claims against a caller-supplied profile table
    ///
    /// Beef profiles the tree needs but the table lacks are taken from the
    /// built-in beef table.
    pub fn classify_with_profiles<S: AsRef<str>>(
        &self,
        category: Category,
        claims: &[S],
        profiles: &[Profile],
    ) -> Result<Classification, ClaimsError> {
        let normalized = normalize_claims(claims);

        let classification = match category {
            Category::Beef => {
                let builtin = builtin_profiles(Category::Beef);
                BeefPrecedenceEngine::new(&self.config).classify(&normalized, profiles, &builtin)
            }
            _ => WeightedScorer::new(&self.config).classify(&normalized, profiles),
        }
        .ok_or_else(|| ClaimsError::NoProfile(category.to_string()))?;

        tracing::debug!(
            category = %category,
            strategy = classification.strategy.as_str(),
            profile = %classification.profile_id,
            confidence = classification.confidence,
            claims = normalized.len(),
            "Classified claims"
        );

        Ok(classification)
    }

    /// Classify raw claims against the profiles held by a repository
    ///
    /// An empty repository table falls back to the built-in profiles.
    pub fn classify_from<R, S>(
        &self,
        repo: &R,
        category: Category,
        claims: &[S],
    ) -> Result<Classification, ClaimsError>
    where
        R: ReferenceRepository,
        R::Error: std::fmt::Display,
        S: AsRef<str>,
    {
        let profiles = repo
            .profiles(category)
            .map_err(|e| ClaimsError::Repository(e.to_string()))?;

        if profiles.is_empty() {
            tracing::debug!(category = %category, "Repository has no profiles, using built-ins");
            return self.classify(category, claims);
        }

        self.classify_with_profiles(category, claims, &profiles)
    }
}

impl Default for ClaimInferenceEngine {
    fn default() -> Self {
        Self::new(ClaimsConfig::default())
    }
}
