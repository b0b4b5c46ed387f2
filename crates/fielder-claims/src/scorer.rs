//! Generic weighted scorer
//!
//! Scores every candidate profile of a category:
//! `required_score` when all required claims match (otherwise the profile is
//! disqualified), plus `optional_score` per matched optional claim. A matched
//! excluded claim sets the score to `excluded_score` and disqualifies. The
//! highest qualifying score wins, ties going to the earlier profile. With no
//! qualifier the category's fallback profile is used.

use fielder_domain::{Profile, Warning};

use crate::catalog::fallback_profile;
use crate::classification::{Classification, Strategy};
use crate::normalize::contains_phrase;
use crate::ClaimsConfig;

/// Score of one candidate profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileScore {
    /// Profile id
    pub profile_id: String,
    /// Score
    pub score: i32,
    /// Whether the profile may win
    pub qualified: bool,
    /// Claims that matched required or optional phrases
    pub matched: Vec<String>,
    /// Optional claims matched
    pub optional_matches: usize,
}

/// Generic weighted-score engine
pub struct WeightedScorer<'a> {
    config: &'a ClaimsConfig,
}

impl<'a> WeightedScorer<'a> {
    /// Create a scorer borrowing the shared configuration
    pub fn new(config: &'a ClaimsConfig) -> Self {
        Self { config }
    }

    /// Score a single profile against normalized claims
    pub fn score(&self, profile: &Profile, claims: &[String]) -> ProfileScore {
        let hit = |phrase: &String| claims.iter().any(|c| contains_phrase(c, phrase));

        if profile.excluded_claims.iter().any(|p| hit(p)) {
            return ProfileScore {
                profile_id: profile.id.clone(),
                score: self.config.excluded_score,
                qualified: false,
                matched: Vec::new(),
                optional_matches: 0,
            };
        }

        if !profile.required_claims.iter().all(|p| hit(p)) {
            return ProfileScore {
                profile_id: profile.id.clone(),
                score: 0,
                qualified: false,
                matched: Vec::new(),
                optional_matches: 0,
            };
        }

        let optional_matches = profile.optional_claims.iter().filter(|p| hit(p)).count();
        let matched = claims
            .iter()
            .filter(|c| {
                profile
                    .required_claims
                    .iter()
                    .chain(&profile.optional_claims)
                    .any(|p| contains_phrase(c, p))
            })
            .cloned()
            .collect();

        ProfileScore {
            profile_id: profile.id.clone(),
            score: self.config.required_score + self.config.optional_score * optional_matches as i32,
            qualified: true,
            matched,
            optional_matches,
        }
    }

    /// Classify normalized claims against a profile table
    ///
    /// Returns `None` only when the table is empty of both qualifiers and a
    /// fallback profile.
    pub fn classify(&self, claims: &[String], profiles: &[Profile]) -> Option<Classification> {
        let fallback = fallback_profile(profiles);

        let mut best: Option<(&Profile, ProfileScore)> = None;
        for profile in profiles {
            if fallback.is_some_and(|f| std::ptr::eq(f, profile)) {
                continue;
            }
            let scored = self.score(profile, claims);
            tracing::trace!(profile = %scored.profile_id, score = scored.score, qualified = scored.qualified, "Scored profile");
            if !scored.qualified {
                continue;
            }
            // strict comparison keeps the earlier profile on ties
            if best.as_ref().map_or(true, |(_, b)| scored.score > b.score) {
                best = Some((profile, scored));
            }
        }

        let recognized = |c: &String| {
            profiles.iter().any(|p| {
                p.required_claims
                    .iter()
                    .chain(&p.optional_claims)
                    .chain(&p.excluded_claims)
                    .any(|phrase| contains_phrase(c, phrase))
            })
        };
        let unrecognized: Vec<String> = claims.iter().filter(|c| !recognized(c)).cloned().collect();

        let mut classification = match best {
            Some((profile, scored)) => {
                let distinct = scored.matched.len();
                let mut confidence = (self.config.scorer_base_confidence
                    + self.config.scorer_optional_confidence * scored.optional_matches as f64)
                    .min(self.config.scorer_max_confidence);
                if distinct >= self.config.multi_claim_threshold {
                    confidence = confidence.max(self.config.multi_claim_confidence);
                }
                let mut c = Classification::from_profile(profile, Strategy::WeightedScore, confidence);
                c.score = Some(scored.score);
                c.matched_claims = scored.matched;
                c
            }
            None => {
                let profile = fallback?;
                let mut c = Classification::from_profile(
                    profile,
                    Strategy::WeightedScore,
                    self.config.fallback_confidence,
                );
                c.warnings.push(Warning::info(
                    "COMMODITY_FALLBACK",
                    "No profile qualified for these claims; commodity profile assumed",
                ));
                c
            }
        };

        for claim in &unrecognized {
            classification.warnings.push(Warning::info(
                "UNRECOGNIZED_CLAIM",
                format!("Claim '{}' is not recognized for {}", claim, classification.category),
            ));
        }
        classification.unrecognized_claims = unrecognized;
        Some(classification)
    }
}
