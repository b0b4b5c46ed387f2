//! Beef precedence tree
//!
//! A short-circuit decision tree over beef claims. Order matters and is
//! fixed:
//!
//! 1. CAFO-exclusion claims win over everything. With a full-grass claim the
//!    result is `A`, otherwise `B`.
//! 2. "grass fed" gives `C` (also when "pasture raised" is present).
//! 3. "pasture raised" gives `D`.
//! 4. Breed or grade claims with no process claim give `F`. Saying nothing
//!    about production while naming a premium breed signals extended
//!    feedlot finishing.
//! 5. Natural-family claims ("natural", "no antibiotics", "no hormones")
//!    give `E2`. They say nothing about diet, so they are not process claims
//!    and are checked after breed.
//! 6. Nothing recognized gives `E`.

use fielder_domain::{Profile, Severity, Warning};

use crate::classification::{Classification, Strategy};
use crate::normalize::{contains_phrase, matching};
use crate::ClaimsConfig;

/// Claims establishing 100% grass feeding through finish
pub const FULL_GRASS: &[&str] = &[
    "100% grass fed",
    "100% grass",
    "grass finished",
    "grass fed and finished",
    "grass fed finished",
    "grass fed grass finished",
];

/// Claims ruling out confinement finishing (full-grass claims included)
pub const CAFO_EXCLUSION: &[&str] = &[
    "100% grass fed",
    "100% grass",
    "grass finished",
    "grass fed and finished",
    "grass fed finished",
    "grass fed grass finished",
    "no feedlot",
    "no cafo",
    "never confined",
    "never in a feedlot",
];

/// Grass-fed claims that do not speak to finishing
pub const GRASS_FED: &[&str] = &["grass fed"];

/// Pasture claims that do not speak to finishing
pub const PASTURE: &[&str] = &["pasture raised", "pastured", "pasture fed"];

/// Breed and grade claims
pub const BREED_GRADE: &[&str] = &[
    "wagyu",
    "american wagyu",
    "kobe",
    "akaushi",
    "angus",
    "black angus",
    "certified angus",
    "hereford",
    "prime",
    "usda prime",
    "choice",
    "usda choice",
    "marbled",
];

/// Drug-use and "natural" claims; not process claims
pub const NATURAL: &[&str] = &[
    "natural",
    "all natural",
    "no antibiotics",
    "antibiotic free",
    "no hormones",
    "no added hormones",
    "hormone free",
    "never ever",
];

/// Beef profile ids in the precedence tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeefProfile {
    /// 100% grass-fed and finished
    A,
    /// No feedlot, not certified 100% grass
    B,
    /// Grass-fed only
    C,
    /// Pasture-raised only
    D,
    /// No recognized claims
    E,
    /// Natural-family claims only
    E2,
    /// Breed/grade claims only
    F,
}

impl BeefProfile {
    /// Profile id in the beef table
    pub fn id(&self) -> &'static str {
        match self {
            BeefProfile::A => "A",
            BeefProfile::B => "B",
            BeefProfile::C => "C",
            BeefProfile::D => "D",
            BeefProfile::E => "E",
            BeefProfile::E2 => "E2",
            BeefProfile::F => "F",
        }
    }
}

/// Decision of the tree before it is bound to a profile record
#[derive(Debug, Clone, PartialEq)]
pub struct BeefDecision {
    /// Chosen profile
    pub profile: BeefProfile,
    /// Claims in the deciding group
    pub distinguishing: Vec<String>,
    /// Every claim recognized by any rule
    pub recognized: Vec<String>,
    /// Templated caveats
    pub warnings: Vec<Warning>,
}

/// Run the precedence tree over normalized claims
pub fn decide(claims: &[String]) -> BeefDecision {
    let exclusion = matching(claims, CAFO_EXCLUSION);
    let full_grass = matching(claims, FULL_GRASS);
    let grass = matching(claims, GRASS_FED);
    let pasture = matching(claims, PASTURE);
    let breed = matching(claims, BREED_GRADE);
    let natural = matching(claims, NATURAL);

    let mut warnings = Vec::new();

    let (profile, distinguishing) = if !exclusion.is_empty() {
        if full_grass.is_empty() {
            warnings.push(Warning::new(
                "GRAIN_ON_PASTURE_POSSIBLE",
                Severity::Info,
                "No-feedlot claim without a 100% grass claim: grain supplementation on pasture is possible",
            ));
            (BeefProfile::B, exclusion)
        } else {
            (BeefProfile::A, exclusion)
        }
    } else if !grass.is_empty() {
        warnings.push(Warning::new(
            "FINISH_UNVERIFIED",
            Severity::Warning,
            "'Grass-fed' alone does not rule out grain finishing in a feedlot",
        ));
        if !pasture.is_empty() {
            warnings.push(Warning::info(
                "PASTURE_IMPLIED",
                "Pasture claim adds nothing beyond grass-fed without a finishing claim",
            ));
        }
        let mut group = grass;
        group.extend(pasture.iter().copied());
        (BeefProfile::C, group)
    } else if !pasture.is_empty() {
        warnings.push(Warning::new(
            "FINISH_UNVERIFIED",
            Severity::Warning,
            "'Pasture-raised' alone does not rule out feedlot finishing",
        ));
        (BeefProfile::D, pasture)
    } else if !breed.is_empty() {
        warnings.push(Warning::new(
            "SILENT_ON_PRODUCTION",
            Severity::Warning,
            "Breed or grade claims without any production claim usually indicate extended grain finishing",
        ));
        (BeefProfile::F, breed)
    } else if !natural.is_empty() {
        warnings.push(Warning::info(
            "NOT_A_DIET_CLAIM",
            "Natural, antibiotic and hormone claims say nothing about diet; fatty-acid profile matches commodity",
        ));
        (BeefProfile::E2, natural)
    } else {
        warnings.push(Warning::info(
            "NO_PRODUCTION_CLAIMS",
            "No recognized production claims; commodity feedlot production assumed",
        ));
        (BeefProfile::E, Vec::new())
    };

    let recognized: Vec<String> = claims
        .iter()
        .filter(|c| {
            [CAFO_EXCLUSION, GRASS_FED, PASTURE, BREED_GRADE, NATURAL]
                .iter()
                .any(|group| group.iter().any(|p| contains_phrase(c, p)))
        })
        .cloned()
        .collect();

    BeefDecision {
        profile,
        distinguishing: dedup(distinguishing),
        recognized,
        warnings,
    }
}

fn dedup(claims: Vec<&String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(claims.len());
    for c in claims {
        if !out.contains(c) {
            out.push(c.clone());
        }
    }
    out
}

/// Dedicated beef engine
pub struct BeefPrecedenceEngine<'a> {
    config: &'a ClaimsConfig,
}

impl<'a> BeefPrecedenceEngine<'a> {
    /// Create an engine borrowing the shared configuration
    pub fn new(config: &'a ClaimsConfig) -> Self {
        Self { config }
    }

    /// Classify normalized claims against the beef profile table
    ///
    /// `profiles` must hold the tree's profile ids; a missing id is looked
    /// up in `fallback_table` instead.
    pub fn classify(
        &self,
        claims: &[String],
        profiles: &[Profile],
        fallback_table: &[Profile],
    ) -> Option<Classification> {
        let decision = decide(claims);
        let id = decision.profile.id();
        let profile = profiles
            .iter()
            .chain(fallback_table)
            .find(|p| p.id == id)?;

        let base = self.base_confidence(decision.profile);
        let confidence = if decision.distinguishing.len() >= self.config.multi_claim_threshold {
            base.max(self.config.multi_claim_confidence)
        } else {
            base
        };

        let mut classification = Classification::from_profile(profile, Strategy::PrecedenceTree, confidence);
        classification.unrecognized_claims = claims
            .iter()
            .filter(|c| !decision.recognized.contains(*c))
            .cloned()
            .collect();
        classification.matched_claims = decision.recognized;
        classification.warnings = decision.warnings;
        Some(classification)
    }

    fn base_confidence(&self, profile: BeefProfile) -> f64 {
        let b = &self.config.beef;
        match profile {
            BeefProfile::A => b.a,
            BeefProfile::B => b.b,
            BeefProfile::C => b.c,
            BeefProfile::D => b.d,
            BeefProfile::E => b.e,
            BeefProfile::E2 => b.e2,
            BeefProfile::F => b.f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_claims;

    fn run(raw: &[&str]) -> BeefProfile {
        decide(&normalize_claims(raw)).profile
    }

    #[test]
    fn test_full_grass_is_a() {
        assert_eq!(run(&["100% grass-fed"]), BeefProfile::A);
        assert_eq!(run(&["Grass Finished"]), BeefProfile::A);
    }

    #[test]
    fn test_ampersand_form_is_full_grass() {
        assert_eq!(run(&["Grass-Fed & Finished"]), BeefProfile::A);
    }

    #[test]
    fn test_exclusion_without_full_grass_is_b() {
        assert_eq!(run(&["no feedlot"]), BeefProfile::B);
        assert_eq!(run(&["pasture-raised", "no feedlot"]), BeefProfile::B);
        assert_eq!(run(&["Never Confined", "wagyu"]), BeefProfile::B);
    }

    #[test]
    fn test_exclusion_overrides_everything() {
        assert_eq!(
            run(&["wagyu", "natural", "grass-fed", "no CAFO", "100% grass fed"]),
            BeefProfile::A
        );
    }

    #[test]
    fn test_grass_fed_is_c() {
        assert_eq!(run(&["grass-fed"]), BeefProfile::C);
        assert_eq!(run(&["grass fed", "pasture raised"]), BeefProfile::C);
        assert_eq!(run(&["wagyu", "grass-fed"]), BeefProfile::C);
    }

    #[test]
    fn test_pasture_is_d() {
        assert_eq!(run(&["pasture-raised"]), BeefProfile::D);
        assert_eq!(run(&["Pastured", "angus"]), BeefProfile::D);
    }

    #[test]
    fn test_breed_without_process_is_f() {
        assert_eq!(run(&["wagyu"]), BeefProfile::F);
        assert_eq!(run(&["USDA Prime", "Black Angus"]), BeefProfile::F);
    }

    #[test]
    fn test_breed_checked_before_natural() {
        assert_eq!(run(&["angus", "all natural"]), BeefProfile::F);
    }

    #[test]
    fn test_natural_only_is_e2() {
        assert_eq!(run(&["natural"]), BeefProfile::E2);
        assert_eq!(run(&["No Antibiotics", "no added hormones"]), BeefProfile::E2);
    }

    #[test]
    fn test_nothing_is_e() {
        assert_eq!(run(&[]), BeefProfile::E);
        assert_eq!(run(&["delicious", "family farm"]), BeefProfile::E);
    }

    #[test]
    fn test_feedlot_word_is_not_grass_fed() {
        // "fed" inside another word must not trigger grass-fed
        assert_eq!(run(&["feedlot finished"]), BeefProfile::E);
    }

    #[test]
    fn test_distinguishing_and_recognized() {
        let d = decide(&normalize_claims(&["no feedlot", "no cafo", "tasty"]));
        assert_eq!(d.profile, BeefProfile::B);
        assert_eq!(d.distinguishing.len(), 2);
        assert_eq!(d.recognized, vec!["no feedlot".to_string(), "no cafo".to_string()]);
    }
}
