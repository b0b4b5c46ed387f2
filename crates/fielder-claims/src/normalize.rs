//! Claim normalization and phrase matching
//!
//! Claims arrive as free marketing text ("100% Grass-Fed!", "pasture_raised").
//! Normalization lowercases, turns `-`, `_` and `/` into spaces, strips other
//! punctuation (keeping `%`), collapses whitespace and trims. Phrases are
//! matched on whole-word boundaries so that "grass fed" matches
//! "100% grass fed" but "fed" does not match "feedlot".

/// Normalize one claim
///
/// ```
/// use fielder_claims::normalize_claim;
///
/// assert_eq!(normalize_claim("  100% Grass-Fed! "), "100% grass fed");
/// assert_eq!(normalize_claim("No-CAFO"), "no cafo");
/// ```
pub fn normalize_claim(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '%' {
                Some(c.to_lowercase().next().unwrap_or(c))
            } else if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
                Some(' ')
            } else {
                None
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a list of claims, dropping empties and duplicates (first wins)
pub fn normalize_claims<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for claim in raw {
        let normalized = normalize_claim(claim.as_ref());
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

/// Whether a normalized claim contains a phrase on word boundaries
///
/// The phrase is normalized the same way as claims.
pub fn contains_phrase(claim: &str, phrase: &str) -> bool {
    let phrase = normalize_claim(phrase);
    if phrase.is_empty() {
        return false;
    }
    let padded_claim = format!(" {} ", claim);
    let padded_phrase = format!(" {} ", phrase);
    padded_claim.contains(&padded_phrase)
}

/// Claims that contain at least one of the phrases, in input order
pub fn matching<'a>(claims: &'a [String], phrases: &[&str]) -> Vec<&'a String> {
    claims
        .iter()
        .filter(|c| phrases.iter().any(|p| contains_phrase(c, p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation_and_case() {
        assert_eq!(normalize_claim("Pasture-Raised"), "pasture raised");
        assert_eq!(normalize_claim("pasture_raised"), "pasture raised");
        assert_eq!(normalize_claim("Grass/Fed"), "grass fed");
        assert_eq!(normalize_claim("No Antibiotics, Ever!"), "no antibiotics ever");
        assert_eq!(normalize_claim("  "), "");
    }

    #[test]
    fn test_normalize_keeps_percent() {
        assert_eq!(normalize_claim("100%   grass-fed"), "100% grass fed");
    }

    #[test]
    fn test_normalize_claims_dedups() {
        let claims = normalize_claims(&["Grass-Fed", "grass fed", "", "Wagyu"]);
        assert_eq!(claims, vec!["grass fed".to_string(), "wagyu".to_string()]);
    }

    #[test]
    fn test_phrase_word_boundaries() {
        assert!(contains_phrase("100% grass fed", "grass fed"));
        assert!(contains_phrase("100% grass fed", "Grass-Fed"));
        assert!(!contains_phrase("feedlot free", "fed"));
        assert!(!contains_phrase("grassland beef", "grass"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn test_matching_preserves_order() {
        let claims = normalize_claims(&["wagyu", "grass fed", "local"]);
        let found = matching(&claims, &["local", "wagyu"]);
        assert_eq!(found, vec!["wagyu", "local"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize_claim(&raw);
            prop_assert_eq!(normalize_claim(&once), once.clone());
            prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
            prop_assert!(!once.contains("  "));
        }
    }
}
