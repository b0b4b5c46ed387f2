//! Breed reference data and maturity

use fielder_domain::{BreedRecord, MarblingPotential};

/// Built-in breed table
pub fn builtin_breeds() -> Vec<BreedRecord> {
    let breed = |id: &str, name: &str, maturity_months: f64, marbling_potential| BreedRecord {
        id: id.to_string(),
        name: name.to_string(),
        maturity_months,
        marbling_potential,
    };
    vec![
        breed("angus", "Angus", 20.0, MarblingPotential::High),
        breed("red_angus", "Red Angus", 20.0, MarblingPotential::High),
        breed("hereford", "Hereford", 20.0, MarblingPotential::Moderate),
        breed("american_wagyu", "American Wagyu", 28.0, MarblingPotential::VeryHigh),
        breed("wagyu", "Wagyu (Fullblood)", 30.0, MarblingPotential::VeryHigh),
        breed("devon", "Devon", 24.0, MarblingPotential::Moderate),
        breed("galloway", "Galloway", 26.0, MarblingPotential::Moderate),
        breed("highland", "Highland", 30.0, MarblingPotential::Moderate),
        breed("charolais", "Charolais", 18.0, MarblingPotential::Low),
        breed("limousin", "Limousin", 18.0, MarblingPotential::Low),
        breed("simmental", "Simmental", 18.0, MarblingPotential::Moderate),
        breed("holstein", "Holstein", 16.0, MarblingPotential::Low),
    ]
}

/// Confidence factor from how close the animal is to target maturity
///
/// `< 75%` of target maturity gives 0.6, `< 90%` gives 0.8, `< 100%` gives
/// 0.95, at or past maturity 1.0.
pub fn maturity_factor(age_months: f64, target_maturity_months: f64) -> f64 {
    if target_maturity_months <= 0.0 {
        return 1.0;
    }
    let fraction = age_months / target_maturity_months;
    if fraction < 0.75 {
        0.6
    } else if fraction < 0.9 {
        0.8
    } else if fraction < 1.0 {
        0.95
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_bands() {
        assert_eq!(maturity_factor(10.0, 20.0), 0.6);
        assert_eq!(maturity_factor(16.0, 20.0), 0.8);
        assert_eq!(maturity_factor(19.0, 20.0), 0.95);
        assert_eq!(maturity_factor(20.0, 20.0), 1.0);
        assert_eq!(maturity_factor(40.0, 20.0), 1.0);
    }

    #[test]
    fn test_builtin_breeds_unique() {
        let breeds = builtin_breeds();
        let mut ids: Vec<&str> = breeds.iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), breeds.len());
        assert!(breeds.iter().any(|b| b.id == "american_wagyu"));
    }
}
