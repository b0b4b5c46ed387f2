//! Sugar and acid development curves
//!
//! Soluble solids (SSC, °Brix) rise along a logistic curve in thermal time
//! and titratable acidity (TA, %) decays exponentially. BrimA, the flavor
//! index, is `SSC - 4 * TA`.

use crate::targets::crop_key;
use serde::{Deserialize, Serialize};

/// Crop families sharing a sugar/acid and post-harvest model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropFamily {
    /// Oranges, grapefruit, mandarins (also pomegranate)
    Citrus,
    /// Strawberries and similar highly perishable berries
    Berry,
    /// Blueberries
    Blueberry,
    /// Tomatoes
    Tomato,
    /// Peaches and other stone fruit
    Peach,
    /// Sweet and tart cherries
    Cherry,
    /// Apples
    Apple,
    /// Pears
    Pear,
    /// Mangoes
    Mango,
    /// Pecans (oil content, no sugar curve)
    Pecan,
}

impl CropFamily {
    /// Family of a crop key; unknown crops fall back to citrus
    pub fn for_crop(crop: &str) -> Self {
        match crop_key(crop).as_str() {
            "navel_orange" | "valencia" | "grapefruit" | "tangerine" | "satsuma" | "pomegranate" => {
                CropFamily::Citrus
            }
            "strawberry" | "berry" => CropFamily::Berry,
            "blueberry" => CropFamily::Blueberry,
            "tomato" => CropFamily::Tomato,
            "peach" | "nectarine" => CropFamily::Peach,
            "cherry" | "sweet_cherry" | "tart_cherry" => CropFamily::Cherry,
            "apple" => CropFamily::Apple,
            "pear" => CropFamily::Pear,
            "mango" => CropFamily::Mango,
            "pecan" => CropFamily::Pecan,
            _ => CropFamily::Citrus,
        }
    }

    /// Get the family name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CropFamily::Citrus => "citrus",
            CropFamily::Berry => "berry",
            CropFamily::Blueberry => "blueberry",
            CropFamily::Tomato => "tomato",
            CropFamily::Peach => "peach",
            CropFamily::Cherry => "cherry",
            CropFamily::Apple => "apple",
            CropFamily::Pear => "pear",
            CropFamily::Mango => "mango",
            CropFamily::Pecan => "pecan",
        }
    }

    /// GDD base temperature of the family model (°F)
    pub fn base_temp(&self) -> f64 {
        match self {
            CropFamily::Citrus => 55.0,
            CropFamily::Berry | CropFamily::Tomato => 50.0,
            CropFamily::Blueberry | CropFamily::Peach => 45.0,
            CropFamily::Cherry | CropFamily::Pear => 40.0,
            CropFamily::Apple => 43.0,
            CropFamily::Mango => 60.0,
            CropFamily::Pecan => 65.0,
        }
    }

    /// Sugar/acid curve parameters; `None` for nut crops
    pub fn sugar_acid_params(&self) -> Option<SugarAcidParams> {
        let logistic = |ssc_min, dd50, s, ta0, ka| SugarAcidParams {
            curve: SugarCurve::Logistic { ssc_min, dd50, s },
            ta0,
            ka,
        };
        match self {
            CropFamily::Citrus => Some(logistic(6.0, 5500.0, 900.0, 3.0, 0.00025)),
            CropFamily::Berry => Some(SugarAcidParams {
                curve: SugarCurve::Linear { gdd_to_full: 1500.0 },
                ta0: 1.5,
                ka: 0.0008,
            }),
            CropFamily::Blueberry => Some(logistic(8.0, 1300.0, 150.0, 0.5, 0.0006)),
            CropFamily::Tomato => Some(logistic(3.5, 1200.0, 200.0, 0.8, 0.0006)),
            CropFamily::Peach => Some(logistic(8.0, 1900.0, 200.0, 1.0, 0.0008)),
            CropFamily::Cherry => Some(logistic(10.0, 1400.0, 80.0, 0.8, 0.0006)),
            CropFamily::Apple => Some(logistic(10.0, 2300.0, 300.0, 0.8, 0.0003)),
            CropFamily::Pear => Some(logistic(10.0, 1900.0, 250.0, 0.5, 0.0004)),
            CropFamily::Mango => Some(logistic(10.0, 3000.0, 400.0, 0.6, 0.0005)),
            CropFamily::Pecan => None,
        }
    }
}

/// Shape of sugar accumulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SugarCurve {
    /// `ssc_min + (ssc_max - ssc_min) / (1 + exp(-(gdd - dd50) / s))`
    Logistic {
        /// Early-season SSC
        ssc_min: f64,
        /// GDD at 50% sugar development
        dd50: f64,
        /// Steepness (GDD)
        s: f64,
    },
    /// Proportional rise reaching `ssc_max` at `gdd_to_full`
    Linear {
        /// GDD at which the ceiling is reached
        gdd_to_full: f64,
    },
}

/// Parameters of the sugar and acid curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SugarAcidParams {
    /// Sugar curve
    pub curve: SugarCurve,
    /// Initial titratable acidity (%)
    pub ta0: f64,
    /// Acid decay rate per GDD
    pub ka: f64,
}

impl Default for SugarAcidParams {
    fn default() -> Self {
        Self {
            curve: SugarCurve::Logistic {
                ssc_min: 6.0,
                dd50: 2050.0,
                s: 350.0,
            },
            ta0: 3.0,
            ka: 0.0005,
        }
    }
}

/// Sugar/acid state at a point in thermal time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SugarAcidEstimate {
    /// Soluble solids (°Brix)
    pub ssc: f64,
    /// Titratable acidity (%)
    pub ta: f64,
    /// SSC:TA ratio, zero when TA is zero
    pub ratio: f64,
    /// Flavor index `SSC - 4 * TA`
    pub brima: f64,
    /// GDD the estimate was made at
    pub gdd: f64,
}

/// Logistic soluble-solids curve
pub fn logistic_ssc(gdd: f64, ssc_min: f64, ssc_max: f64, dd50: f64, s: f64) -> f64 {
    if s <= 0.0 {
        return if gdd >= dd50 { ssc_max } else { ssc_min };
    }
    ssc_min + (ssc_max - ssc_min) / (1.0 + (-(gdd - dd50) / s).exp())
}

/// Exponential acid decay `TA0 * exp(-ka * gdd)`
pub fn acid_decay(gdd: f64, ta0: f64, ka: f64) -> f64 {
    ta0 * (-ka * gdd).exp()
}

/// Estimate SSC, TA, ratio and BrimA at `gdd` for a cultivar ceiling `ssc_max`
pub fn estimate_sugar_acid(gdd: f64, params: &SugarAcidParams, ssc_max: f64) -> SugarAcidEstimate {
    let ssc = match params.curve {
        SugarCurve::Logistic { ssc_min, dd50, s } => logistic_ssc(gdd, ssc_min, ssc_max, dd50, s),
        SugarCurve::Linear { gdd_to_full } => {
            if gdd >= gdd_to_full || gdd_to_full <= 0.0 {
                ssc_max
            } else {
                ssc_max * (gdd.max(0.0) / gdd_to_full)
            }
        }
    };
    let ta = acid_decay(gdd, params.ta0, params.ka);
    let ratio = if ta > 0.0 { ssc / ta } else { 0.0 };
    SugarAcidEstimate {
        ssc,
        ta,
        ratio,
        brima: ssc - 4.0 * ta,
        gdd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logistic_midpoint() {
        let ssc = logistic_ssc(2050.0, 6.0, 12.0, 2050.0, 350.0);
        assert!((ssc - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_bounds() {
        assert!(logistic_ssc(-1e6, 6.0, 12.0, 2050.0, 350.0) > 5.999);
        assert!(logistic_ssc(1e6, 6.0, 12.0, 2050.0, 350.0) < 12.0 + 1e-9);
    }

    #[test]
    fn test_acid_decays() {
        assert_eq!(acid_decay(0.0, 3.0, 0.0005), 3.0);
        assert!(acid_decay(4000.0, 3.0, 0.0005) < acid_decay(2000.0, 3.0, 0.0005));
    }

    #[test]
    fn test_estimate_default_params() {
        let est = estimate_sugar_acid(2050.0, &SugarAcidParams::default(), 12.0);
        let ta = 3.0 * (-0.0005f64 * 2050.0).exp();
        assert!((est.ssc - 9.0).abs() < 1e-9);
        assert!((est.ta - ta).abs() < 1e-12);
        assert!((est.brima - (9.0 - 4.0 * ta)).abs() < 1e-9);
        assert!((est.ratio - 9.0 / ta).abs() < 1e-9);
    }

    #[test]
    fn test_zero_acid_ratio() {
        let params = SugarAcidParams {
            ta0: 0.0,
            ..SugarAcidParams::default()
        };
        assert_eq!(estimate_sugar_acid(1000.0, &params, 12.0).ratio, 0.0);
    }

    #[test]
    fn test_berry_linear() {
        let params = CropFamily::Berry.sugar_acid_params().unwrap();
        assert_eq!(estimate_sugar_acid(750.0, &params, 10.0).ssc, 5.0);
        assert_eq!(estimate_sugar_acid(2000.0, &params, 10.0).ssc, 10.0);
    }

    #[test]
    fn test_family_lookup() {
        assert_eq!(CropFamily::for_crop("valencia"), CropFamily::Citrus);
        assert_eq!(CropFamily::for_crop("Sweet Cherry"), CropFamily::Cherry);
        assert_eq!(CropFamily::for_crop("kiwi"), CropFamily::Citrus);
        assert!(CropFamily::Pecan.sugar_acid_params().is_none());
        assert_eq!(CropFamily::Apple.base_temp(), 43.0);
    }
}
