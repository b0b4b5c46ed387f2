//! Built-in profile catalog
//!
//! One table per category, in declaration order (which breaks scoring ties).
//! Each table has exactly one fallback profile: the first commodity-tier
//! profile without required claims. Ranges are asserted calibration values.

use fielder_domain::{Category, MetricKind, MetricRange, Profile, QualityTier};

struct Row {
    id: &'static str,
    name: &'static str,
    required: &'static [&'static str],
    excluded: &'static [&'static str],
    optional: &'static [&'static str],
    range: (f64, f64),
    tier: QualityTier,
    confined: bool,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn build(category: Category, metric: MetricKind, rows: &[Row]) -> Vec<Profile> {
    rows
        .iter()
        .map(|s| Profile {
            id: s.id.to_string(),
            name: s.name.to_string(),
            category,
            required_claims: owned(s.required),
            excluded_claims: owned(s.excluded),
            optional_claims: owned(s.optional),
            metric,
            expected_range: MetricRange::new(s.range.0, s.range.1),
            quality_tier: s.tier,
            confined: s.confined,
        })
        .collect()
}

const BEEF: &[Row] = &[
    Row {
        id: "A",
        name: "100% grass-fed and finished",
        required: &["100% grass fed"],
        excluded: &[],
        optional: &["grass finished", "never confined"],
        range: (2.0, 3.0),
        tier: QualityTier::Artisan,
        confined: false,
    },
    Row {
        id: "B",
        name: "Pasture-raised, no feedlot",
        required: &["no feedlot"],
        excluded: &[],
        optional: &["pasture raised", "no cafo", "never confined"],
        range: (4.0, 6.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "C",
        name: "Grass-fed, finish unverified",
        required: &["grass fed"],
        excluded: &["grass finished", "no feedlot"],
        optional: &[],
        range: (8.0, 15.0),
        tier: QualityTier::Standard,
        confined: true,
    },
    Row {
        id: "D",
        name: "Pasture-raised, finish unverified",
        required: &["pasture raised"],
        excluded: &["no feedlot"],
        optional: &[],
        range: (10.0, 16.0),
        tier: QualityTier::Standard,
        confined: true,
    },
    Row {
        id: "E",
        name: "Commodity feedlot",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (15.0, 22.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
    Row {
        id: "E2",
        name: "Natural / no antibiotics / no hormones",
        required: &["natural"],
        excluded: &[],
        optional: &["no antibiotics", "no hormones"],
        range: (15.0, 22.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
    Row {
        id: "F",
        name: "Premium breed or grade, extended feedlot",
        required: &[],
        excluded: &["grass fed", "pasture raised", "no feedlot"],
        optional: &["wagyu", "angus", "prime", "choice"],
        range: (20.0, 26.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
];

const EGGS: &[Row] = &[
    Row {
        id: "eggs_pasture_soy_free",
        name: "Pasture-raised, soy-free",
        required: &["pasture raised", "soy free"],
        excluded: &[],
        optional: &["organic", "regenerative"],
        range: (1.5, 4.0),
        tier: QualityTier::Artisan,
        confined: false,
    },
    Row {
        id: "eggs_pasture_raised",
        name: "Pasture-raised",
        required: &["pasture raised"],
        excluded: &[],
        optional: &["organic", "non gmo"],
        range: (3.0, 8.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "eggs_omega3_enriched",
        name: "Omega-3 enriched",
        required: &["omega 3"],
        excluded: &[],
        optional: &["flax"],
        range: (3.0, 6.0),
        tier: QualityTier::Premium,
        confined: true,
    },
    Row {
        id: "eggs_free_range",
        name: "Free-range",
        required: &["free range"],
        excluded: &["pasture raised"],
        optional: &["organic"],
        range: (10.0, 15.0),
        tier: QualityTier::Standard,
        confined: false,
    },
    Row {
        id: "eggs_cage_free",
        name: "Cage-free",
        required: &["cage free"],
        excluded: &["pasture raised", "free range"],
        optional: &["organic"],
        range: (14.0, 20.0),
        tier: QualityTier::Standard,
        confined: true,
    },
    Row {
        id: "eggs_commodity",
        name: "Conventional eggs",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (15.0, 25.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
];

const POULTRY: &[Row] = &[
    Row {
        id: "poultry_pasture_raised",
        name: "Pasture-raised poultry",
        required: &["pasture raised"],
        excluded: &[],
        optional: &["heritage breed", "soy free", "organic"],
        range: (5.0, 9.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "poultry_organic_free_range",
        name: "Organic free-range poultry",
        required: &["organic", "free range"],
        excluded: &[],
        optional: &["air chilled"],
        range: (10.0, 14.0),
        tier: QualityTier::Standard,
        confined: false,
    },
    Row {
        id: "poultry_free_range",
        name: "Free-range poultry",
        required: &["free range"],
        excluded: &[],
        optional: &["air chilled"],
        range: (12.0, 16.0),
        tier: QualityTier::Standard,
        confined: true,
    },
    Row {
        id: "poultry_commodity",
        name: "Conventional poultry",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (15.0, 22.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
];

const PORK: &[Row] = &[
    Row {
        id: "pork_acorn_finished",
        name: "Forest-raised, acorn-finished",
        required: &["acorn finished"],
        excluded: &[],
        optional: &["heritage breed", "forest raised"],
        range: (6.0, 10.0),
        tier: QualityTier::Artisan,
        confined: false,
    },
    Row {
        id: "pork_pasture_raised",
        name: "Pasture-raised pork",
        required: &["pasture raised"],
        excluded: &[],
        optional: &["heritage breed", "no soy", "non gmo"],
        range: (8.0, 14.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "pork_heritage_breed",
        name: "Heritage breed pork",
        required: &["heritage breed"],
        excluded: &[],
        optional: &["berkshire", "duroc", "mangalitsa"],
        range: (12.0, 18.0),
        tier: QualityTier::Standard,
        confined: true,
    },
    Row {
        id: "pork_commodity",
        name: "Conventional pork",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (18.0, 28.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
];

const DAIRY: &[Row] = &[
    Row {
        id: "dairy_100_grass_fed",
        name: "100% grass-fed dairy",
        required: &["100% grass fed"],
        excluded: &[],
        optional: &["organic", "a2"],
        range: (1.0, 3.0),
        tier: QualityTier::Artisan,
        confined: false,
    },
    Row {
        id: "dairy_pasture_raised",
        name: "Pasture-raised dairy",
        required: &["pasture raised"],
        excluded: &[],
        optional: &["organic", "grass fed"],
        range: (2.0, 5.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "dairy_grass_fed",
        name: "Grass-fed dairy",
        required: &["grass fed"],
        excluded: &[],
        optional: &["organic"],
        range: (2.5, 6.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "dairy_organic",
        name: "Organic dairy",
        required: &["organic"],
        excluded: &[],
        optional: &[],
        range: (4.0, 7.0),
        tier: QualityTier::Standard,
        confined: false,
    },
    Row {
        id: "dairy_commodity",
        name: "Conventional dairy",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (5.0, 10.0),
        tier: QualityTier::Commodity,
        confined: true,
    },
];

const PRODUCE: &[Row] = &[
    Row {
        id: "produce_regenerative",
        name: "Regenerative, ripened on plant",
        required: &["regenerative"],
        excluded: &[],
        optional: &["tree ripened", "vine ripened", "heirloom", "organic"],
        range: (12.0, 16.0),
        tier: QualityTier::Artisan,
        confined: false,
    },
    Row {
        id: "produce_tree_ripened",
        name: "Tree-ripened",
        required: &["tree ripened"],
        excluded: &[],
        optional: &["heirloom", "local"],
        range: (11.0, 14.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "produce_vine_ripened",
        name: "Vine-ripened",
        required: &["vine ripened"],
        excluded: &[],
        optional: &["heirloom", "local"],
        range: (10.0, 13.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "produce_heirloom",
        name: "Heirloom variety",
        required: &["heirloom"],
        excluded: &[],
        optional: &["local", "organic"],
        range: (10.0, 14.0),
        tier: QualityTier::Premium,
        confined: false,
    },
    Row {
        id: "produce_organic",
        name: "Organic",
        required: &["organic"],
        excluded: &[],
        optional: &["local"],
        range: (9.0, 12.0),
        tier: QualityTier::Standard,
        confined: false,
    },
    Row {
        id: "produce_local",
        name: "Local",
        required: &["local"],
        excluded: &[],
        optional: &[],
        range: (9.0, 12.0),
        tier: QualityTier::Standard,
        confined: false,
    },
    Row {
        id: "produce_commodity",
        name: "Commodity produce",
        required: &[],
        excluded: &[],
        optional: &[],
        range: (6.0, 10.0),
        tier: QualityTier::Commodity,
        confined: false,
    },
];

/// Built-in profile table of a category, in declaration order
pub fn builtin_profiles(category: Category) -> Vec<Profile> {
    match category {
        Category::Beef => build(category, MetricKind::OmegaRatio, BEEF),
        Category::Eggs => build(category, MetricKind::OmegaRatio, EGGS),
        Category::Poultry => build(category, MetricKind::OmegaRatio, POULTRY),
        Category::Pork => build(category, MetricKind::OmegaRatio, PORK),
        Category::Dairy => build(category, MetricKind::OmegaRatio, DAIRY),
        Category::Produce => build(category, MetricKind::Brix, PRODUCE),
    }
}

/// The fallback profile: first commodity-tier profile without required claims
pub fn fallback_profile(profiles: &[Profile]) -> Option<&Profile> {
    profiles
        .iter()
        .find(|p| p.is_commodity() && p.required_claims.is_empty())
}
