//! Built-in reference tables not owned by a predictor crate

use fielder_domain::{CultivarRecord, RegionRecord, RootstockRecord};

const CULTIVARS: &[(&str, &str, &str, f64)] = &[
    ("washington_navel", "Washington Navel", "navel_orange", 12.5),
    ("cara_cara", "Cara Cara", "navel_orange", 13.0),
    ("valencia", "Valencia", "valencia", 13.5),
    ("ruby_red", "Ruby Red", "grapefruit", 11.0),
    ("rio_red", "Rio Red", "grapefruit", 11.5),
    ("honey_tangerine", "Honey Tangerine", "tangerine", 15.0),
    ("sumo_citrus", "Sumo Citrus", "tangerine", 16.0),
    ("clementine", "Clementine", "tangerine", 13.5),
    ("satsuma_owari", "Owari Satsuma", "satsuma", 12.5),
    ("albion", "Albion", "strawberry", 11.0),
    ("chandler", "Chandler", "strawberry", 10.5),
    ("brandywine", "Brandywine", "tomato", 8.0),
    ("cherokee_purple", "Cherokee Purple", "tomato", 7.5),
];

const ROOTSTOCKS: &[(&str, &str, f64)] = &[
    ("carrizo", "Carrizo Citrange", 0.6),
    ("c35", "C-35 Citrange", 0.5),
    ("sour_orange", "Sour Orange", 0.5),
    ("us_897", "US-897", 0.5),
    ("us_942", "US-942", 0.3),
    ("swingle", "Swingle Citrumelo", -0.5),
    ("rough_lemon", "Rough Lemon", -0.7),
];

const REGIONS: &[(&str, &str, f64)] = &[
    ("indian_river", "Indian River, FL", 11.5),
    ("central_ridge", "Central Ridge, FL", 12.0),
    ("central_florida", "Central Florida", 14.0),
    ("south_florida", "South Florida", 18.0),
    ("sweet_valley", "Sweet Valley, CA", 10.0),
    ("california_coastal", "California Coast", 8.0),
];

/// Built-in cultivars
pub fn cultivars() -> Vec<CultivarRecord> {
    CULTIVARS
        .iter()
        .map(|(id, name, crop, base_brix)| CultivarRecord {
            id: id.to_string(),
            name: name.to_string(),
            crop: crop.to_string(),
            base_brix: *base_brix,
        })
        .collect()
}

/// Built-in rootstocks
pub fn rootstocks() -> Vec<RootstockRecord> {
    ROOTSTOCKS
        .iter()
        .map(|(id, name, brix_modifier)| RootstockRecord {
            id: id.to_string(),
            name: name.to_string(),
            brix_modifier: *brix_modifier,
        })
        .collect()
}

/// Built-in growing regions
pub fn regions() -> Vec<RegionRecord> {
    REGIONS
        .iter()
        .map(|(id, name, avg_daily_gdd)| RegionRecord {
            id: id.to_string(),
            name: name.to_string(),
            avg_daily_gdd: *avg_daily_gdd,
        })
        .collect()
}
