//! Immutable reference snapshots and TOML overlays

use std::collections::HashMap;

use fielder_domain::{
    BreedRecord, Category, CultivarRecord, GddTargets, Profile, RegionRecord, RootstockRecord,
};
use serde::{Deserialize, Serialize};

use crate::builtin;

/// Canonical lookup key: lowercase, `_` separated
pub fn lookup_key(id: &str) -> String {
    fielder_produce::crop_key(id)
}

/// One consistent, read-only view of every reference table
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    cultivars: HashMap<String, CultivarRecord>,
    rootstocks: HashMap<String, RootstockRecord>,
    breeds: HashMap<String, BreedRecord>,
    regions: HashMap<String, RegionRecord>,
    crop_targets: HashMap<String, GddTargets>,
    profiles: HashMap<Category, Vec<Profile>>,
}

impl ReferenceSnapshot {
    /// Snapshot holding only the built-in tables
    pub fn builtin() -> Self {
        let mut snapshot = Self::default();
        for c in builtin::cultivars() {
            snapshot.cultivars.insert(lookup_key(&c.id), c);
        }
        for r in builtin::rootstocks() {
            snapshot.rootstocks.insert(lookup_key(&r.id), r);
        }
        for b in fielder_omega::builtin_breeds() {
            snapshot.breeds.insert(lookup_key(&b.id), b);
        }
        for r in builtin::regions() {
            snapshot.regions.insert(lookup_key(&r.id), r);
        }
        for (crop, targets) in fielder_produce::builtin_crop_targets() {
            snapshot.crop_targets.insert(lookup_key(crop), targets);
        }
        for category in Category::ALL {
            snapshot
                .profiles
                .insert(category, fielder_claims::builtin_profiles(category));
        }
        snapshot
    }

    /// A new snapshot with the overlay applied on top of this one
    ///
    /// Records replace same-id records; profiles given for a category
    /// replace that category's whole table, in the overlay's order.
    pub fn with_overlay(&self, overlay: ReferenceOverlay) -> Result<Self, String> {
        overlay.validate()?;
        let mut next = self.clone();

        for c in overlay.cultivars {
            next.cultivars.insert(lookup_key(&c.id), c);
        }
        for r in overlay.rootstocks {
            next.rootstocks.insert(lookup_key(&r.id), r);
        }
        for b in overlay.breeds {
            next.breeds.insert(lookup_key(&b.id), b);
        }
        for r in overlay.regions {
            next.regions.insert(lookup_key(&r.id), r);
        }
        for (crop, targets) in overlay.crop_targets {
            next.crop_targets.insert(lookup_key(&crop), targets);
        }

        let mut replaced: HashMap<Category, Vec<Profile>> = HashMap::new();
        for p in overlay.profiles {
            replaced.entry(p.category).or_default().push(p);
        }
        next.profiles.extend(replaced);

        Ok(next)
    }

    /// Cultivar by id
    pub fn cultivar(&self, id: &str) -> Option<&CultivarRecord> {
        self.cultivars.get(&lookup_key(id))
    }

    /// Rootstock by id
    pub fn rootstock(&self, id: &str) -> Option<&RootstockRecord> {
        self.rootstocks.get(&lookup_key(id))
    }

    /// Breed by id
    pub fn breed(&self, id: &str) -> Option<&BreedRecord> {
        self.breeds.get(&lookup_key(id))
    }

    /// Region by id
    pub fn region(&self, id: &str) -> Option<&RegionRecord> {
        self.regions.get(&lookup_key(id))
    }

    /// GDD targets of a crop
    pub fn crop_targets(&self, crop: &str) -> Option<GddTargets> {
        self.crop_targets.get(&lookup_key(crop)).copied()
    }

    /// Profile table of a category, in declaration order
    pub fn profiles(&self, category: Category) -> &[Profile] {
        self.profiles.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record counts per table, for logging
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            cultivars: self.cultivars.len(),
            rootstocks: self.rootstocks.len(),
            breeds: self.breeds.len(),
            regions: self.regions.len(),
            crop_targets: self.crop_targets.len(),
            profiles: self.profiles.values().map(Vec::len).sum(),
        }
    }
}

/// Record counts of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCounts {
    /// Cultivars
    pub cultivars: usize,
    /// Rootstocks
    pub rootstocks: usize,
    /// Breeds
    pub breeds: usize,
    /// Regions
    pub regions: usize,
    /// Crop target sets
    pub crop_targets: usize,
    /// Profiles across all categories
    pub profiles: usize,
}

/// Reference records loaded from a TOML file
///
/// ```toml
/// [[cultivars]]
/// id = "shamouti"
/// name = "Shamouti"
/// crop = "navel_orange"
/// base_brix = 12.0
///
/// [crop_targets.kumquat]
/// base_temp = 50.0
/// gdd_to_maturity = 2400.0
/// gdd_to_peak = 2700.0
/// gdd_window = 300.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceOverlay {
    /// Cultivars to add or replace
    pub cultivars: Vec<CultivarRecord>,
    /// Rootstocks to add or replace
    pub rootstocks: Vec<RootstockRecord>,
    /// Breeds to add or replace
    pub breeds: Vec<BreedRecord>,
    /// Regions to add or replace
    pub regions: Vec<RegionRecord>,
    /// Crop targets keyed by crop
    pub crop_targets: HashMap<String, GddTargets>,
    /// Profiles; each category present replaces its built-in table
    pub profiles: Vec<Profile>,
}

impl ReferenceOverlay {
    /// Parse an overlay from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Check records are usable before they reach a snapshot
    pub fn validate(&self) -> Result<(), String> {
        for (crop, targets) in &self.crop_targets {
            targets
                .validate()
                .map_err(|e| format!("crop_targets.{}: {}", crop, e))?;
        }
        for b in &self.breeds {
            if b.maturity_months <= 0.0 {
                return Err(format!("breed {}: maturity_months must be greater than 0", b.id));
            }
        }
        for r in &self.regions {
            if r.avg_daily_gdd < 0.0 {
                return Err(format!("region {}: avg_daily_gdd cannot be negative", r.id));
            }
        }

        let mut categories: Vec<Category> = self.profiles.iter().map(|p| p.category).collect();
        categories.sort();
        categories.dedup();
        for category in categories {
            let table: Vec<Profile> = self
                .profiles
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect();
            if category != Category::Beef && fielder_claims::fallback_profile(&table).is_none() {
                return Err(format!(
                    "profiles for {} need a commodity-tier profile without required claims",
                    category
                ));
            }
            let mut ids: Vec<&str> = table.iter().map(|p| p.id.as_str()).collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            if ids.len() != before {
                return Err(format!("profiles for {} have duplicate ids", category));
            }
        }
        Ok(())
    }
}
