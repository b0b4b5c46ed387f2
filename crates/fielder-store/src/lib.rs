//! Fielder Storage Layer
//!
//! In-memory, read-only implementation of
//! [`fielder_domain::traits::ReferenceRepository`].
//!
//! # Architecture
//!
//! - Built-in tables come from the predictor crates (profiles, breeds, crop
//!   targets) plus the cultivar, rootstock and region tables here
//! - A TOML overlay can add or replace records
//! - Readers take an `Arc` of the current [`ReferenceSnapshot`]; a reload
//!   builds a new snapshot and swaps the `Arc`, so in-flight readers keep
//!   the snapshot they started with
//!
//! # Examples
//!
//! ```
//! use fielder_domain::traits::{PinnableRepository, ReferenceRepository};
//! use fielder_store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let carrizo = store.rootstock("carrizo").unwrap().unwrap();
//! assert_eq!(carrizo.brix_modifier, 0.6);
//! ```

#![warn(missing_docs)]

mod builtin;
mod snapshot;

use std::path::Path;
use std::sync::{Arc, RwLock};

use fielder_domain::traits::{PinnableRepository, ReferenceRepository};
use fielder_domain::{
    BreedRecord, Category, CultivarRecord, GddTargets, Profile, RegionRecord, RootstockRecord,
};
use thiserror::Error;

pub use snapshot::{lookup_key, ReferenceOverlay, ReferenceSnapshot, SnapshotCounts};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Overlay file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Overlay could not be parsed or failed validation
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A writer panicked while holding the snapshot lock
    #[error("Snapshot lock poisoned")]
    Poisoned,
}

/// Reference repository over a swappable immutable snapshot
///
/// # Thread Safety
///
/// `InMemoryStore` is `Send + Sync`. Lookups hold the lock only long enough
/// to clone the `Arc`.
pub struct InMemoryStore {
    current: RwLock<Arc<ReferenceSnapshot>>,
}

impl InMemoryStore {
    /// Create a store holding the built-in tables
    pub fn new() -> Self {
        Self::with_snapshot(ReferenceSnapshot::builtin())
    }

    /// Create a store holding the given snapshot
    pub fn with_snapshot(snapshot: ReferenceSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Create a store from the built-in tables overlaid with a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let store = Self::new();
        store.reload_file(path)?;
        Ok(store)
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Result<Arc<ReferenceSnapshot>, StoreError> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| StoreError::Poisoned)
    }

    /// Replace the current snapshot
    pub fn swap(&self, snapshot: ReferenceSnapshot) -> Result<(), StoreError> {
        let counts = snapshot.counts();
        let mut guard = self.current.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Arc::new(snapshot);
        tracing::info!(
            cultivars = counts.cultivars,
            rootstocks = counts.rootstocks,
            breeds = counts.breeds,
            regions = counts.regions,
            crop_targets = counts.crop_targets,
            profiles = counts.profiles,
            "Reference snapshot swapped"
        );
        Ok(())
    }

    /// Rebuild from the built-in tables plus a TOML overlay and swap it in
    ///
    /// On error the current snapshot stays in place.
    pub fn reload_toml(&self, toml_str: &str) -> Result<(), StoreError> {
        let overlay = ReferenceOverlay::from_toml(toml_str).map_err(StoreError::InvalidData)?;
        let next = ReferenceSnapshot::builtin()
            .with_overlay(overlay)
            .map_err(StoreError::InvalidData)?;
        self.swap(next)
    }

    /// Like [`reload_toml`](Self::reload_toml), reading the overlay from a file
    pub fn reload_file<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading reference overlay");
        let text = std::fs::read_to_string(path)?;
        self.reload_toml(&text)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceRepository for InMemoryStore {
    type Error = StoreError;

    fn cultivar(&self, id: &str) -> Result<Option<CultivarRecord>, Self::Error> {
        self.pin()?.cultivar(id)
    }

    fn rootstock(&self, id: &str) -> Result<Option<RootstockRecord>, Self::Error> {
        self.pin()?.rootstock(id)
    }

    fn breed(&self, id: &str) -> Result<Option<BreedRecord>, Self::Error> {
        self.pin()?.breed(id)
    }

    fn region(&self, id: &str) -> Result<Option<RegionRecord>, Self::Error> {
        self.pin()?.region(id)
    }

    fn crop_targets(&self, crop: &str) -> Result<Option<GddTargets>, Self::Error> {
        self.pin()?.crop_targets(crop)
    }

    fn profiles(&self, category: Category) -> Result<Vec<Profile>, Self::Error> {
        self.pin()?.profiles(category)
    }
}

impl PinnableRepository for InMemoryStore {
    type Pinned = PinnedSnapshot;

    fn pin(&self) -> Result<PinnedSnapshot, StoreError> {
        self.snapshot().map(PinnedSnapshot)
    }
}

/// Repository view held on one snapshot
///
/// Returned by [`InMemoryStore::pin`]. Later reloads of the store are not
/// visible through it.
#[derive(Debug, Clone)]
pub struct PinnedSnapshot(Arc<ReferenceSnapshot>);

impl PinnedSnapshot {
    /// The snapshot this view holds
    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.0
    }
}

impl ReferenceRepository for PinnedSnapshot {
    type Error = StoreError;

    fn cultivar(&self, id: &str) -> Result<Option<CultivarRecord>, Self::Error> {
        Ok(self.0.cultivar(id).cloned())
    }

    fn rootstock(&self, id: &str) -> Result<Option<RootstockRecord>, Self::Error> {
        Ok(self.0.rootstock(id).cloned())
    }

    fn breed(&self, id: &str) -> Result<Option<BreedRecord>, Self::Error> {
        Ok(self.0.breed(id).cloned())
    }

    fn region(&self, id: &str) -> Result<Option<RegionRecord>, Self::Error> {
        Ok(self.0.region(id).cloned())
    }

    fn crop_targets(&self, crop: &str) -> Result<Option<GddTargets>, Self::Error> {
        Ok(self.0.crop_targets(crop))
    }

    fn profiles(&self, category: Category) -> Result<Vec<Profile>, Self::Error> {
        Ok(self.0.profiles(category).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let store = InMemoryStore::new();
        assert_eq!(store.cultivar("cara_cara").unwrap().unwrap().base_brix, 13.0);
        assert!(store.breed("angus").unwrap().is_some());
        assert!(store.crop_targets("peach").unwrap().is_some());
        assert!(store.region("atlantis").unwrap().is_none());
        assert_eq!(store.profiles(Category::Beef).unwrap().len(), 7);
    }

    #[test]
    fn test_failed_reload_keeps_snapshot() {
        let store = InMemoryStore::new();
        let before = store.snapshot().unwrap();
        assert!(store.reload_toml("[[breeds]]\nid = 3").is_err());
        let after = store.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_readers_keep_old_snapshot() {
        let store = InMemoryStore::new();
        let held = store.snapshot().unwrap();
        store
            .reload_toml(
                "[[rootstocks]]\nid = \"carrizo\"\nname = \"Carrizo\"\nbrix_modifier = 0.9\n",
            )
            .unwrap();

        assert_eq!(held.rootstock("carrizo").unwrap().brix_modifier, 0.6);
        assert_eq!(store.rootstock("carrizo").unwrap().unwrap().brix_modifier, 0.9);
    }

    #[test]
    fn test_pinned_view_ignores_reload() {
        let store = InMemoryStore::new();
        let pinned = store.pin().unwrap();
        store
            .reload_toml(
                "[[cultivars]]\nid = \"cara_cara\"\nname = \"Cara Cara\"\ncrop = \"navel_orange\"\nbase_brix = 14.5\n",
            )
            .unwrap();

        assert_eq!(pinned.cultivar("cara_cara").unwrap().unwrap().base_brix, 13.0);
        assert_eq!(store.cultivar("cara_cara").unwrap().unwrap().base_brix, 14.5);
        assert!(!Arc::ptr_eq(&pinned.0, &store.snapshot().unwrap()));
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryStore>();
    }
}
