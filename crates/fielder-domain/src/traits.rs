//! Trait definitions for external interactions
//!
//! The prediction crates never embed lookup tables for cultivars, rootstocks,
//! breeds or regions. They read them through this boundary; implementations
//! live in other crates.

use crate::{BreedRecord, Category, CultivarRecord, GddTargets, Profile, RegionRecord, RootstockRecord};

/// Read-only access to reference data
///
/// Implemented by the infrastructure layer (fielder-store). A lookup that
/// finds nothing returns `Ok(None)`; callers substitute defaults and lower
/// their confidence. `Err` is reserved for the store itself failing.
pub trait ReferenceRepository {
    /// Error type for repository operations
    type Error;

    /// Look up a cultivar by id
    fn cultivar(&self, id: &str) -> Result<Option<CultivarRecord>, Self::Error>;

    /// Look up a rootstock by id
    fn rootstock(&self, id: &str) -> Result<Option<RootstockRecord>, Self::Error>;

    /// Look up a breed by id
    fn breed(&self, id: &str) -> Result<Option<BreedRecord>, Self::Error>;

    /// Look up a growing region by id
    fn region(&self, id: &str) -> Result<Option<RegionRecord>, Self::Error>;

    /// Thermal-time targets of a crop
    fn crop_targets(&self, crop: &str) -> Result<Option<GddTargets>, Self::Error>;

    /// Profile table of a category, in declaration order
    fn profiles(&self, category: Category) -> Result<Vec<Profile>, Self::Error>;
}

/// Reference data whose contents may be replaced between calls
///
/// [`pin`](Self::pin) fixes a view of the current contents. Every lookup made
/// through one pinned view sees the same tables, even if the source is
/// reloaded in the meantime.
pub trait PinnableRepository: ReferenceRepository {
    /// Fixed view of the contents at the time of pinning
    type Pinned: ReferenceRepository<Error = Self::Error>;

    /// Pin the current contents
    fn pin(&self) -> Result<Self::Pinned, Self::Error>;
}
