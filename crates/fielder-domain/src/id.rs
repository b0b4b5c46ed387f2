//! Prediction identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a prediction result, based on UUIDv7
///
/// Every call to the orchestrator produces a fresh result with a fresh id;
/// results are never cached, so the id only serves correlation in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(uuid::Uuid);

impl PredictionId {
    /// Generate a new UUIDv7-based PredictionId
    ///
    /// # Examples
    ///
    /// ```
    /// use fielder_domain::PredictionId;
    ///
    /// let id = PredictionId::new();
    /// assert!(id.timestamp() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a PredictionId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0.as_u128() >> 80) as u64
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
