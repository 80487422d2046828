//! Package index configuration
//!
//! Tunes the concurrent map backing [`PackageIndex`](crate::PackageIndex).
//! Defaults suit an index populated from a handful of archives; large game
//! installs benefit from a capacity hint sized to the expected package count.

use serde::{Deserialize, Serialize};

/// Configuration for a [`PackageIndex`](crate::PackageIndex)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageIndexConfig {
    /// Number of packages to reserve space for up front
    pub initial_capacity: usize,
    /// Explicit shard count for the concurrent map (None lets the map pick)
    pub shard_amount: Option<usize>,
}

impl PackageIndexConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity hint
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set an explicit shard count
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(shards) = self.shard_amount
            && (shards <= 1 || !shards.is_power_of_two())
        {
            return Err(format!(
                "shard_amount must be a power of two greater than 1, got {shards}"
            ));
        }

        Ok(())
    }
}
