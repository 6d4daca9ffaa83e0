//! Storage configuration parameters.

use crate::error::StorageError;

/// Configuration for a [`HeapStorage`](crate::HeapStorage).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Diagnostic label, e.g. `"feature-list"` or `"mass-list"`.
    pub name: String,

    /// Total bytes this storage may hand out over its lifetime.
    ///
    /// Default: 4 GiB. Regions superseded by column growth still count:
    /// the budget models a backing file that only grows.
    pub max_bytes: u64,

    /// Largest single region in bytes.
    ///
    /// Default: 2 GiB. Must not exceed `max_bytes`.
    pub max_region_bytes: u64,
}

impl StorageConfig {
    /// Default total budget: 4 GiB.
    pub const DEFAULT_MAX_BYTES: u64 = 4 * 1024 * 1024 * 1024;

    /// Default single-region limit: 2 GiB.
    pub const DEFAULT_MAX_REGION_BYTES: u64 = 2 * 1024 * 1024 * 1024;

    /// Create a config with the given label and default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_bytes: Self::DEFAULT_MAX_BYTES,
            max_region_bytes: Self::DEFAULT_MAX_REGION_BYTES,
        }
    }

    /// Set the total budget. Lowers `max_region_bytes` to match if needed.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self.max_region_bytes = self.max_region_bytes.min(max_bytes);
        self
    }

    /// Set the single-region limit.
    pub fn with_max_region_bytes(mut self, max_region_bytes: u64) -> Self {
        self.max_region_bytes = max_region_bytes;
        self
    }

    /// Check limits for consistency.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.max_bytes == 0 {
            return Err(StorageError::InvalidConfig {
                reason: "max_bytes must be > 0".to_string(),
            });
        }
        if self.max_region_bytes == 0 || self.max_region_bytes > self.max_bytes {
            return Err(StorageError::InvalidConfig {
                reason: format!(
                    "max_region_bytes must be in 1..={} (got {})",
                    self.max_bytes, self.max_region_bytes,
                ),
            });
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("default")
    }
}
