//! Budgeted heap-backed storage.
//!
//! [`HeapStorage`] is the in-process [`Storage`] implementation: every
//! allocation is a zero-filled boxed slice, counted against a byte budget
//! with an atomic reservation so any number of columns can share one
//! storage. Budget is never returned when a region is dropped.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use mzcol_core::LayoutDescriptor;

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::region::Region;
use crate::storage::{region_bytes, SharedStorage, Storage};

/// Heap-backed storage with a fixed byte budget.
#[derive(Debug)]
pub struct HeapStorage {
    config: StorageConfig,
    /// Bytes handed out so far.
    allocated: AtomicU64,
    /// Number of successful `allocate` calls.
    allocations: AtomicUsize,
}

impl HeapStorage {
    /// Create a storage after validating `config`.
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        config.validate()?;
        Ok(Self {
            config,
            allocated: AtomicU64::new(0),
            allocations: AtomicUsize::new(0),
        })
    }

    /// Create a storage and wrap it for sharing between columns.
    pub fn shared(config: StorageConfig) -> Result<SharedStorage, StorageError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// The configuration this storage was built with.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Total bytes allocated so far.
    pub fn allocated_bytes(&self) -> u64 {
        self.allocated.load(Ordering::Acquire)
    }

    /// Bytes still available under the budget.
    pub fn remaining_bytes(&self) -> u64 {
        self.config.max_bytes.saturating_sub(self.allocated_bytes())
    }

    /// Number of regions handed out.
    pub fn allocation_count(&self) -> usize {
        self.allocations.load(Ordering::Acquire)
    }

    fn reserve(&self, bytes: u64) -> Result<(), StorageError> {
        let max = self.config.max_bytes;
        self.allocated
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(bytes).filter(|&total| total <= max)
            })
            .map(|_| ())
            .map_err(|used| StorageError::ResourceExhausted {
                requested: bytes,
                available: max.saturating_sub(used),
            })
    }

    fn release(&self, bytes: u64) {
        self.allocated.fetch_sub(bytes, Ordering::AcqRel);
    }
}

impl Storage for HeapStorage {
    fn allocate(
        &self,
        layout: &LayoutDescriptor,
        element_count: usize,
    ) -> Result<Region, StorageError> {
        let bytes = region_bytes(layout, element_count)?;
        let requested = bytes as u64;
        if requested > self.config.max_region_bytes {
            tracing::warn!(
                storage = %self.config.name,
                requested,
                limit = self.config.max_region_bytes,
                "region exceeds single-allocation limit"
            );
            return Err(StorageError::ResourceExhausted {
                requested,
                available: self.config.max_region_bytes.min(self.remaining_bytes()),
            });
        }
        if let Err(err) = self.reserve(requested) {
            tracing::warn!(storage = %self.config.name, %err, "allocation refused");
            return Err(err);
        }
        let region = match Region::try_zeroed(bytes) {
            Ok(region) => region,
            Err(err) => {
                self.release(requested);
                return Err(err);
            }
        };
        self.allocations.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(
            storage = %self.config.name,
            bytes,
            elements = element_count,
            element_width = layout.element_width(),
            "region allocated"
        );
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mzcol_core::FieldKind;

    fn f64_layout() -> LayoutDescriptor {
        LayoutDescriptor::scalar(FieldKind::F64)
    }

    #[test]
    fn allocate_sizes_by_element_width() {
        let storage = HeapStorage::new(StorageConfig::new("test")).unwrap();
        let region = storage.allocate(&f64_layout(), 10).unwrap();
        assert_eq!(region.len(), 80);
        assert_eq!(storage.allocated_bytes(), 80);
        assert_eq!(storage.allocation_count(), 1);
    }

    #[test]
    fn allocated_region_is_zeroed() {
        let storage = HeapStorage::new(StorageConfig::new("test")).unwrap();
        let region = storage.allocate(&f64_layout(), 4).unwrap();
        assert!(region.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn budget_is_enforced() {
        let storage = HeapStorage::new(StorageConfig::new("tiny").with_max_bytes(100)).unwrap();
        storage.allocate(&f64_layout(), 10).unwrap();
        let result = storage.allocate(&f64_layout(), 10);
        assert_eq!(
            result.unwrap_err(),
            StorageError::ResourceExhausted {
                requested: 80,
                available: 20,
            }
        );
        // A refused allocation consumes nothing.
        assert_eq!(storage.allocated_bytes(), 80);
        assert_eq!(storage.allocation_count(), 1);
    }

    #[test]
    fn region_limit_is_enforced() {
        let config = StorageConfig::new("r").with_max_region_bytes(64);
        let storage = HeapStorage::new(config).unwrap();
        assert!(storage.allocate(&f64_layout(), 8).is_ok());
        assert!(matches!(
            storage.allocate(&f64_layout(), 9),
            Err(StorageError::ResourceExhausted { .. })
        ));
    }

    #[test]
    fn dropped_regions_keep_budget() {
        let storage = HeapStorage::new(StorageConfig::new("arena")).unwrap();
        drop(storage.allocate(&f64_layout(), 2).unwrap());
        assert_eq!(storage.allocated_bytes(), 16);
    }

    #[test]
    fn size_overflow_is_reported() {
        let storage = HeapStorage::new(StorageConfig::new("o")).unwrap();
        assert!(matches!(
            storage.allocate(&f64_layout(), usize::MAX),
            Err(StorageError::SizeOverflow { .. })
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let result = HeapStorage::new(StorageConfig::new("bad").with_max_bytes(0));
        assert!(matches!(result, Err(StorageError::InvalidConfig { .. })));
    }

    #[test]
    fn shared_storage_is_usable_across_threads() {
        let storage = HeapStorage::shared(StorageConfig::new("mt")).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || storage.allocate(&f64_layout(), 16).unwrap().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 128);
        }
    }
}
