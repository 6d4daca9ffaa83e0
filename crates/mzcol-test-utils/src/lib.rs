//! Test utilities and instrumented storage for mzcol development.
//!
//! Provides [`CountingStorage`], a [`Storage`] wrapper that records every
//! allocation request and can be told to fail, plus fixture universes in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mzcol_arena::{HeapStorage, Region, SharedStorage, Storage, StorageConfig, StorageError};
use mzcol_core::LayoutDescriptor;

/// One recorded `allocate` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationRecord {
    pub element_count: usize,
    pub element_width: usize,
}

/// Storage wrapper that counts allocations and can inject failures.
///
/// Wraps a [`HeapStorage`] with an unlimited-for-tests default budget.
/// Use [`CountingStorage::fail_after`] to make the n-th and later
/// allocations return [`StorageError::ResourceExhausted`].
pub struct CountingStorage {
    inner: HeapStorage,
    calls: AtomicUsize,
    /// Allocation index from which requests fail; `usize::MAX` = never.
    fail_from: AtomicUsize,
    log: Mutex<Vec<AllocationRecord>>,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::with_config(StorageConfig::new("counting"))
    }

    /// Wrap a heap storage built from `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            inner: HeapStorage::new(config).expect("valid test storage config"),
            calls: AtomicUsize::new(0),
            fail_from: AtomicUsize::new(usize::MAX),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Build and return both the typed handle and a [`SharedStorage`] to it.
    pub fn shared() -> (Arc<Self>, SharedStorage) {
        let storage = Arc::new(Self::new());
        let shared: SharedStorage = storage.clone();
        (storage, shared)
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.inner.allocation_count()
    }

    /// All `allocate` calls, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Element counts requested by each call, in order.
    pub fn requests(&self) -> Vec<AllocationRecord> {
        self.log.lock().expect("allocation log poisoned").clone()
    }

    /// Make every call after the first `successful` calls fail.
    pub fn fail_after(&self, successful: usize) {
        self.fail_from.store(successful, Ordering::SeqCst);
    }

    /// The wrapped heap storage.
    pub fn inner(&self) -> &HeapStorage {
        &self.inner
    }
}

impl Default for CountingStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for CountingStorage {
    fn allocate(
        &self,
        layout: &LayoutDescriptor,
        element_count: usize,
    ) -> Result<Region, StorageError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .expect("allocation log poisoned")
            .push(AllocationRecord {
                element_count,
                element_width: layout.element_width(),
            });
        if call >= self.fail_from.load(Ordering::SeqCst) {
            return Err(StorageError::ResourceExhausted {
                requested: (element_count * layout.element_width()) as u64,
                available: 0,
            });
        }
        self.inner.allocate(layout, element_count)
    }
}

/// Plain heap storage for tests that do not need instrumentation.
pub fn heap_storage() -> SharedStorage {
    Arc::new(HeapStorage::new(StorageConfig::new("test")).expect("valid test storage config"))
}
