//! The allocation boundary consumed by columns.

use std::sync::Arc;

use mzcol_core::LayoutDescriptor;

use crate::error::StorageError;
use crate::region::Region;

/// Hands out fresh regions sized for a number of elements.
///
/// Implementations may serialise concurrent requests internally; columns
/// treat `allocate` as infrequent and possibly blocking. The returned
/// region's contents are unspecified from the caller's point of view:
/// columns always sentinel-initialise new slots themselves.
pub trait Storage: Send + Sync {
    /// Allocate a region of `element_count * layout.element_width()` bytes.
    fn allocate(
        &self,
        layout: &LayoutDescriptor,
        element_count: usize,
    ) -> Result<Region, StorageError>;
}

/// Shared handle to a storage, held by every column allocated from it.
pub type SharedStorage = Arc<dyn Storage>;

/// Byte size of `element_count` elements of `layout`.
pub fn region_bytes(layout: &LayoutDescriptor, element_count: usize) -> Result<usize, StorageError> {
    element_count
        .checked_mul(layout.element_width())
        .ok_or(StorageError::SizeOverflow {
            element_count,
            element_width: layout.element_width(),
        })
}
