//! The growable column and its growth algorithm.
//!
//! A [`Column`] owns at most one [`Region`] and an [`Encoding`] that knows
//! how a logical value maps onto one element's bytes. All reads and writes
//! are bounds-checked against [`Column::capacity`]; the column never tracks
//! how many slots are logically in use.
//!
//! # Growth
//!
//! ```text
//! ensure_capacity(required)
//! └── required > capacity ?
//!     └── resize_to(required * GROWTH_FACTOR)
//!         1. storage.allocate(layout, final_size)    (short region = error)
//!         2. write null sentinel into [old_capacity, final_size)
//!         3. new_region.copy_from(old_region)        (prefix [0, old_capacity))
//!         4. self.region = new_region                (old region dropped)
//! ```
//!
//! Steps 1-3 operate on a region nothing else can observe; step 4 is a plain
//! assignment under `&mut self`, so no reader can hold the old region while
//! it is swapped out.

use std::fmt;

use mzcol_arena::storage::region_bytes;
use mzcol_arena::{Region, SharedStorage, StorageError};
use mzcol_core::LayoutDescriptor;

use crate::error::ColumnError;

/// Multiplier applied to a required capacity when a column grows.
///
/// Over-allocating by 4x keeps reallocation rare for append-heavy feature
/// lists with hundreds of thousands of rows.
pub const GROWTH_FACTOR: usize = 4;

/// Maps logical values of one type onto the bytes of a single element.
///
/// Implementations must not modify `slot` when [`Encoding::encode`] fails.
pub trait Encoding {
    /// Logical (non-null) value type.
    type Value;

    /// Physical layout of one element.
    fn layout(&self) -> &LayoutDescriptor;

    /// Write this encoding's null pattern into `slot`.
    fn write_null(&self, slot: &mut [u8]);

    /// Whether `slot` holds the null pattern.
    fn is_null(&self, slot: &[u8]) -> bool;

    /// Decode the value stored in `slot`. `index` is used for diagnostics only.
    fn decode(&self, index: usize, slot: &[u8]) -> Result<Option<Self::Value>, ColumnError>;

    /// Encode `value` (or null) into `slot`.
    fn encode(&self, slot: &mut [u8], value: Option<&Self::Value>) -> Result<(), ColumnError>;
}

/// A growable, capacity-tracked column of encoded values.
///
/// Capacity never decreases. Mutation requires `&mut self`; sharing a
/// column that may grow between threads needs external locking.
pub struct Column<E> {
    encoding: E,
    storage: SharedStorage,
    /// `None` until the first allocation.
    region: Option<Region>,
}

impl<E: Encoding> Column<E> {
    /// Create a column and allocate exactly `initial_capacity` elements.
    ///
    /// With `initial_capacity == 0` nothing is allocated and
    /// [`Column::capacity`] is 0.
    pub fn with_capacity(
        storage: SharedStorage,
        encoding: E,
        initial_capacity: usize,
    ) -> Result<Self, ColumnError> {
        let mut column = Self {
            encoding,
            storage,
            region: None,
        };
        column.resize_to(initial_capacity)?;
        Ok(column)
    }

    /// Number of addressable elements.
    pub fn capacity(&self) -> usize {
        let width = self.element_width();
        self.region
            .as_ref()
            .and_then(|region| region.len().checked_div(width))
            .unwrap_or(0)
    }

    /// Grow so that at least `required` elements are addressable.
    ///
    /// Returns `true` if the column grew (to `required * GROWTH_FACTOR`),
    /// `false` if it already had room.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<bool, ColumnError> {
        if required <= self.capacity() {
            return Ok(false);
        }
        let final_size =
            required
                .checked_mul(GROWTH_FACTOR)
                .ok_or(StorageError::SizeOverflow {
                    element_count: required,
                    element_width: self.element_width(),
                })?;
        self.resize_to(final_size)?;
        Ok(true)
    }

    fn resize_to(&mut self, final_size: usize) -> Result<(), ColumnError> {
        let old_capacity = self.capacity();
        if final_size <= old_capacity {
            return Ok(());
        }

        let width = self.element_width();
        let layout = self.encoding.layout();
        let expected_bytes = region_bytes(layout, final_size)?;
        let mut region = self.storage.allocate(layout, final_size)?;
        if region.len() < expected_bytes {
            return Err(StorageError::RegionTooSmall {
                expected_bytes,
                actual_bytes: region.len(),
            }
            .into());
        }

        for index in old_capacity..final_size {
            let offset = index * width;
            self.encoding.write_null(region.bytes_mut(offset, width));
        }

        if let Some(old) = &self.region {
            region.copy_from(old)?;
        }

        tracing::debug!(
            old_capacity,
            new_capacity = final_size,
            element_width = width,
            "column grown"
        );
        self.region = Some(region);
        Ok(())
    }

    /// Decode the value at `index`.
    pub fn get(&self, index: usize) -> Result<Option<E::Value>, ColumnError> {
        let slot = self.slot(index)?;
        self.encoding.decode(index, slot)
    }

    /// Encode `value` at `index`, returning the previous value.
    ///
    /// Fails without writing if the previous value cannot be decoded; use
    /// [`Column::put`] to overwrite such a slot.
    pub fn set(
        &mut self,
        index: usize,
        value: Option<E::Value>,
    ) -> Result<Option<E::Value>, ColumnError> {
        let previous = self.get(index)?;
        let (encoding, slot) = self.encoding_and_slot_mut(index)?;
        encoding.encode(slot, value.as_ref())?;
        Ok(previous)
    }

    /// Encode `value` at `index` without decoding what was there.
    pub fn put(&mut self, index: usize, value: Option<E::Value>) -> Result<(), ColumnError> {
        let (encoding, slot) = self.encoding_and_slot_mut(index)?;
        encoding.encode(slot, value.as_ref())
    }

    /// Whether the slot at `index` holds the null pattern.
    pub fn is_null(&self, index: usize) -> Result<bool, ColumnError> {
        let slot = self.slot(index)?;
        Ok(self.encoding.is_null(slot))
    }

    /// Decode every slot in `[0, capacity)`.
    pub fn iter(&self) -> impl Iterator<Item = Result<Option<E::Value>, ColumnError>> + '_ {
        (0..self.capacity()).map(move |index| self.get(index))
    }

    /// Element layout.
    pub fn layout(&self) -> &LayoutDescriptor {
        self.encoding.layout()
    }

    /// The encoding this column uses.
    pub fn encoding(&self) -> &E {
        &self.encoding
    }

    /// The storage this column allocates from.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Bytes held by the current region.
    pub fn memory_bytes(&self) -> usize {
        self.region.as_ref().map_or(0, Region::len)
    }

    fn element_width(&self) -> usize {
        self.encoding.layout().element_width()
    }

    /// Bytes of the element at `index`.
    pub(crate) fn slot(&self, index: usize) -> Result<&[u8], ColumnError> {
        let capacity = self.capacity();
        let width = self.element_width();
        match &self.region {
            Some(region) if index < capacity => Ok(region.bytes(index * width, width)),
            _ => Err(ColumnError::IndexOutOfRange { index, capacity }),
        }
    }

    /// Mutable bytes of the element at `index`.
    pub(crate) fn slot_mut(&mut self, index: usize) -> Result<&mut [u8], ColumnError> {
        let capacity = self.capacity();
        let width = self.element_width();
        match &mut self.region {
            Some(region) if index < capacity => Ok(region.bytes_mut(index * width, width)),
            _ => Err(ColumnError::IndexOutOfRange { index, capacity }),
        }
    }

    /// Split borrow of the encoding and one mutable slot.
    pub(crate) fn encoding_and_slot_mut(
        &mut self,
        index: usize,
    ) -> Result<(&E, &mut [u8]), ColumnError> {
        let capacity = self.capacity();
        let width = self.element_width();
        match &mut self.region {
            Some(region) if index < capacity => {
                Ok((&self.encoding, region.bytes_mut(index * width, width)))
            }
            _ => Err(ColumnError::IndexOutOfRange { index, capacity }),
        }
    }
}

impl<E: Encoding> fmt::Debug for Column<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("capacity", &self.capacity())
            .field("element_width", &self.element_width())
            .field("memory_bytes", &self.memory_bytes())
            .finish()
    }
}
