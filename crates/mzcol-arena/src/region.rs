//! Contiguous byte regions with typed access.
//!
//! A [`Region`] is the unit a [`Storage`](crate::Storage) hands out: a
//! fixed-size, zero-initialised block of bytes. Columns address it with
//! byte offsets computed from a layout; the region itself knows nothing
//! about elements.

use mzcol_core::Primitive;

use crate::error::StorageError;

/// A fixed-size, byte-addressable block of memory.
///
/// The size never changes after creation. Growth is done by allocating a
/// larger region and calling [`Region::copy_from`].
pub struct Region {
    /// Backing storage. Fully allocated and zeroed at creation.
    data: Box<[u8]>,
}

impl Region {
    /// Create a zero-filled region of `byte_len` bytes.
    ///
    /// Aborts on allocator failure like any `Vec` allocation; use
    /// [`Region::try_zeroed`] where exhaustion must surface as an error.
    pub fn zeroed(byte_len: usize) -> Self {
        Self {
            data: vec![0u8; byte_len].into_boxed_slice(),
        }
    }

    /// Create a zero-filled region, reporting allocator failure.
    pub fn try_zeroed(byte_len: usize) -> Result<Self, StorageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(byte_len)
            .map_err(|_| StorageError::ResourceExhausted {
                requested: byte_len as u64,
                available: 0,
            })?;
        data.resize(byte_len, 0u8);
        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the region has zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shared view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the region.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the region.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Whole region as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read a primitive at a byte offset.
    ///
    /// # Panics
    ///
    /// Panics if the value would extend past the end of the region.
    pub fn read<P: Primitive>(&self, offset: usize) -> P {
        P::read_le(&self.data[offset..offset + P::WIDTH])
    }

    /// Write a primitive at a byte offset.
    ///
    /// # Panics
    ///
    /// Panics if the value would extend past the end of the region.
    pub fn write<P: Primitive>(&mut self, offset: usize, value: P) {
        value.write_le(&mut self.data[offset..offset + P::WIDTH]);
    }

    /// Copy all of `source` into the prefix of this region.
    ///
    /// Bytes past `source.len()` are left untouched.
    pub fn copy_from(&mut self, source: &Region) -> Result<(), StorageError> {
        if source.len() > self.len() {
            return Err(StorageError::CopyOverflow {
                source_bytes: source.len(),
                target_bytes: self.len(),
            });
        }
        self.data[..source.len()].copy_from_slice(&source.data);
        Ok(())
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region").field("len", &self.data.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_region_is_all_zero() {
        let region = Region::zeroed(64);
        assert_eq!(region.len(), 64);
        assert!(region.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn try_zeroed_matches_zeroed() {
        let region = Region::try_zeroed(32).unwrap();
        assert_eq!(region.len(), 32);
        assert!(region.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_region() {
        let region = Region::zeroed(0);
        assert!(region.is_empty());
    }

    #[test]
    fn typed_write_then_read() {
        let mut region = Region::zeroed(16);
        region.write(0, 1.5f64);
        region.write(8, -7i32);
        region.write(12, 2.25f32);
        assert_eq!(region.read::<f64>(0), 1.5);
        assert_eq!(region.read::<i32>(8), -7);
        assert_eq!(region.read::<f32>(12), 2.25);
    }

    #[test]
    fn bytes_mut_is_visible_through_bytes() {
        let mut region = Region::zeroed(8);
        region.bytes_mut(2, 3).copy_from_slice(&[1, 2, 3]);
        assert_eq!(region.bytes(0, 6), &[0, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn copy_from_fills_prefix_only() {
        let mut small = Region::zeroed(4);
        small.write(0, 42i32);
        let mut large = Region::zeroed(12);
        large.write(8, 9i32);
        large.copy_from(&small).unwrap();
        assert_eq!(large.read::<i32>(0), 42);
        assert_eq!(large.read::<i32>(4), 0);
        assert_eq!(large.read::<i32>(8), 9);
    }

    #[test]
    fn copy_from_larger_source_is_error() {
        let source = Region::zeroed(16);
        let mut target = Region::zeroed(8);
        let result = target.copy_from(&source);
        assert_eq!(
            result,
            Err(StorageError::CopyOverflow {
                source_bytes: 16,
                target_bytes: 8,
            })
        );
    }

    #[test]
    #[should_panic]
    fn read_past_end_panics() {
        let region = Region::zeroed(6);
        let _ = region.read::<f64>(0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn copy_preserves_prefix_and_suffix(
                prefix in proptest::collection::vec(any::<u8>(), 0..64),
                extra in 0usize..64,
                fill in any::<u8>(),
            ) {
                let mut source = Region::zeroed(prefix.len());
                source.bytes_mut(0, prefix.len()).copy_from_slice(&prefix);
                let mut target = Region::zeroed(prefix.len() + extra);
                target.bytes_mut(prefix.len(), extra).fill(fill);

                target.copy_from(&source).unwrap();
                prop_assert_eq!(target.bytes(0, prefix.len()), &prefix[..]);
                prop_assert!(target.bytes(prefix.len(), extra).iter().all(|&b| b == fill));
            }
        }
    }
}
