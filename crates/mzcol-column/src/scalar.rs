//! Nullable fixed-width scalar encoding.
//!
//! Null is stored as a reserved bit pattern inside the slot: NaN for
//! floating-point columns, the type's minimum value for integer columns.
//! A NaN written by a caller is therefore read back as null.

use std::marker::PhantomData;

use mzcol_arena::SharedStorage;
use mzcol_core::{LayoutDescriptor, Primitive};

use crate::column::{Column, Encoding};
use crate::error::ColumnError;

/// A primitive with a reserved null sentinel.
pub trait NullableScalar: Primitive {
    /// The sentinel written for null.
    const NULL: Self;

    /// Whether `self` is the sentinel.
    fn is_null_value(self) -> bool;

    /// `None` for the sentinel, `Some(self)` otherwise.
    fn into_option(self) -> Option<Self> {
        if self.is_null_value() {
            None
        } else {
            Some(self)
        }
    }

    /// The sentinel for `None`.
    fn from_option(value: Option<Self>) -> Self {
        value.unwrap_or(Self::NULL)
    }
}

impl NullableScalar for f64 {
    const NULL: Self = f64::NAN;

    fn is_null_value(self) -> bool {
        self.is_nan()
    }
}

impl NullableScalar for f32 {
    const NULL: Self = f32::NAN;

    fn is_null_value(self) -> bool {
        self.is_nan()
    }
}

impl NullableScalar for i32 {
    const NULL: Self = i32::MIN;

    fn is_null_value(self) -> bool {
        self == i32::MIN
    }
}

impl NullableScalar for i64 {
    const NULL: Self = i64::MIN;

    fn is_null_value(self) -> bool {
        self == i64::MIN
    }
}

/// Encoding of one nullable scalar per element.
#[derive(Clone, Debug)]
pub struct NullableEncoding<T> {
    layout: LayoutDescriptor,
    _marker: PhantomData<T>,
}

impl<T: NullableScalar> NullableEncoding<T> {
    /// Single-field layout of `T`.
    pub fn new() -> Self {
        Self {
            layout: LayoutDescriptor::scalar(T::KIND),
            _marker: PhantomData,
        }
    }
}

impl<T: NullableScalar> Default for NullableEncoding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NullableScalar> Encoding for NullableEncoding<T> {
    type Value = T;

    fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    fn write_null(&self, slot: &mut [u8]) {
        T::NULL.write_le(slot);
    }

    fn is_null(&self, slot: &[u8]) -> bool {
        T::read_le(slot).is_null_value()
    }

    fn decode(&self, _index: usize, slot: &[u8]) -> Result<Option<T>, ColumnError> {
        Ok(T::read_le(slot).into_option())
    }

    fn encode(&self, slot: &mut [u8], value: Option<&T>) -> Result<(), ColumnError> {
        T::from_option(value.copied()).write_le(slot);
        Ok(())
    }
}

/// Column of nullable `f64`.
pub type DoubleColumn = Column<NullableEncoding<f64>>;
/// Column of nullable `f32`.
pub type FloatColumn = Column<NullableEncoding<f32>>;
/// Column of nullable `i32`; `i32::MIN` is reserved.
pub type IntColumn = Column<NullableEncoding<i32>>;
/// Column of nullable `i64`; `i64::MIN` is reserved.
pub type LongColumn = Column<NullableEncoding<i64>>;

impl<T: NullableScalar> Column<NullableEncoding<T>> {
    /// Create a scalar column with `initial_capacity` null slots.
    pub fn new(storage: SharedStorage, initial_capacity: usize) -> Result<Self, ColumnError> {
        Self::with_capacity(storage, NullableEncoding::new(), initial_capacity)
    }

    /// Read the stored value without the null check.
    ///
    /// A null slot yields the sentinel itself (`NaN`, `i32::MIN`, ...).
    #[inline]
    pub fn get_raw(&self, index: usize) -> Result<T, ColumnError> {
        Ok(T::read_le(self.slot(index)?))
    }

    /// Write `value` verbatim. Writing the sentinel is equivalent to writing null.
    #[inline]
    pub fn set_raw(&mut self, index: usize, value: T) -> Result<(), ColumnError> {
        value.write_le(self.slot_mut(index)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mzcol_arena::{HeapStorage, StorageConfig};

    use super::*;

    fn storage() -> SharedStorage {
        Arc::new(HeapStorage::new(StorageConfig::new("scalar-tests")).unwrap())
    }

    #[test]
    fn fresh_slots_are_null() {
        let column = FloatColumn::new(storage(), 4).unwrap();
        assert!(column.iter().all(|v| v == Ok(None)));
        assert!(column.get_raw(0).unwrap().is_nan());
    }

    #[test]
    fn int_null_is_min_value() {
        let mut column = IntColumn::new(storage(), 2).unwrap();
        assert_eq!(column.get_raw(0).unwrap(), i32::MIN);
        column.set(0, Some(0)).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(0));
        column.set(0, Some(-1)).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(-1));
    }

    #[test]
    fn long_column_round_trip() {
        let mut column = LongColumn::new(storage(), 2).unwrap();
        column.set(1, Some(i64::MAX)).unwrap();
        assert_eq!(column.get(1).unwrap(), Some(i64::MAX));
        assert_eq!(column.get(0).unwrap(), None);
    }

    #[test]
    fn caller_nan_reads_as_null() {
        let mut column = DoubleColumn::new(storage(), 1).unwrap();
        column.set(0, Some(f64::NAN)).unwrap();
        assert_eq!(column.get(0).unwrap(), None);
    }

    #[test]
    fn raw_access_bypasses_null_check() {
        let mut column = DoubleColumn::new(storage(), 2).unwrap();
        column.set_raw(0, 42.5).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(42.5));
        column.set_raw(1, f64::NAN).unwrap();
        assert!(column.is_null(1).unwrap());
        assert!(column.get_raw(1).unwrap().is_nan());
    }

    #[test]
    fn raw_access_is_bounds_checked() {
        let mut column = IntColumn::new(storage(), 1).unwrap();
        assert!(matches!(
            column.get_raw(1),
            Err(ColumnError::IndexOutOfRange { .. })
        ));
        assert!(column.set_raw(1, 3).is_err());
    }

    #[test]
    fn infinities_are_values() {
        let mut column = FloatColumn::new(storage(), 2).unwrap();
        column.set(0, Some(f32::INFINITY)).unwrap();
        column.set(1, Some(f32::NEG_INFINITY)).unwrap();
        assert_eq!(column.get(0).unwrap(), Some(f32::INFINITY));
        assert_eq!(column.get(1).unwrap(), Some(f32::NEG_INFINITY));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn non_nan_doubles_round_trip(v in any::<f64>().prop_filter("not NaN", |v| !v.is_nan())) {
                let mut column = DoubleColumn::new(storage(), 1).unwrap();
                column.set(0, Some(v)).unwrap();
                prop_assert_eq!(column.get(0).unwrap().map(f64::to_bits), Some(v.to_bits()));
            }

            #[test]
            fn non_sentinel_ints_round_trip(v in (i32::MIN + 1)..=i32::MAX, index in 0usize..16) {
                let mut column = IntColumn::new(storage(), 16).unwrap();
                column.set(index, Some(v)).unwrap();
                prop_assert_eq!(column.get(index).unwrap(), Some(v));
                column.set(index, None).unwrap();
                prop_assert_eq!(column.get(index).unwrap(), None);
            }
        }
    }
}
