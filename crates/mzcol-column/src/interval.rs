//! Paired-interval encoding.
//!
//! Each element is two adjacent slots of `T`: the lower bound at slot
//! `2 * index`, the upper bound at `2 * index + 1`. Each bound uses `T`'s
//! own null sentinel. The composed interval is null when either bound is;
//! a single present bound is not an interval and is dropped on `get`,
//! though the bound accessors still report it.

use std::marker::PhantomData;

use mzcol_arena::SharedStorage;
use mzcol_core::{ClosedInterval, LayoutDescriptor, LayoutError};

use crate::column::{Column, Encoding};
use crate::error::ColumnError;
use crate::scalar::NullableScalar;

/// Encoding of one [`ClosedInterval<T>`] per element.
#[derive(Clone, Debug)]
pub struct IntervalEncoding<T> {
    layout: LayoutDescriptor,
    _marker: PhantomData<T>,
}

impl<T: NullableScalar> IntervalEncoding<T> {
    /// Two-slot layout of `T`.
    pub fn new() -> Result<Self, LayoutError> {
        Ok(Self {
            layout: LayoutDescriptor::pair(T::KIND, "lower", "upper")?,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn lower(slot: &[u8]) -> T {
        T::read_le(slot)
    }

    #[inline]
    fn upper(slot: &[u8]) -> T {
        T::read_le(&slot[T::WIDTH..])
    }
}

impl<T: NullableScalar> Encoding for IntervalEncoding<T> {
    type Value = ClosedInterval<T>;

    fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    fn write_null(&self, slot: &mut [u8]) {
        T::NULL.write_le(slot);
        T::NULL.write_le(&mut slot[T::WIDTH..]);
    }

    fn is_null(&self, slot: &[u8]) -> bool {
        Self::lower(slot).is_null_value() || Self::upper(slot).is_null_value()
    }

    fn decode(&self, _index: usize, slot: &[u8]) -> Result<Option<ClosedInterval<T>>, ColumnError> {
        let lower = Self::lower(slot).into_option();
        let upper = Self::upper(slot).into_option();
        Ok(lower
            .zip(upper)
            .map(|(lower, upper)| ClosedInterval::new(lower, upper)))
    }

    fn encode(&self, slot: &mut [u8], value: Option<&ClosedInterval<T>>) -> Result<(), ColumnError> {
        let (lower, upper) = match value {
            Some(interval) => (interval.lower, interval.upper),
            None => (T::NULL, T::NULL),
        };
        lower.write_le(slot);
        upper.write_le(&mut slot[T::WIDTH..]);
        Ok(())
    }
}

/// Column of `f32` ranges, e.g. retention-time windows.
pub type FloatIntervalColumn = Column<IntervalEncoding<f32>>;
/// Column of `f64` ranges, e.g. m/z windows.
pub type DoubleIntervalColumn = Column<IntervalEncoding<f64>>;

impl<T: NullableScalar> Column<IntervalEncoding<T>> {
    /// Create an interval column with `initial_capacity` null slots.
    pub fn new(storage: SharedStorage, initial_capacity: usize) -> Result<Self, ColumnError> {
        Self::with_capacity(storage, IntervalEncoding::new()?, initial_capacity)
    }

    /// Lower bound at `index`, null only if the lower slot itself is null.
    pub fn get_lower_bound(&self, index: usize) -> Result<Option<T>, ColumnError> {
        Ok(IntervalEncoding::<T>::lower(self.slot(index)?).into_option())
    }

    /// Upper bound at `index`, null only if the upper slot itself is null.
    pub fn get_upper_bound(&self, index: usize) -> Result<Option<T>, ColumnError> {
        Ok(IntervalEncoding::<T>::upper(self.slot(index)?).into_option())
    }

    /// Write the lower bound, returning the previous one.
    pub fn set_lower_bound(
        &mut self,
        index: usize,
        value: Option<T>,
    ) -> Result<Option<T>, ColumnError> {
        let slot = self.slot_mut(index)?;
        let previous = IntervalEncoding::<T>::lower(slot).into_option();
        T::from_option(value).write_le(slot);
        Ok(previous)
    }

    /// Write the upper bound, returning the previous one.
    pub fn set_upper_bound(
        &mut self,
        index: usize,
        value: Option<T>,
    ) -> Result<Option<T>, ColumnError> {
        let slot = self.slot_mut(index)?;
        let previous = IntervalEncoding::<T>::upper(slot).into_option();
        T::from_option(value).write_le(&mut slot[T::WIDTH..]);
        Ok(previous)
    }

    /// Write both bounds independently; either may be null.
    pub fn set_bounds(
        &mut self,
        index: usize,
        lower: Option<T>,
        upper: Option<T>,
    ) -> Result<(), ColumnError> {
        let slot = self.slot_mut(index)?;
        T::from_option(lower).write_le(slot);
        T::from_option(upper).write_le(&mut slot[T::WIDTH..]);
        Ok(())
    }
}
