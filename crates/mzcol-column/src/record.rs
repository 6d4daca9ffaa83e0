//! Composite record encoding.
//!
//! A [`Record`] declares its sub-fields; [`RecordEncoding`] packs them
//! widest-first with trailing padding (see
//! [`LayoutBuilder`](mzcol_core::LayoutBuilder)). One floating-point field
//! is designated the null field: NaN there makes the whole record null,
//! whatever the other sub-fields contain. Writing null only touches that
//! field, so other sub-fields keep stale bytes until the next full write.

use std::fmt;
use std::marker::PhantomData;

use mzcol_arena::SharedStorage;
use mzcol_core::{FieldKind, FieldLayout, LayoutBuilder, LayoutDescriptor, LayoutError, Primitive};
use smallvec::SmallVec;

use crate::column::{Column, Encoding};
use crate::error::ColumnError;
use crate::scalar::NullableScalar;

/// A fixed set of typed sub-fields stored as one element.
///
/// [`Record::FIELDS`] is in declaration order; [`RecordFields`] and
/// [`RecordFieldsMut`] are indexed by position in that list, independent of
/// where the layout places each field physically.
pub trait Record: Sized {
    /// Sub-fields in declaration order.
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Name of the floating-point field whose NaN marks the record null.
    const NULL_FIELD: &'static str;

    /// Build a record from its sub-fields. Only called for non-null slots.
    fn decode(fields: &RecordFields<'_>) -> Self;

    /// Write every sub-field.
    fn encode(&self, fields: &mut RecordFieldsMut<'_>);
}

/// Read-only view of one record slot.
pub struct RecordFields<'a> {
    slot: &'a [u8],
    fields: &'a [FieldLayout],
}

impl RecordFields<'_> {
    /// Read the sub-field declared at position `field`.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not a declared position.
    #[inline]
    pub fn get<P: Primitive>(&self, field: usize) -> P {
        let layout = &self.fields[field];
        debug_assert_eq!(layout.kind(), P::KIND, "field '{}'", layout.name());
        P::read_le(&self.slot[layout.offset()..])
    }

    /// Read a sub-field that uses its type's null sentinel.
    #[inline]
    pub fn get_nullable<P: NullableScalar>(&self, field: usize) -> Option<P> {
        self.get::<P>(field).into_option()
    }
}

/// Mutable view of one record slot.
pub struct RecordFieldsMut<'a> {
    slot: &'a mut [u8],
    fields: &'a [FieldLayout],
}

impl RecordFieldsMut<'_> {
    /// Write the sub-field declared at position `field`.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not a declared position.
    #[inline]
    pub fn set<P: Primitive>(&mut self, field: usize, value: P) {
        let layout = &self.fields[field];
        debug_assert_eq!(layout.kind(), P::KIND, "field '{}'", layout.name());
        value.write_le(&mut self.slot[layout.offset()..]);
    }

    /// Write a sub-field, storing the type's sentinel for `None`.
    #[inline]
    pub fn set_nullable<P: NullableScalar>(&mut self, field: usize, value: Option<P>) {
        self.set(field, P::from_option(value));
    }
}

/// Encoding of one [`Record`] per element.
pub struct RecordEncoding<R> {
    layout: LayoutDescriptor,
    /// Field layouts in declaration order.
    declared: SmallVec<[FieldLayout; 8]>,
    null_field: FieldLayout,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> RecordEncoding<R> {
    /// Build the packed layout for `R` and resolve its null field.
    pub fn new() -> Result<Self, LayoutError> {
        let layout = R::FIELDS
            .iter()
            .fold(LayoutBuilder::new(), |builder, &(name, kind)| {
                builder.field(name, kind)
            })
            .build()?;

        let declared = R::FIELDS
            .iter()
            .map(|&(name, _)| {
                layout.field(name).copied().ok_or_else(|| LayoutError::UnknownField {
                    name: name.to_string(),
                })
            })
            .collect::<Result<SmallVec<[FieldLayout; 8]>, _>>()?;

        let null_field = *layout
            .field(R::NULL_FIELD)
            .ok_or_else(|| LayoutError::UnknownField {
                name: R::NULL_FIELD.to_string(),
            })?;
        if !null_field.kind().is_float() {
            return Err(LayoutError::NullFieldNotFloat {
                name: R::NULL_FIELD.to_string(),
            });
        }

        Ok(Self {
            layout,
            declared,
            null_field,
            _marker: PhantomData,
        })
    }

    /// Layout of a named sub-field.
    pub fn field(&self, name: &str) -> Result<&FieldLayout, LayoutError> {
        self.layout.field(name).ok_or_else(|| LayoutError::UnknownField {
            name: name.to_string(),
        })
    }
}

impl<R> fmt::Debug for RecordEncoding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEncoding")
            .field("layout", &self.layout)
            .field("null_field", &self.null_field.name())
            .finish()
    }
}

impl<R: Record> Encoding for RecordEncoding<R> {
    type Value = R;

    fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    fn write_null(&self, slot: &mut [u8]) {
        let bytes = &mut slot[self.null_field.offset()..];
        match self.null_field.kind() {
            FieldKind::F64 => f64::NULL.write_le(bytes),
            _ => f32::NULL.write_le(bytes),
        }
    }

    fn is_null(&self, slot: &[u8]) -> bool {
        let bytes = &slot[self.null_field.offset()..];
        match self.null_field.kind() {
            FieldKind::F64 => f64::read_le(bytes).is_nan(),
            _ => f32::read_le(bytes).is_nan(),
        }
    }

    fn decode(&self, _index: usize, slot: &[u8]) -> Result<Option<R>, ColumnError> {
        if self.is_null(slot) {
            return Ok(None);
        }
        let fields = RecordFields {
            slot,
            fields: &self.declared,
        };
        Ok(Some(R::decode(&fields)))
    }

    fn encode(&self, slot: &mut [u8], value: Option<&R>) -> Result<(), ColumnError> {
        match value {
            None => self.write_null(slot),
            Some(record) => {
                let mut fields = RecordFieldsMut {
                    slot,
                    fields: &self.declared,
                };
                record.encode(&mut fields);
            }
        }
        Ok(())
    }
}

/// Column of composite records.
pub type RecordColumn<R> = Column<RecordEncoding<R>>;

impl<R: Record> Column<RecordEncoding<R>> {
    /// Create a record column with `initial_capacity` null slots.
    pub fn new(storage: SharedStorage, initial_capacity: usize) -> Result<Self, ColumnError> {
        Self::with_capacity(storage, RecordEncoding::new()?, initial_capacity)
    }

    /// Read one raw sub-field, ignoring the record's null state.
    pub fn get_field<P: Primitive>(&self, index: usize, name: &str) -> Result<P, ColumnError> {
        let field = self.checked_field::<P>(name)?;
        Ok(P::read_le(&self.slot(index)?[field.offset()..]))
    }

    /// Write one raw sub-field in place, leaving the others untouched.
    pub fn set_field<P: Primitive>(
        &mut self,
        index: usize,
        name: &str,
        value: P,
    ) -> Result<(), ColumnError> {
        let offset = self.checked_field::<P>(name)?.offset();
        value.write_le(&mut self.slot_mut(index)?[offset..]);
        Ok(())
    }

    fn checked_field<P: Primitive>(&self, name: &str) -> Result<FieldLayout, ColumnError> {
        let field = *self.encoding().field(name)?;
        if field.kind() != P::KIND {
            return Err(LayoutError::KindMismatch {
                name: name.to_string(),
                declared: field.kind(),
                requested: P::KIND,
            }
            .into());
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mzcol_arena::{HeapStorage, StorageConfig};

    use super::*;

    /// Peak shape summary: one wide field, one narrow, null on the narrow one.
    #[derive(Clone, Debug, PartialEq)]
    struct PeakShape {
        area: f64,
        height: f32,
        scans: i32,
    }

    impl Record for PeakShape {
        const FIELDS: &'static [(&'static str, FieldKind)] = &[
            ("height", FieldKind::F32),
            ("area", FieldKind::F64),
            ("scans", FieldKind::I32),
        ];
        const NULL_FIELD: &'static str = "height";

        fn decode(fields: &RecordFields<'_>) -> Self {
            Self {
                height: fields.get(0),
                area: fields.get(1),
                scans: fields.get(2),
            }
        }

        fn encode(&self, fields: &mut RecordFieldsMut<'_>) {
            fields.set(0, self.height);
            fields.set(1, self.area);
            fields.set(2, self.scans);
        }
    }

    struct IntNull;

    impl Record for IntNull {
        const FIELDS: &'static [(&'static str, FieldKind)] = &[("n", FieldKind::I32)];
        const NULL_FIELD: &'static str = "n";

        fn decode(_fields: &RecordFields<'_>) -> Self {
            IntNull
        }

        fn encode(&self, _fields: &mut RecordFieldsMut<'_>) {}
    }

    struct MissingNull;

    impl Record for MissingNull {
        const FIELDS: &'static [(&'static str, FieldKind)] = &[("x", FieldKind::F32)];
        const NULL_FIELD: &'static str = "y";

        fn decode(_fields: &RecordFields<'_>) -> Self {
            MissingNull
        }

        fn encode(&self, _fields: &mut RecordFieldsMut<'_>) {}
    }

    fn storage() -> SharedStorage {
        Arc::new(HeapStorage::new(StorageConfig::new("record-tests")).unwrap())
    }

    #[test]
    fn layout_is_widest_first_and_padded() {
        let encoding = RecordEncoding::<PeakShape>::new().unwrap();
        let layout = encoding.layout();
        assert_eq!(layout.offset_of("area").unwrap(), 0);
        assert_eq!(layout.offset_of("height").unwrap(), 8);
        assert_eq!(layout.offset_of("scans").unwrap(), 12);
        assert_eq!(layout.element_width(), 16);
        assert_eq!(layout.alignment(), 8);
    }

    #[test]
    fn record_round_trip() {
        let mut column = RecordColumn::<PeakShape>::new(storage(), 2).unwrap();
        let shape = PeakShape {
            area: 1.5e6,
            height: 3.0e4,
            scans: 17,
        };
        column.set(1, Some(shape.clone())).unwrap();
        assert_eq!(column.get(1).unwrap(), Some(shape));
        assert_eq!(column.get(0).unwrap(), None);
    }

    #[test]
    fn null_write_leaves_other_fields_stale() {
        let mut column = RecordColumn::<PeakShape>::new(storage(), 1).unwrap();
        column
            .set(
                0,
                Some(PeakShape {
                    area: 2.0,
                    height: 1.0,
                    scans: 5,
                }),
            )
            .unwrap();
        column.set(0, None).unwrap();
        assert_eq!(column.get(0).unwrap(), None);
        assert_eq!(column.get_field::<f64>(0, "area").unwrap(), 2.0);
        assert_eq!(column.get_field::<i32>(0, "scans").unwrap(), 5);
        assert!(column.get_field::<f32>(0, "height").unwrap().is_nan());
    }

    #[test]
    fn non_nan_null_field_makes_record_present() {
        let mut column = RecordColumn::<PeakShape>::new(storage(), 1).unwrap();
        column.set_field(0, "height", 9.0f32).unwrap();
        let shape = column.get(0).unwrap().unwrap();
        assert_eq!(shape.height, 9.0);
        assert_eq!(shape.area, 0.0);
    }

    #[test]
    fn field_kind_mismatch_is_rejected() {
        let column = RecordColumn::<PeakShape>::new(storage(), 1).unwrap();
        assert!(matches!(
            column.get_field::<f32>(0, "area"),
            Err(ColumnError::Layout(LayoutError::KindMismatch { .. }))
        ));
        assert!(matches!(
            column.get_field::<f32>(0, "nope"),
            Err(ColumnError::Layout(LayoutError::UnknownField { .. }))
        ));
    }

    #[test]
    fn integer_null_field_is_rejected() {
        assert!(matches!(
            RecordEncoding::<IntNull>::new(),
            Err(LayoutError::NullFieldNotFloat { .. })
        ));
    }

    #[test]
    fn missing_null_field_is_rejected() {
        let result = RecordColumn::<MissingNull>::new(storage(), 1);
        assert!(matches!(
            result,
            Err(ColumnError::Layout(LayoutError::UnknownField { .. }))
        ));
    }
}
