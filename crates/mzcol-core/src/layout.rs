//! Physical element layouts: field kinds, offsets, alignment and padding.
//!
//! A [`LayoutDescriptor`] describes how one logical element is packed into
//! bytes. Scalar columns use a single-field layout; composite records use a
//! [`LayoutBuilder`] which orders fields widest-first and appends explicit
//! trailing padding so every element in a region starts aligned.

use std::cmp::Reverse;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::LayoutError;

/// Name of the synthetic trailing padding field.
pub const PADDING_FIELD: &str = "_padding";

/// Name of the single field in a scalar layout.
pub const VALUE_FIELD: &str = "value";

/// Physical kind of one field within an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 8-byte IEEE-754 double.
    F64,
    /// 8-byte signed integer.
    I64,
    /// 4-byte IEEE-754 float.
    F32,
    /// 4-byte signed integer.
    I32,
    /// Unused filler bytes.
    Padding {
        /// Number of filler bytes.
        bytes: u32,
    },
}

impl FieldKind {
    /// Width in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::Padding { bytes } => *bytes as usize,
        }
    }

    /// Natural alignment in bytes. Padding is byte-aligned.
    pub fn alignment(&self) -> usize {
        match self {
            Self::Padding { .. } => 1,
            other => other.width(),
        }
    }

    /// Whether the field holds a floating-point value (and can carry a NaN sentinel).
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }
}

/// Position of one named field within an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    name: &'static str,
    kind: FieldKind,
    offset: usize,
}

impl FieldLayout {
    /// Field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Byte offset from the start of the element.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    /// Whether this is the synthetic trailing padding field.
    pub fn is_padding(&self) -> bool {
        matches!(self.kind, FieldKind::Padding { .. })
    }
}

/// Immutable description of one element's physical layout.
///
/// Fields are stored in physical (offset) order. Invariant: the element
/// width is a multiple of the alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutDescriptor {
    fields: IndexMap<&'static str, FieldLayout>,
    element_width: usize,
    alignment: usize,
}

impl LayoutDescriptor {
    /// Single-field layout holding one value of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`FieldKind::Padding`].
    pub fn scalar(kind: FieldKind) -> Self {
        assert!(
            !matches!(kind, FieldKind::Padding { .. }),
            "scalar layout cannot be padding"
        );
        let mut fields = IndexMap::with_capacity(1);
        fields.insert(
            VALUE_FIELD,
            FieldLayout {
                name: VALUE_FIELD,
                kind,
                offset: 0,
            },
        );
        Self {
            fields,
            element_width: kind.width(),
            alignment: kind.alignment(),
        }
    }

    /// Two-field layout with both fields of `kind`, `first` at offset 0.
    pub fn pair(
        kind: FieldKind,
        first: &'static str,
        second: &'static str,
    ) -> Result<Self, LayoutError> {
        LayoutBuilder::new().field(first, kind).field(second, kind).build()
    }

    /// Total bytes per element, including padding.
    pub fn element_width(&self) -> usize {
        self.element_width
    }

    /// Required alignment of each element.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Fields in physical order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldLayout> {
        self.fields.values()
    }

    /// Number of fields, padding included.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.get(name)
    }

    /// Byte offset of a named field.
    pub fn offset_of(&self, name: &str) -> Result<usize, LayoutError> {
        self.field(name)
            .map(FieldLayout::offset)
            .ok_or_else(|| LayoutError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Trailing padding bytes appended to reach alignment.
    pub fn padding_bytes(&self) -> usize {
        self.fields
            .get(PADDING_FIELD)
            .map(FieldLayout::width)
            .unwrap_or(0)
    }
}

/// Builds a composite [`LayoutDescriptor`] from declared fields.
///
/// Declaration order does not determine physical order: [`LayoutBuilder::build`]
/// sorts fields widest-alignment-first (stable among equals) so no field
/// is misaligned, then pads the element up to its alignment.
#[derive(Clone, Debug, Default)]
pub struct LayoutBuilder {
    fields: SmallVec<[(&'static str, FieldKind); 8]>,
}

impl LayoutBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    pub fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push((name, kind));
        self
    }

    /// Compute offsets, alignment and padding.
    pub fn build(self) -> Result<LayoutDescriptor, LayoutError> {
        if self.fields.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        for (i, (name, _)) in self.fields.iter().enumerate() {
            if *name == PADDING_FIELD || self.fields[..i].iter().any(|(other, _)| other == name) {
                return Err(LayoutError::DuplicateField {
                    name: name.to_string(),
                });
            }
        }

        let mut ordered = self.fields;
        ordered.sort_by_key(|(_, kind)| Reverse(kind.alignment()));

        let alignment = ordered
            .iter()
            .map(|(_, kind)| kind.alignment())
            .max()
            .unwrap_or(1);

        let mut fields = IndexMap::with_capacity(ordered.len() + 1);
        let mut cursor = 0usize;
        for (name, kind) in ordered {
            let offset = align_up(cursor, kind.alignment()).ok_or(LayoutError::WidthOverflow)?;
            cursor = offset
                .checked_add(kind.width())
                .ok_or(LayoutError::WidthOverflow)?;
            fields.insert(name, FieldLayout { name, kind, offset });
        }

        let element_width = align_up(cursor, alignment).ok_or(LayoutError::WidthOverflow)?;
        let padding = element_width - cursor;
        if padding > 0 {
            let bytes = u32::try_from(padding).map_err(|_| LayoutError::WidthOverflow)?;
            fields.insert(
                PADDING_FIELD,
                FieldLayout {
                    name: PADDING_FIELD,
                    kind: FieldKind::Padding { bytes },
                    offset: cursor,
                },
            );
        }

        Ok(LayoutDescriptor {
            fields,
            element_width,
            alignment,
        })
    }
}

fn align_up(value: usize, alignment: usize) -> Option<usize> {
    let rem = value % alignment;
    if rem == 0 {
        Some(value)
    } else {
        value.checked_add(alignment - rem)
    }
}
