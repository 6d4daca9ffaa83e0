//! Layout construction errors.

use std::error::Error;
use std::fmt;

use crate::layout::FieldKind;

/// Errors raised while building or querying a [`LayoutDescriptor`](crate::LayoutDescriptor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// A composite layout with no fields.
    EmptyLayout,
    /// Two fields share a name, or a field uses the reserved padding name.
    DuplicateField {
        /// The repeated name.
        name: String,
    },
    /// A field name that is not part of the layout.
    UnknownField {
        /// The missing name.
        name: String,
    },
    /// The designated null field cannot hold a NaN sentinel.
    NullFieldNotFloat {
        /// The offending field.
        name: String,
    },
    /// A field accessed as a different primitive than it was declared.
    KindMismatch {
        /// The field.
        name: String,
        /// Declared kind.
        declared: FieldKind,
        /// Kind used for access.
        requested: FieldKind,
    },
    /// Element width does not fit in `usize`.
    WidthOverflow,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLayout => write!(f, "layout has no fields"),
            Self::DuplicateField { name } => write!(f, "duplicate or reserved field name '{name}'"),
            Self::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Self::NullFieldNotFloat { name } => {
                write!(f, "null field '{name}' must be floating-point")
            }
            Self::KindMismatch {
                name,
                declared,
                requested,
            } => {
                write!(
                    f,
                    "field '{name}' is {declared:?}, accessed as {requested:?}"
                )
            }
            Self::WidthOverflow => write!(f, "element width overflows usize"),
        }
    }
}

impl Error for LayoutError {}
