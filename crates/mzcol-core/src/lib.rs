//! Core types for mzcol off-heap columns.
//!
//! This is the leaf crate with no internal dependencies. It defines how
//! values map to bytes ([`Primitive`]), how elements are laid out
//! ([`LayoutDescriptor`]), and the small value types the column encodings
//! produce ([`ClosedInterval`], [`Universe`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod interval;
pub mod layout;
pub mod primitive;
pub mod universe;

pub use error::LayoutError;
pub use interval::ClosedInterval;
pub use layout::{FieldKind, FieldLayout, LayoutBuilder, LayoutDescriptor};
pub use primitive::Primitive;
pub use universe::{SharedUniverse, Universe};
