//! mzcol: growable off-heap columns for mass-spectrometry feature lists.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the mzcol sub-crates. Adding `mzcol` as a single dependency is enough
//! for most users.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mzcol::prelude::*;
//!
//! let storage: SharedStorage =
//!     Arc::new(HeapStorage::new(StorageConfig::new("feature-list")).unwrap());
//!
//! // Precursor m/z per row, null until a row is filled.
//! let mut mz = DoubleColumn::new(Arc::clone(&storage), 10).unwrap();
//! mz.set(3, Some(445.1200)).unwrap();
//! assert_eq!(mz.get(3).unwrap(), Some(445.1200));
//! assert_eq!(mz.get(4).unwrap(), None);
//!
//! // Growing past capacity over-allocates by GROWTH_FACTOR.
//! assert!(mz.ensure_capacity(11).unwrap());
//! assert_eq!(mz.capacity(), 11 * GROWTH_FACTOR);
//! assert_eq!(mz.get(3).unwrap(), Some(445.1200));
//!
//! // Retention-time windows collapse to null unless both bounds are set.
//! let mut rt = FloatIntervalColumn::new(storage, 4).unwrap();
//! rt.set_bounds(0, Some(1.5), None).unwrap();
//! assert_eq!(rt.get(0).unwrap(), None);
//! rt.set(0, Some(ClosedInterval::new(1.5, 2.25))).unwrap();
//! assert_eq!(rt.get(0).unwrap(), Some(ClosedInterval::new(1.5, 2.25)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mzcol-core` | Primitives, layouts, intervals, symbol universes |
//! | [`storage`] | `mzcol-arena` | `Storage` trait, `HeapStorage`, `Region`, config |
//! | [`column`] | `mzcol-column` | `Column`, the four encodings, `AlignmentScores` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value and layout types (`mzcol-core`).
///
/// Contains [`types::LayoutDescriptor`] and its builder, the
/// [`types::Primitive`] byte codec, [`types::ClosedInterval`] and
/// [`types::Universe`].
pub use mzcol_core as types;

/// Region allocation (`mzcol-arena`).
///
/// Implement [`storage::Storage`] to back columns with something other
/// than [`storage::HeapStorage`].
pub use mzcol_arena as storage;

/// Columns and encodings (`mzcol-column`).
pub use mzcol_column as column;

/// Common imports for typical mzcol usage.
///
/// ```rust
/// use mzcol::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mzcol_core::{ClosedInterval, FieldKind, LayoutDescriptor, SharedUniverse, Universe};

    // Storage
    pub use mzcol_arena::{HeapStorage, SharedStorage, Storage, StorageConfig};

    // Errors
    pub use mzcol_arena::StorageError;
    pub use mzcol_column::ColumnError;
    pub use mzcol_core::LayoutError;

    // Columns
    pub use mzcol_column::{
        AlignmentScores, AlignmentScoresColumn, Column, DoubleColumn, DoubleIntervalColumn,
        FloatColumn, FloatIntervalColumn, IntColumn, LongColumn, Record, RecordColumn,
        SymbolColumn, GROWTH_FACTOR,
    };
}
