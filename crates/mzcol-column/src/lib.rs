//! Growable off-heap columns for feature-list data.
//!
//! A [`Column`] stores fixed-width encoded values in a single
//! [`Region`](mzcol_arena::Region) obtained from a shared
//! [`Storage`](mzcol_arena::Storage). Nulls are encoded in-band with a
//! sentinel per encoding, so a region's bytes are the complete state of
//! the column.
//!
//! # Encodings
//!
//! | Encoding | Element | Null |
//! |----------|---------|------|
//! | [`NullableEncoding<T>`] | one `f64`/`f32`/`i32`/`i64` | NaN, or `MIN` for integers |
//! | [`SymbolEncoding<S>`] | one `i32` ordinal into a [`Universe`](mzcol_core::Universe) | any negative ordinal |
//! | [`RecordEncoding<R>`] | a packed [`Record`] | NaN in the record's null field |
//! | [`IntervalEncoding<T>`] | lower and upper bound | either bound null |
//!
//! # Contract
//!
//! - `capacity()` never decreases; `ensure_capacity` grows to
//!   `required * GROWTH_FACTOR`.
//! - Every index is bounds-checked: `index >= capacity()` yields
//!   [`ColumnError::IndexOutOfRange`].
//! - Columns are single-writer. Growth swaps the region under `&mut self`;
//!   no locking happens on `get`/`set`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alignment;
pub mod column;
pub mod error;
pub mod interval;
pub mod record;
pub mod scalar;
pub mod symbol;

pub use alignment::{AlignmentScores, AlignmentScoresColumn};
pub use column::{Column, Encoding, GROWTH_FACTOR};
pub use error::ColumnError;
pub use interval::{DoubleIntervalColumn, FloatIntervalColumn, IntervalEncoding};
pub use record::{Record, RecordColumn, RecordEncoding, RecordFields, RecordFieldsMut};
pub use scalar::{
    DoubleColumn, FloatColumn, IntColumn, LongColumn, NullableEncoding, NullableScalar,
};
pub use symbol::{SymbolColumn, SymbolEncoding, NULL_ORDINAL};
