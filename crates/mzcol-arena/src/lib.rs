//! Region storage for mzcol columns.
//!
//! Columns never allocate memory themselves. They ask a [`Storage`] for a
//! [`Region`] sized for some number of elements of a
//! [`LayoutDescriptor`](mzcol_core::LayoutDescriptor), then address it
//! with byte offsets.
//!
//! # Architecture
//!
//! ```text
//! SharedStorage = Arc<dyn Storage>   (one per feature list / raw file)
//! └── HeapStorage                    (budgeted, zero-filled, atomic accounting)
//!     └── Region × N                 (Box<[u8]>, owned by exactly one column)
//! ```
//!
//! Regions superseded by column growth are simply dropped; the storage
//! budget keeps counting them, the way a backing file keeps its size.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod heap;
pub mod region;
pub mod storage;

pub use config::StorageConfig;
pub use error::StorageError;
pub use heap::HeapStorage;
pub use region::Region;
pub use storage::{SharedStorage, Storage};
