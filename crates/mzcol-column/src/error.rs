//! Column error types.

use std::error::Error;
use std::fmt;

use mzcol_arena::StorageError;
use mzcol_core::LayoutError;

/// Errors returned by column operations.
///
/// Every operation is all-or-nothing on a single element: when an error is
/// returned, no bytes of the addressed slot have been changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnError {
    /// `index >= capacity()`. Call `ensure_capacity` first.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The column's capacity at the time of the call.
        capacity: usize,
    },
    /// A symbol that is not a member of the column's universe.
    UnknownSymbol {
        /// Debug rendering of the rejected symbol.
        symbol: String,
    },
    /// A stored ordinal that does not resolve against the universe.
    ///
    /// Unreachable through `set`; indicates a layout or versioning mismatch.
    Corruption {
        /// Slot that failed to decode.
        index: usize,
        /// The ordinal found in the slot.
        ordinal: i32,
        /// Size of the universe.
        universe_len: usize,
    },
    /// Allocation or copy failure in the backing storage.
    Storage(StorageError),
    /// Invalid element layout.
    Layout(LayoutError),
}

impl fmt::Display for ColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "index {index} out of range for capacity {capacity}")
            }
            Self::UnknownSymbol { symbol } => {
                write!(f, "symbol {symbol} is not in the column universe")
            }
            Self::Corruption {
                index,
                ordinal,
                universe_len,
            } => {
                write!(
                    f,
                    "corrupt slot {index}: ordinal {ordinal} outside universe of {universe_len}"
                )
            }
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Layout(err) => write!(f, "layout error: {err}"),
        }
    }
}

impl Error for ColumnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ColumnError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<LayoutError> for ColumnError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_is_source() {
        let err = ColumnError::from(StorageError::ResourceExhausted {
            requested: 8,
            available: 0,
        });
        assert!(err.source().is_some());
        assert!(err.to_string().contains("storage exhausted"));
    }

    #[test]
    fn index_error_has_no_source() {
        let err = ColumnError::IndexOutOfRange {
            index: 10,
            capacity: 10,
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "index 10 out of range for capacity 10");
    }
}
