//! Storage-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while allocating or copying regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The storage cannot satisfy the request (budget, address space or
    /// allocator exhaustion). Fatal; callers do not retry.
    ResourceExhausted {
        /// Number of bytes requested.
        requested: u64,
        /// Bytes still available under the storage budget.
        available: u64,
    },
    /// `element_count * element_width` does not fit in the address space.
    SizeOverflow {
        /// Requested element count.
        element_count: usize,
        /// Width of one element in bytes.
        element_width: usize,
    },
    /// A bulk copy whose source is larger than the target.
    CopyOverflow {
        /// Size of the source region in bytes.
        source_bytes: usize,
        /// Size of the target region in bytes.
        target_bytes: usize,
    },
    /// A storage returned a region shorter than the size it was asked for.
    RegionTooSmall {
        /// Bytes the request needed.
        expected_bytes: usize,
        /// Bytes the returned region holds.
        actual_bytes: usize,
    },
    /// Invalid storage configuration.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted {
                requested,
                available,
            } => {
                write!(
                    f,
                    "storage exhausted: requested {requested} bytes, {available} bytes available"
                )
            }
            Self::SizeOverflow {
                element_count,
                element_width,
            } => {
                write!(
                    f,
                    "region size overflow: {element_count} elements of {element_width} bytes"
                )
            }
            Self::CopyOverflow {
                source_bytes,
                target_bytes,
            } => {
                write!(
                    f,
                    "cannot copy {source_bytes} bytes into a {target_bytes}-byte region"
                )
            }
            Self::RegionTooSmall {
                expected_bytes,
                actual_bytes,
            } => {
                write!(
                    f,
                    "storage returned {actual_bytes} bytes, {expected_bytes} bytes requested"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid storage config: {reason}"),
        }
    }
}

impl Error for StorageError {}
