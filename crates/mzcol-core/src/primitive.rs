//! Fixed-width primitive values and their byte encoding.
//!
//! Every value a column stores is ultimately a sequence of [`Primitive`]
//! slots. All primitives are encoded little-endian so that a region's
//! byte image is identical on every platform.

use std::fmt;

use crate::layout::FieldKind;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric value that can be read from and written to raw bytes.
///
/// Implemented for `f32`, `f64`, `i32` and `i64`. The trait is sealed:
/// layouts only know about these four widths.
pub trait Primitive: sealed::Sealed + Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Layout kind of this primitive.
    const KIND: FieldKind;

    /// Width in bytes.
    const WIDTH: usize;

    /// Decode from the first [`Self::WIDTH`] bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::WIDTH`].
    fn read_le(bytes: &[u8]) -> Self;

    /// Encode into the first [`Self::WIDTH`] bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::WIDTH`].
    fn write_le(self, bytes: &mut [u8]);
}

macro_rules! impl_primitive {
    ($ty:ty, $kind:expr) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: FieldKind = $kind;
            const WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..Self::WIDTH]);
                <$ty>::from_le_bytes(buf)
            }

            #[inline]
            fn write_le(self, bytes: &mut [u8]) {
                bytes[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_primitive!(f64, FieldKind::F64);
impl_primitive!(i64, FieldKind::I64);
impl_primitive!(f32, FieldKind::F32);
impl_primitive!(i32, FieldKind::I32);
