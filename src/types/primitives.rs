//! Fixed-width numeric codecs.
//!
//! Every codec here is a unit struct produced by one factory macro: given a
//! primitive type and an endianness it yields a [`Codec`] that writes the raw
//! N-byte representation and reads it back. Unqualified names (`U16`, `I32`,
//! `F64`, ...) are aliases for the big-endian variants.
//!
//! All widths, including 64-bit, go through the same factory: `u64`/`i64` are
//! lossless in Rust, so no split-word reconstruction is needed.

use crate::{Codec, Error, Size};
use bytes::Bytes;
use paste::paste;

macro_rules! impl_numeric {
    ($name:ident, $type:ty, $to_bytes:ident, $from_bytes:ident) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Codec for $name {
            type Value = $type;

            #[inline]
            fn size(&self) -> Size {
                Size::Fixed(std::mem::size_of::<$type>())
            }

            #[inline]
            fn encode_size(&self, _: &$type) -> usize {
                std::mem::size_of::<$type>()
            }

            #[inline]
            fn write(&self, value: &$type, buf: &mut [u8], offset: usize) -> usize {
                const N: usize = std::mem::size_of::<$type>();
                buf[offset..offset + N].copy_from_slice(&value.$to_bytes());
                N
            }

            #[inline]
            fn read(&self, buf: &Bytes, offset: usize) -> Result<($type, usize), Error> {
                const N: usize = std::mem::size_of::<$type>();
                if buf.len().saturating_sub(offset) < N {
                    return Err(Error::EndOfBuffer);
                }
                let mut raw = [0u8; N];
                raw.copy_from_slice(&buf[offset..offset + N]);
                Ok((<$type>::$from_bytes(raw), N))
            }
        }
    };
}

// Single-byte codecs have no endianness.
impl_numeric!(U8, u8, to_be_bytes, from_be_bytes);
impl_numeric!(I8, i8, to_be_bytes, from_be_bytes);

// Generates the big/little-endian pair for a multi-byte primitive, plus an
// unqualified alias for the big-endian variant.
macro_rules! impl_endian_pair {
    ($base:ident, $type:ty) => {
        paste! {
            impl_numeric!([<$base Be>], $type, to_be_bytes, from_be_bytes);
            impl_numeric!([<$base Le>], $type, to_le_bytes, from_le_bytes);

            pub use self::[<$base Be>] as $base;
        }
    };
}

impl_endian_pair!(U16, u16);
impl_endian_pair!(I16, i16);
impl_endian_pair!(U32, u32);
impl_endian_pair!(I32, i32);
impl_endian_pair!(U64, u64);
impl_endian_pair!(I64, i64);
impl_endian_pair!(F32, f32);
impl_endian_pair!(F64, f64);
