//! The core codec contract shared by every combinator.

use crate::error::Error;
use bytes::{Bytes, BytesMut};

/// Encoded-size class of a codec, decided once at construction.
///
/// A [`Size::Fixed`] codec consumes and produces exactly the stated number of
/// bytes for every value; a [`Size::Variable`] codec's byte count depends on
/// the value and is computed by [`Codec::encode_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    Fixed(usize),
    Variable,
}

impl Size {
    /// Returns the byte count if this is a fixed size.
    pub fn fixed(&self) -> Option<usize> {
        match self {
            Size::Fixed(n) => Some(*n),
            Size::Variable => None,
        }
    }

    /// Returns true if this is a fixed size.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Size::Fixed(_))
    }
}

/// A composable encoder/decoder over values of type [`Codec::Value`].
///
/// Codecs are immutable values constructed once and reused across arbitrarily
/// many calls; they hold no per-call state, so a codec shared between threads
/// needs no synchronization as long as each call supplies its own buffer.
///
/// # Contract
///
/// - [`write`](Codec::write) touches only `buf[offset..offset + written]` and
///   returns exactly [`encode_size`](Codec::encode_size) bytes written.
/// - [`read`](Codec::read) is a pure function of `(buf, offset)`. Malformed
///   or truncated input is reported as `Err(_)` (the failure marker), which
///   always means zero bytes were consumed. `Ok((value, 0))` is a legitimate
///   zero-length decode, never a failure.
/// - Caller defects panic: writing past the destination slice, encoding a
///   value the codec cannot represent, or offset arithmetic overflowing.
pub trait Codec {
    /// The type of values this codec encodes and decodes.
    type Value;

    /// The size class of this codec.
    ///
    /// [`Size::Fixed`] never depends on the value being encoded.
    fn size(&self) -> Size;

    /// The exact number of bytes [`write`](Codec::write) will produce for
    /// `value`, without performing the encode.
    fn encode_size(&self, value: &Self::Value) -> usize;

    /// Encodes `value` into `buf` starting at `offset`.
    ///
    /// Returns the number of bytes written. Panics if the destination region
    /// is out of bounds or `value` is not representable by this codec.
    fn write(&self, value: &Self::Value, buf: &mut [u8], offset: usize) -> usize;

    /// Decodes a value from `buf` starting at `offset`.
    ///
    /// Returns the value and the number of bytes consumed. Takes `&Bytes`
    /// rather than a plain slice so raw-byte codecs can return zero-copy
    /// views into the source region.
    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Self::Value, usize), Error>;

    /// Encodes `value` into a freshly allocated buffer of exactly
    /// [`encode_size`](Codec::encode_size) bytes.
    ///
    /// Panics if the `write` implementation does not write the expected
    /// number of bytes.
    ///
    /// (Provided method).
    fn encode(&self, value: &Self::Value) -> Bytes {
        let len = self.encode_size(value);
        let mut buf = BytesMut::zeroed(len);
        let written = self.write(value, &mut buf, 0);
        assert_eq!(written, len, "write() did not write expected bytes");
        buf.freeze()
    }

    /// Decodes a value from the start of `buf`, ensuring the buffer is fully
    /// consumed.
    ///
    /// (Provided method).
    fn decode(&self, buf: &Bytes) -> Result<Self::Value, Error> {
        let (value, consumed) = self.read(buf, 0)?;
        let remaining = buf.len() - consumed;
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::primitives::{U16Be, U8};
    use bytes::Bytes;

    #[test]
    fn test_size_accessors() {
        assert_eq!(Size::Fixed(4).fixed(), Some(4));
        assert_eq!(Size::Variable.fixed(), None);
        assert!(Size::Fixed(0).is_fixed());
        assert!(!Size::Variable.is_fixed());
    }

    #[test]
    fn test_insufficient_buffer() {
        let buf = Bytes::from_static(&[0x01]);
        assert!(matches!(U16Be.read(&buf, 0), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_extra_data() {
        let buf = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(U8.decode(&buf), Err(Error::ExtraData(1))));
    }

    #[test]
    fn test_encode_allocates_exact() {
        let encoded = U16Be.encode(&0x0102);
        assert_eq!(encoded, Bytes::from_static(&[0x01, 0x02]));
        assert_eq!(U16Be.decode(&encoded).unwrap(), 0x0102);
    }

    #[test]
    fn test_read_at_offset() {
        let buf = Bytes::from_static(&[0xFF, 0x01, 0x2C]);
        let (value, consumed) = U16Be.read(&buf, 1).unwrap();
        assert_eq!(value, 300);
        assert_eq!(consumed, 2);
    }
}
