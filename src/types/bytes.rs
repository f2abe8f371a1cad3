//! Raw byte-region codecs: fixed-width and length-prefixed.

use crate::{Codec, Error, Size};
use bytes::Bytes;

/// A codec for exactly `n` raw bytes with no framing.
///
/// Decoding returns a zero-copy [`Bytes`] view into the source region.
/// Because the decoded value shares the source buffer, round-trip identity is
/// content equality, not pointer equality.
#[derive(Clone, Copy, Debug)]
pub struct FixedBytes {
    len: usize,
}

impl FixedBytes {
    /// Creates a codec over exactly `len` raw bytes.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Codec for FixedBytes {
    type Value = Bytes;

    fn size(&self) -> Size {
        Size::Fixed(self.len)
    }

    fn encode_size(&self, _: &Bytes) -> usize {
        self.len
    }

    fn write(&self, value: &Bytes, buf: &mut [u8], offset: usize) -> usize {
        assert_eq!(
            value.len(),
            self.len,
            "fixed byte region must be exactly {} bytes",
            self.len
        );
        buf[offset..offset + self.len].copy_from_slice(value);
        self.len
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Bytes, usize), Error> {
        // The region must lie inside the buffer even when it is empty; an
        // offset past the end is insufficient data, not a valid empty view.
        let end = offset.checked_add(self.len).ok_or(Error::EndOfBuffer)?;
        if end > buf.len() {
            return Err(Error::EndOfBuffer);
        }
        Ok((buf.slice(offset..end), self.len))
    }

    /// With no destination buffer, encoding a raw byte region degenerates to
    /// an identity pass-through: the returned [`Bytes`] is a handle to the
    /// value's own region, not a fresh allocation.
    fn encode(&self, value: &Bytes) -> Bytes {
        assert_eq!(
            value.len(),
            self.len,
            "fixed byte region must be exactly {} bytes",
            self.len
        );
        value.clone()
    }
}

/// A length-prefixed byte region: `[length prefix][raw bytes]`.
///
/// The prefix is encoded by a caller-chosen length codec, fixed or variable
/// width. Decoding returns a zero-copy view of the payload.
#[derive(Clone, Copy, Debug)]
pub struct VarBytes<L> {
    len_codec: L,
}

impl<L> VarBytes<L> {
    /// Creates a length-prefixed byte codec using `len_codec` for the prefix.
    pub fn new(len_codec: L) -> Self {
        Self { len_codec }
    }

    pub(crate) fn len_codec(&self) -> &L {
        &self.len_codec
    }
}

impl<L> Codec for VarBytes<L>
where
    L: Codec,
    L::Value: TryFrom<usize>,
    usize: TryFrom<L::Value>,
{
    type Value = Bytes;

    fn size(&self) -> Size {
        Size::Variable
    }

    fn encode_size(&self, value: &Bytes) -> usize {
        let prefix = match self.len_codec.size() {
            Size::Fixed(n) => n,
            Size::Variable => self.len_codec.encode_size(&to_prefix::<L>(value.len())),
        };
        prefix + value.len()
    }

    fn write(&self, value: &Bytes, buf: &mut [u8], offset: usize) -> usize {
        let prefix = self.len_codec.write(&to_prefix::<L>(value.len()), buf, offset);
        let start = offset + prefix;
        buf[start..start + value.len()].copy_from_slice(value);
        prefix + value.len()
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Bytes, usize), Error> {
        let (declared, prefix) = self.len_codec.read(buf, offset)?;
        // The declared length is untrusted input: convert and add with
        // overflow checks before comparing against the buffer.
        let len = usize::try_from(declared).map_err(|_| Error::EndOfBuffer)?;
        let start = offset + prefix;
        let end = start.checked_add(len).ok_or(Error::EndOfBuffer)?;
        if end > buf.len() {
            return Err(Error::EndOfBuffer);
        }
        Ok((buf.slice(start..end), prefix + len))
    }
}

/// Converts a payload byte count into the length codec's value type.
///
/// Panics if the count does not fit, e.g. a 300-byte payload behind a `U8`
/// prefix. This is an encode-time caller defect, discovered before any byte
/// of the payload is written.
pub(crate) fn to_prefix<L: Codec>(len: usize) -> L::Value
where
    L::Value: TryFrom<usize>,
{
    match L::Value::try_from(len) {
        Ok(v) => v,
        Err(_) => panic!("byte length {len} exceeds the range of the length codec"),
    }
}
