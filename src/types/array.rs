//! Length-prefixed sequence of homogeneous items.

use crate::types::bytes::to_prefix;
use crate::{Codec, Error, Size};
use bytes::Bytes;

/// A length-prefixed array: `[content byte count][item][item]...`.
///
/// The prefix counts total encoded content **bytes**, not items; on decode the
/// prefix, not per-item framing, is authoritative for where the array ends.
pub struct VarArray<L, I> {
    len_codec: L,
    item: I,
}

impl<L, I> VarArray<L, I> {
    /// Creates an array codec with `len_codec` for the content-byte prefix
    /// and `item` for each element.
    pub fn new(len_codec: L, item: I) -> Self {
        Self { len_codec, item }
    }
}

impl<L, I> VarArray<L, I>
where
    I: Codec,
{
    fn content_size(&self, items: &[I::Value]) -> usize {
        match self.item.size() {
            Size::Fixed(n) => n * items.len(),
            Size::Variable => items.iter().map(|i| self.item.encode_size(i)).sum(),
        }
    }
}

impl<L, I> Codec for VarArray<L, I>
where
    L: Codec,
    L::Value: TryFrom<usize>,
    usize: TryFrom<L::Value>,
    I: Codec,
{
    type Value = Vec<I::Value>;

    fn size(&self) -> Size {
        Size::Variable
    }

    fn encode_size(&self, items: &Vec<I::Value>) -> usize {
        let content = self.content_size(items);
        let prefix = match self.len_codec.size() {
            Size::Fixed(n) => n,
            Size::Variable => self.len_codec.encode_size(&to_prefix::<L>(content)),
        };
        prefix + content
    }

    fn write(&self, items: &Vec<I::Value>, buf: &mut [u8], offset: usize) -> usize {
        let content = self.content_size(items);
        let mut pos = offset;
        pos += self.len_codec.write(&to_prefix::<L>(content), buf, pos);
        for item in items {
            pos += self.item.write(item, buf, pos);
        }
        pos - offset
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Vec<I::Value>, usize), Error> {
        let (declared, prefix) = self.len_codec.read(buf, offset)?;
        let content = usize::try_from(declared).map_err(|_| Error::EndOfBuffer)?;
        let start = offset + prefix;
        let end = start.checked_add(content).ok_or(Error::EndOfBuffer)?;
        if end > buf.len() {
            return Err(Error::EndOfBuffer);
        }

        let mut items = Vec::new();
        let mut pos = start;
        while pos < end {
            // A failed item fails the whole array; an item that makes no
            // progress would otherwise loop forever against the declared end.
            let (item, consumed) = self.item.read(buf, pos)?;
            if consumed == 0 {
                return Err(Error::InvalidData(
                    "vararray",
                    "item consumed no bytes".into(),
                ));
            }
            items.push(item);
            pos += consumed;
        }
        if pos != end {
            return Err(Error::LengthExceeded(pos - start, content));
        }
        Ok((items, prefix + content))
    }
}
