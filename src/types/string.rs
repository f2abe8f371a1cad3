//! Length-prefixed text codec layered on [`VarBytes`].

use crate::types::bytes::VarBytes;
use crate::{Codec, Error, Size};
use bytes::Bytes;

/// Text encoding for [`VarString`], chosen at construction time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    /// Byte length of `value` under this encoding, without materializing it.
    fn byte_len(&self, value: &str) -> usize {
        match self {
            TextEncoding::Utf8 => value.len(),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                value.encode_utf16().count() * 2
            }
        }
    }

    fn encode(&self, value: &str) -> Bytes {
        match self {
            TextEncoding::Utf8 => Bytes::copy_from_slice(value.as_bytes()),
            TextEncoding::Utf16Le => {
                let mut out = Vec::with_capacity(self.byte_len(value));
                for unit in value.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                Bytes::from(out)
            }
            TextEncoding::Utf16Be => {
                let mut out = Vec::with_capacity(self.byte_len(value));
                for unit in value.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                Bytes::from(out)
            }
        }
    }

    fn decode(&self, raw: &Bytes) -> Result<String, Error> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(raw.to_vec())
                .map_err(|e| Error::InvalidData("varstring", e.to_string())),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if raw.len() % 2 != 0 {
                    return Err(Error::InvalidData(
                        "varstring",
                        "odd byte count for utf-16".into(),
                    ));
                }
                let units: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|pair| {
                        let pair = [pair[0], pair[1]];
                        match self {
                            TextEncoding::Utf16Le => u16::from_le_bytes(pair),
                            _ => u16::from_be_bytes(pair),
                        }
                    })
                    .collect();
                String::from_utf16(&units)
                    .map_err(|e| Error::InvalidData("varstring", e.to_string()))
            }
        }
    }
}

/// A length-prefixed string: `[length prefix][encoded text]`.
///
/// The prefix counts the byte length of the encoded text (not characters) and
/// is written by the caller-chosen length codec, exactly as in [`VarBytes`].
pub struct VarString<L> {
    bytes: VarBytes<L>,
    encoding: TextEncoding,
}

impl<L> VarString<L> {
    /// Creates a UTF-8 string codec using `len_codec` for the prefix.
    pub fn new(len_codec: L) -> Self {
        Self::with_encoding(len_codec, TextEncoding::Utf8)
    }

    /// Creates a string codec with an explicit text encoding.
    pub fn with_encoding(len_codec: L, encoding: TextEncoding) -> Self {
        Self {
            bytes: VarBytes::new(len_codec),
            encoding,
        }
    }
}

impl<L> Codec for VarString<L>
where
    L: Codec,
    L::Value: TryFrom<usize>,
    usize: TryFrom<L::Value>,
{
    type Value = String;

    fn size(&self) -> Size {
        Size::Variable
    }

    fn encode_size(&self, value: &String) -> usize {
        let byte_len = self.encoding.byte_len(value);
        let prefix = match self.bytes.len_codec().size() {
            Size::Fixed(n) => n,
            Size::Variable => self
                .bytes
                .len_codec()
                .encode_size(&crate::types::bytes::to_prefix::<L>(byte_len)),
        };
        prefix + byte_len
    }

    fn write(&self, value: &String, buf: &mut [u8], offset: usize) -> usize {
        self.bytes.write(&self.encoding.encode(value), buf, offset)
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(String, usize), Error> {
        let (raw, consumed) = self.bytes.read(buf, offset)?;
        Ok((self.encoding.decode(&raw)?, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::primitives::{U16Be, U8};
    use crate::varint::Varint;

    #[test]
    fn test_utf8_conformity() {
        let codec = VarString::new(U8);
        let encoded = codec.encode(&"hi".to_string());
        assert_eq!(encoded[..], [0x02, 0x68, 0x69]);
        let (decoded, consumed) = codec.read(&encoded, 0).unwrap();
        assert_eq!(decoded, "hi");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_truncated_payload() {
        let buf = Bytes::from_static(&[0x02, 0x68]);
        assert!(matches!(
            VarString::new(U8).read(&buf, 0),
            Err(Error::EndOfBuffer)
        ));
    }

    #[test]
    fn test_multibyte_utf8() {
        let codec = VarString::new(Varint);
        let value = "héllo ☃".to_string();
        assert_eq!(codec.encode_size(&value), 1 + value.len());
        let encoded = codec.encode(&value);
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_empty_string() {
        let codec = VarString::new(U8);
        let encoded = codec.encode(&String::new());
        assert_eq!(encoded[..], [0x00]);
        assert_eq!(codec.decode(&encoded).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_is_failure_not_panic() {
        let buf = Bytes::from_static(&[0x02, 0xFF, 0xFE]);
        assert!(matches!(
            VarString::new(U8).read(&buf, 0),
            Err(Error::InvalidData("varstring", _))
        ));
    }

    #[test]
    fn test_utf16_roundtrip() {
        for encoding in [TextEncoding::Utf16Le, TextEncoding::Utf16Be] {
            let codec = VarString::with_encoding(U16Be, encoding);
            let value = "h€llo 𝄞".to_string();
            let encoded = codec.encode(&value);
            assert_eq!(encoded.len(), codec.encode_size(&value));
            assert_eq!(codec.decode(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_utf16le_wire_format() {
        let codec = VarString::with_encoding(U8, TextEncoding::Utf16Le);
        let encoded = codec.encode(&"hi".to_string());
        assert_eq!(encoded[..], [0x04, 0x68, 0x00, 0x69, 0x00]);
    }

    #[test]
    fn test_utf16_odd_length_is_failure() {
        let codec = VarString::with_encoding(U8, TextEncoding::Utf16Le);
        let buf = Bytes::from_static(&[0x01, 0x68]);
        assert!(matches!(
            codec.read(&buf, 0),
            Err(Error::InvalidData("varstring", _))
        ));
    }
}
