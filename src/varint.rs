//! Variable-length integer encoding and decoding.
//!
//! This module implements Google's Protocol Buffers variable-length integer
//! encoding. Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! [`Varint`] satisfies the ordinary [`Codec`] contract over `u64`, so it can
//! serve as the length codec of any variable-length construct.

use crate::{Codec, Error, Size};
use bytes::Bytes;

const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// Maximum encoded length of a 64-bit varint.
const MAX_BYTES: usize = 10;

/// Calculates the number of bytes needed to encode `value` as a varint.
pub fn size(value: u64) -> usize {
    let data_bits = 64 - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// A variable-width unsigned integer codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Varint;

impl Codec for Varint {
    type Value = u64;

    fn size(&self) -> Size {
        Size::Variable
    }

    fn encode_size(&self, value: &u64) -> usize {
        size(*value)
    }

    fn write(&self, value: &u64, buf: &mut [u8], offset: usize) -> usize {
        let mut val = *value;
        let mut pos = offset;
        while val >= CONTINUATION_BIT_MASK as u64 {
            buf[pos] = (val as u8) | CONTINUATION_BIT_MASK;
            val >>= DATA_BITS_PER_BYTE;
            pos += 1;
        }
        buf[pos] = val as u8;
        pos + 1 - offset
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(u64, usize), Error> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for (i, &byte) in buf.iter().skip(offset).take(MAX_BYTES).enumerate() {
            // The tenth byte may only carry the single remaining data bit; a
            // larger payload (or a set continuation bit, which occupies the
            // same high positions) cannot fit in a u64.
            let remaining_bits = 64 - shift;
            if remaining_bits < DATA_BITS_PER_BYTE {
                let relevant_bits = 8 - byte.leading_zeros() as usize;
                if relevant_bits > remaining_bits {
                    return Err(Error::InvalidVarint);
                }
            }

            result |= ((byte & DATA_BITS_MASK) as u64) << shift;

            if byte & CONTINUATION_BIT_MASK == 0 {
                return Ok((result, i + 1));
            }

            shift += DATA_BITS_PER_BYTE;
        }

        // A tenth byte either terminates or fails the overflow check above,
        // so falling out of the loop means the buffer ran out first.
        Err(Error::EndOfBuffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_roundtrip() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let encoded = Varint.encode(&value);
            assert_eq!(encoded.len(), size(value));
            assert_eq!(encoded.len(), Varint.encode_size(&value));

            let (decoded, consumed) = Varint.read(&encoded, 0).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn test_varint_conformity() {
        assert_eq!(Varint.encode(&0)[..], [0x00]);
        assert_eq!(Varint.encode(&1)[..], [0x01]);
        assert_eq!(Varint.encode(&127)[..], [0x7F]);
        assert_eq!(Varint.encode(&128)[..], [0x80, 0x01]);
        assert_eq!(Varint.encode(&300)[..], [0xAC, 0x02]);
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let buf = Bytes::from_static(&[0x80]);
        assert!(matches!(Varint.read(&buf, 0), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_invalid() {
        // Ten continuation bytes followed by data that cannot fit in a u64.
        let buf = Bytes::from_static(&[
            0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02,
        ]);
        assert!(matches!(Varint.read(&buf, 0), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_varint_never_terminates() {
        let buf = Bytes::from_static(&[0xFF; 11]);
        assert!(matches!(Varint.read(&buf, 0), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_varint_at_offset() {
        let buf = Bytes::from_static(&[0xFF, 0xAC, 0x02, 0xFF]);
        let (value, consumed) = Varint.read(&buf, 1).unwrap();
        assert_eq!(value, 300);
        assert_eq!(consumed, 2);
    }
}
