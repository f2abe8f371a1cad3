//! Bounded-value decorator for numeric codecs.

use crate::{Codec, Error, Size};
use bytes::Bytes;
use std::fmt::Debug;

/// Wraps a numeric codec with an inclusive `[min, max]` validity check.
///
/// The bound is a construction-time contract, invisible on the wire: encoding
/// a value outside the range is a caller defect and panics before any byte is
/// written. Decoding deliberately does not re-validate: out-of-range bytes
/// decode to the raw value, matching the encode-side-only semantics of the
/// wire contract.
pub struct Bounded<C: Codec> {
    codec: C,
    min: C::Value,
    max: C::Value,
}

impl<C: Codec> Bounded<C>
where
    C::Value: PartialOrd + Debug,
{
    /// Creates a bounded codec over the inclusive range `[min, max]`.
    ///
    /// Panics if `min > max`.
    pub fn new(codec: C, min: C::Value, max: C::Value) -> Self {
        assert!(min <= max, "invalid bounds: min={min:?} > max={max:?}");
        Self { codec, min, max }
    }

    fn check(&self, value: &C::Value) {
        if *value < self.min || *value > self.max {
            panic!(
                "value out of bounds: {:?} (min={:?}, max={:?})",
                value, self.min, self.max
            );
        }
    }
}

impl<C: Codec> Codec for Bounded<C>
where
    C::Value: PartialOrd + Debug,
{
    type Value = C::Value;

    fn size(&self) -> Size {
        self.codec.size()
    }

    fn encode_size(&self, value: &Self::Value) -> usize {
        self.check(value);
        self.codec.encode_size(value)
    }

    fn write(&self, value: &Self::Value, buf: &mut [u8], offset: usize) -> usize {
        self.check(value);
        self.codec.write(value, buf, offset)
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Self::Value, usize), Error> {
        self.codec.read(buf, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::primitives::{U16Be, U8};
    use crate::varint::Varint;

    #[test]
    fn test_bounds_inclusive() {
        let codec = Bounded::new(U8, 10, 20);
        for value in [10u8, 15, 20] {
            let encoded = codec.encode(&value);
            assert_eq!(codec.decode(&encoded).unwrap(), value);
        }
    }

    #[test]
    #[should_panic(expected = "value out of bounds")]
    fn test_below_min_panics() {
        Bounded::new(U8, 10, 20).encode(&9);
    }

    #[test]
    #[should_panic(expected = "value out of bounds")]
    fn test_above_max_panics() {
        Bounded::new(U8, 10, 20).encode(&21);
    }

    #[test]
    #[should_panic(expected = "value out of bounds")]
    fn test_panics_before_any_byte_written() {
        let mut buf = [0u8; 2];
        Bounded::new(U16Be, 100, 200).write(&201, &mut buf, 0);
    }

    #[test]
    #[should_panic(expected = "invalid bounds")]
    fn test_inverted_bounds_panic() {
        Bounded::new(U8, 20, 10);
    }

    #[test]
    fn test_decode_does_not_revalidate() {
        // 42 is outside [100, 200] but decodes to the raw value anyway.
        let codec = Bounded::new(U8, 100, 200);
        let buf = Bytes::from_static(&[42]);
        assert_eq!(codec.decode(&buf).unwrap(), 42);
    }

    #[test]
    fn test_size_passes_through() {
        assert_eq!(Bounded::new(U16Be, 0, 100).size(), Size::Fixed(2));
        assert_eq!(Bounded::new(Varint, 0, 100).size(), Size::Variable);
        assert_eq!(Bounded::new(Varint, 0, 1000).encode_size(&300), 2);
    }
}
