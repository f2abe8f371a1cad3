//! Ordered composition of named child codecs into one record codec.
//!
//! A [`StructCodec`] holds an explicit ordered list of `(name, codec)` pairs;
//! insertion order is the wire order on both encode and decode. Field values
//! are carried by the dynamic [`Value`] enum so children of different value
//! types can live in one record, and [`Record`] preserves field order itself
//! rather than relying on any map type's iteration semantics.

use crate::{Codec, Error, Size};
use bytes::Bytes;

/// A dynamically typed field value.
///
/// All unsigned integer codecs widen to `Unsigned` and all signed ones to
/// `Signed`, so round-trip equality holds regardless of the wire width.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bytes(Bytes),
    String(String),
    Array(Vec<Value>),
    Record(Record),
}

/// An ordered mapping of field names to [`Value`]s.
///
/// Field order is insertion order and determines the wire layout; two records
/// with the same fields in different orders are not equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, builder-style.
    ///
    /// Panics if the name is already present.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        assert!(
            self.get(&name).is_none(),
            "duplicate field name: {name}"
        );
        self.fields.push((name, value.into()));
        self
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

macro_rules! impl_value_from {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

impl_value_from!(u8, Unsigned);
impl_value_from!(u16, Unsigned);
impl_value_from!(u32, Unsigned);
impl_value_from!(u64, Unsigned);
impl_value_from!(i8, Signed);
impl_value_from!(i16, Signed);
impl_value_from!(i32, Signed);
impl_value_from!(i64, Signed);
impl_value_from!(f32, Float);
impl_value_from!(f64, Float);
impl_value_from!(Bytes, Bytes);
impl_value_from!(String, String);
impl_value_from!(Vec<Value>, Array);
impl_value_from!(Record, Record);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// Conversion between a codec's native value type and the dynamic [`Value`]
/// carried in records.
///
/// `from_value` returns `None` when the variant or range does not match the
/// native type, which the struct codec treats as a caller defect.
pub trait FieldValue: Sized {
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_field_int {
    ($type:ty, $variant:ident) => {
        impl FieldValue for $type {
            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => <$type>::try_from(*v).ok(),
                    _ => None,
                }
            }
        }
    };
}

impl_field_int!(u8, Unsigned);
impl_field_int!(u16, Unsigned);
impl_field_int!(u32, Unsigned);
impl_field_int!(u64, Unsigned);
impl_field_int!(i8, Signed);
impl_field_int!(i16, Signed);
impl_field_int!(i32, Signed);
impl_field_int!(i64, Signed);

impl FieldValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self.into())
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => {
                let narrowed = *v as f32;
                // Narrowing must be exact, mirroring the try_from checks on
                // the integer impls. NaN never compares equal to itself but
                // survives the conversion.
                if narrowed as f64 == *v || v.is_nan() {
                    Some(narrowed)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Bytes {
    fn into_value(self) -> Value {
        Value::Bytes(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for Record {
    fn into_value(self) -> Value {
        Value::Record(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Record(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(FieldValue::into_value).collect())
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// Object-safe view of a child codec operating on dynamic [`Value`]s.
trait DynCodec: Send + Sync {
    fn size(&self) -> Size;
    fn encode_size(&self, value: &Value) -> usize;
    fn write(&self, value: &Value, buf: &mut [u8], offset: usize) -> usize;
    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Value, usize), Error>;
}

struct Field<C>(C);

impl<C> Field<C>
where
    C: Codec,
    C::Value: FieldValue,
{
    fn native(&self, value: &Value) -> C::Value {
        C::Value::from_value(value)
            .unwrap_or_else(|| panic!("field value does not match codec: {value:?}"))
    }
}

impl<C> DynCodec for Field<C>
where
    C: Codec + Send + Sync,
    C::Value: FieldValue,
{
    fn size(&self) -> Size {
        self.0.size()
    }

    fn encode_size(&self, value: &Value) -> usize {
        self.0.encode_size(&self.native(value))
    }

    fn write(&self, value: &Value, buf: &mut [u8], offset: usize) -> usize {
        self.0.write(&self.native(value), buf, offset)
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Value, usize), Error> {
        let (value, consumed) = self.0.read(buf, offset)?;
        Ok((value.into_value(), consumed))
    }
}

/// An ordered composition of named child codecs forming one record codec.
///
/// If every child has a fixed size the struct's total size is precomputed at
/// build time and encoding never consults the values; otherwise
/// [`encode_size`](Codec::encode_size) sums each child's fixed or computed
/// contribution.
pub struct StructCodec {
    fields: Vec<(String, Box<dyn DynCodec>)>,
    size: Size,
}

impl StructCodec {
    pub fn builder() -> StructBuilder {
        StructBuilder { fields: Vec::new() }
    }
}

/// Builder assembling a [`StructCodec`] field by field, in wire order.
pub struct StructBuilder {
    fields: Vec<(String, Box<dyn DynCodec>)>,
}

impl StructBuilder {
    /// Appends a field. Declaration order is the wire order.
    ///
    /// Panics if the name is already present.
    pub fn field<C>(mut self, name: impl Into<String>, codec: C) -> Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: FieldValue,
    {
        let name = name.into();
        assert!(
            self.fields.iter().all(|(n, _)| *n != name),
            "duplicate field name: {name}"
        );
        self.fields.push((name, Box::new(Field(codec))));
        self
    }

    pub fn build(self) -> StructCodec {
        let mut total: usize = 0;
        let mut fixed = true;
        for (_, codec) in &self.fields {
            match codec.size() {
                Size::Fixed(n) => {
                    total = total.checked_add(n).expect("struct size overflow")
                }
                Size::Variable => fixed = false,
            }
        }
        StructCodec {
            fields: self.fields,
            size: if fixed { Size::Fixed(total) } else { Size::Variable },
        }
    }
}

impl StructCodec {
    fn field_value<'a>(&self, record: &'a Record, name: &str) -> &'a Value {
        record
            .get(name)
            .unwrap_or_else(|| panic!("missing field: {name}"))
    }
}

impl Codec for StructCodec {
    type Value = Record;

    fn size(&self) -> Size {
        self.size
    }

    fn encode_size(&self, record: &Record) -> usize {
        self.fields
            .iter()
            .map(|(name, codec)| match codec.size() {
                Size::Fixed(n) => n,
                Size::Variable => codec.encode_size(self.field_value(record, name)),
            })
            .sum()
    }

    fn write(&self, record: &Record, buf: &mut [u8], offset: usize) -> usize {
        let mut pos = offset;
        for (name, codec) in &self.fields {
            let written = codec.write(self.field_value(record, name), buf, pos);
            pos = pos.checked_add(written).expect("offset overflow");
        }
        pos - offset
    }

    fn read(&self, buf: &Bytes, offset: usize) -> Result<(Record, usize), Error> {
        let mut pos = offset;
        let mut record = Record::new();
        for (name, codec) in &self.fields {
            // Any child failure fails the whole struct; no partial records.
            let (value, consumed) = codec.read(buf, pos)?;
            record.fields.push((name.clone(), value));
            pos += consumed;
        }
        Ok((record, pos - offset))
    }
}
