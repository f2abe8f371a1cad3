//! Codec implementations for every supported wire construct.

pub mod array;
pub mod bounded;
pub mod bytes;
pub mod primitives;
pub mod record;
pub mod string;

pub use array::VarArray;
pub use bounded::Bounded;
pub use bytes::{FixedBytes, VarBytes};
pub use record::{FieldValue, Record, StructBuilder, StructCodec, Value};
pub use string::{TextEncoding, VarString};
