//! Composable binary codecs for structured records.
//!
//! # Overview
//!
//! A small set of primitive codecs (fixed-width integers and floats, bounded
//! values, raw buffers, length-prefixed buffers/strings/arrays) that combine
//! into arbitrary record layouts through ordinary composition. There is no
//! schema language and no code generation: the codec tree is assembled with
//! in-process construction calls, and the wire format is purely positional.
//!
//! Every codec obeys one contract ([`Codec`]): `write`/`read` at an explicit
//! byte offset, an exact [`Codec::encode_size`] for variable-length values,
//! and an explicit [`Size::Fixed`]/[`Size::Variable`] tag decided at
//! construction. Malformed or truncated input surfaces as [`Error`] from
//! `read`; API misuse (out-of-range values, missing fields, undersized
//! buffers) panics.
//!
//! # Example
//!
//! ```
//! use varstruct::{Codec, Record, StructCodec, VarString, Varint, U16Be, U8};
//!
//! // Construct once, reuse for every message.
//! let message = StructCodec::builder()
//!     .field("kind", U8)
//!     .field("port", U16Be)
//!     .field("name", VarString::new(Varint))
//!     .build();
//!
//! let record = Record::new()
//!     .with("kind", 1u8)
//!     .with("port", 8080u16)
//!     .with("name", "hello");
//!
//! let encoded = message.encode(&record);
//! assert_eq!(encoded.len(), message.encode_size(&record));
//!
//! let decoded = message.decode(&encoded).unwrap();
//! assert_eq!(decoded, record);
//! ```
//!
//! # Choosing length prefixes
//!
//! Every variable-length construct takes a caller-chosen length codec: any
//! integer codec works, fixed width ([`U8`], [`U32Be`], ...) or variable
//! width ([`Varint`]). The prefix of an array counts total encoded content
//! bytes, not items.

pub mod codec;
pub mod error;
pub mod types;
pub mod varint;

// Re-export main types and traits
pub use codec::{Codec, Size};
pub use error::Error;
pub use types::primitives::*;
pub use types::{
    Bounded, FieldValue, FixedBytes, Record, StructBuilder, StructCodec, TextEncoding, Value,
    VarArray, VarBytes, VarString,
};
pub use varint::Varint;
