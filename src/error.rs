//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every variant describes malformed or insufficient wire data. API misuse
/// (out-of-range values, missing struct fields, undersized destination
/// buffers) is a caller defect and panics instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, String), // context, message
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("invalid varint")]
    InvalidVarint,
}
