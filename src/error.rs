//! This module defines the single, unified error type for the entire bincif
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.
//!
//! Every failure a decode can produce collapses into one of three semantic
//! kinds. All payloads are plain data, so the enum is `Clone` and a cached
//! column slot can hold a failed decode verbatim.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BincifError {
    /// A ByteArray descriptor (or an integer/float array request) cited a
    /// data-type code outside the eight enumerated widths.
    #[error("unsupported data-type code for this operation: {0}")]
    UnsupportedType(i32),

    /// A transform's structural precondition failed: run-length output did
    /// not match the declared size, a quantization had fewer than two steps,
    /// an integer-packing run was truncated, a buffer did not divide evenly
    /// into elements, and so on.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A descriptor carried a `kind` string that is none of the six known
    /// transform kinds.
    #[error("unknown encoding kind: {0}")]
    UnknownEncodingKind(String),
}

impl BincifError {
    /// Shorthand for the most common failure kind.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        BincifError::MalformedEncoding(msg.into())
    }
}
