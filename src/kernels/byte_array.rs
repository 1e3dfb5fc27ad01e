//! This module contains the kernel for the terminal ByteArray step: the raw
//! little-endian buffer is reinterpreted as a typed numeric sequence of the
//! declared width. Every well-formed stack bottoms out here.

use crate::error::BincifError;
use crate::types::{DataType, NumericArray};

/// Reinterprets `bytes` as elements of `ty`.
///
/// # Errors
/// `MalformedEncoding` if the buffer does not divide into whole elements.
/// An out-of-set type code never reaches this function; it is rejected as
/// `UnsupportedType` when the descriptor is built.
pub fn decode(bytes: &[u8], ty: DataType) -> Result<NumericArray, BincifError> {
    NumericArray::from_le_bytes(bytes, ty)
}
