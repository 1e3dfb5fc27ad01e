//! This module contains the kernel for inverting run-length encoding. The
//! encoded form is a flat Int32 sequence of `(value, length)` pairs in run
//! order; the decoded form is the expanded sequence in the declared integer
//! type.

use num_traits::{NumCast, PrimInt};

use crate::error::BincifError;
use crate::types::{DataType, NumericArray};

/// Expands `(value, length)` pairs into a sequence of exactly `src_size`
/// elements of `src_type`.
///
/// # Errors
/// `MalformedEncoding` if the pair list has odd length, a run length is
/// negative, a run value does not fit the declared element type, or the
/// expanded total differs from `src_size`.
pub fn decode(
    values: &[i32],
    src_type: DataType,
    src_size: usize,
) -> Result<NumericArray, BincifError> {
    if values.len() % 2 != 0 {
        return Err(BincifError::malformed(format!(
            "run-length input of {} values does not form (value, length) pairs",
            values.len()
        )));
    }
    match src_type {
        DataType::Int8 => Ok(NumericArray::Int8(expand(values, src_size)?)),
        DataType::Int16 => Ok(NumericArray::Int16(expand(values, src_size)?)),
        DataType::Int32 => Ok(NumericArray::Int32(expand(values, src_size)?)),
        DataType::Uint8 => Ok(NumericArray::Uint8(expand(values, src_size)?)),
        DataType::Uint16 => Ok(NumericArray::Uint16(expand(values, src_size)?)),
        DataType::Uint32 => Ok(NumericArray::Uint32(expand(values, src_size)?)),
        other => Err(BincifError::malformed(format!(
            "RunLength srcType must be an integer type, got {}",
            other
        ))),
    }
}

fn expand<T: PrimInt>(pairs: &[i32], src_size: usize) -> Result<Vec<T>, BincifError> {
    let mut out = Vec::with_capacity(src_size);
    for pair in pairs.chunks_exact(2) {
        let (value, length) = (pair[0], pair[1]);
        if length < 0 {
            return Err(BincifError::malformed(format!(
                "run of {} has negative length {}",
                value, length
            )));
        }
        let value: T = NumCast::from(value).ok_or_else(|| {
            BincifError::malformed(format!(
                "run value {} does not fit the declared element type",
                value
            ))
        })?;
        out.extend(std::iter::repeat(value).take(length as usize));
    }
    if out.len() != src_size {
        return Err(BincifError::malformed(format!(
            "run-length expansion produced {} values, descriptor declares {}",
            out.len(),
            src_size
        )));
    }
    Ok(out)
}
