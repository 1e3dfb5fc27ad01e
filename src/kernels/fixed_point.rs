//! This module contains the kernel for inverting fixed-point encoding: a
//! real value stored as its integer multiple of a constant factor.

use crate::error::BincifError;
use crate::types::{DataType, NumericArray};

/// Maps an Int32 sequence back to floats: `out[i] = in[i] / factor`.
///
/// The reciprocal is computed once and applied in double precision; Float32
/// output rounds each element at the end, which is the precision the encoder
/// targeted.
pub fn decode(
    values: &[i32],
    factor: f64,
    src_type: DataType,
) -> Result<NumericArray, BincifError> {
    if factor == 0.0 {
        return Err(BincifError::malformed("FixedPoint factor must be nonzero"));
    }
    let reciprocal = 1.0 / factor;
    match src_type {
        DataType::Float32 => Ok(NumericArray::Float32(
            values
                .iter()
                .map(|&v| (f64::from(v) * reciprocal) as f32)
                .collect(),
        )),
        DataType::Float64 => Ok(NumericArray::Float64(
            values.iter().map(|&v| f64::from(v) * reciprocal).collect(),
        )),
        other => Err(BincifError::malformed(format!(
            "FixedPoint srcType must be a float type, got {}",
            other
        ))),
    }
}
