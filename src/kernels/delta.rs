//! This module contains the kernel for inverting delta encoding: a cumulative
//! sum over the stored differences, seeded by the descriptor's origin.

use crate::error::BincifError;
use crate::types::{DataType, NumericArray};

/// Reconstructs the original sequence: `out[0] = in[0] + origin`,
/// `out[i] = in[i] + out[i - 1]`.
///
/// The running sum is carried in `i64` and wrapped into `src_type` on store;
/// modulo the target width this is identical to wrapping at every step, and
/// the encoder guarantees the true values fit. Empty input yields empty
/// output.
pub fn decode(
    values: &NumericArray,
    origin: i64,
    src_type: DataType,
) -> Result<NumericArray, BincifError> {
    if !values.data_type().is_signed_integer() {
        return Err(BincifError::malformed(format!(
            "Delta input must be a signed integer array, got {}",
            values.data_type()
        )));
    }
    match src_type {
        DataType::Int8 => Ok(NumericArray::Int8(accumulate(values, origin, |v| v as i8))),
        DataType::Int16 => Ok(NumericArray::Int16(accumulate(values, origin, |v| v as i16))),
        DataType::Int32 => Ok(NumericArray::Int32(accumulate(values, origin, |v| v as i32))),
        other => Err(BincifError::malformed(format!(
            "Delta srcType must be a signed integer type, got {}",
            other
        ))),
    }
}

fn accumulate<T>(values: &NumericArray, origin: i64, narrow: impl Fn(i64) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len());
    let mut running = origin;
    for i in 0..values.len() {
        running = running.wrapping_add(values.get_i64(i));
        out.push(narrow(running));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_with_origin() {
        let input = NumericArray::Int32(vec![1, 2, 3, -1]);
        let decoded = decode(&input, 10, DataType::Int32).unwrap();
        assert_eq!(decoded, NumericArray::Int32(vec![11, 13, 16, 15]));
    }

    #[test]
    fn test_delta_narrow_input_wide_output() {
        // A typical stack: Int8 deltas reconstructed into Int32 values.
        let input = NumericArray::Int8(vec![5, -1, -1, 10]);
        let decoded = decode(&input, 100, DataType::Int32).unwrap();
        assert_eq!(decoded, NumericArray::Int32(vec![105, 104, 103, 113]));
    }

    #[test]
    fn test_delta_empty() {
        let input = NumericArray::Int32(vec![]);
        let decoded = decode(&input, 42, DataType::Int32).unwrap();
        assert_eq!(decoded, NumericArray::Int32(vec![]));
    }

    #[test]
    fn test_delta_wraps_in_declared_type() {
        let input = NumericArray::Int8(vec![100, 100]);
        let decoded = decode(&input, 100, DataType::Int8).unwrap();
        // 200 and 300 wrapped into i8.
        assert_eq!(decoded, NumericArray::Int8(vec![-56, 44]));
    }

    #[test]
    fn test_delta_rejects_unsigned_input() {
        let input = NumericArray::Uint32(vec![1, 2]);
        let result = decode(&input, 0, DataType::Int32);
        assert!(matches!(result, Err(BincifError::MalformedEncoding(_))));
    }
}
