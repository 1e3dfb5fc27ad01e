//! This module contains the kernel for inverting interval quantization: a
//! closed real interval discretized into a fixed number of uniform steps,
//! with each value stored as its step index.

use crate::error::BincifError;
use crate::types::{DataType, NumericArray};

/// Maps step indices back onto the interval:
/// `out[i] = min + (max - min) / (num_steps - 1) * in[i]`.
///
/// # Errors
/// `MalformedEncoding` if `num_steps < 2`; a single step has no defined
/// spacing.
pub fn decode(
    values: &[i32],
    min: f64,
    max: f64,
    num_steps: u32,
    src_type: DataType,
) -> Result<NumericArray, BincifError> {
    if num_steps < 2 {
        return Err(BincifError::malformed(format!(
            "IntervalQuantization requires numSteps >= 2, got {}",
            num_steps
        )));
    }
    let step = (max - min) / f64::from(num_steps - 1);
    match src_type {
        DataType::Float32 => Ok(NumericArray::Float32(
            values
                .iter()
                .map(|&v| (min + step * f64::from(v)) as f32)
                .collect(),
        )),
        DataType::Float64 => Ok(NumericArray::Float64(
            values.iter().map(|&v| min + step * f64::from(v)).collect(),
        )),
        other => Err(BincifError::malformed(format!(
            "IntervalQuantization srcType must be a float type, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_unit_interval() {
        let decoded = decode(&[0, 2, 4], 0.0, 1.0, 5, DataType::Float64).unwrap();
        assert_eq!(decoded, NumericArray::Float64(vec![0.0, 0.5, 1.0]));
    }

    #[test]
    fn test_quantize_offset_interval_float32() {
        let decoded = decode(&[0, 1, 3], -1.0, 2.0, 4, DataType::Float32).unwrap();
        assert_eq!(decoded, NumericArray::Float32(vec![-1.0, 0.0, 2.0]));
    }

    #[test]
    fn test_quantize_single_step_fails() {
        let result = decode(&[0], 0.0, 1.0, 1, DataType::Float64);
        assert!(matches!(result, Err(BincifError::MalformedEncoding(_))));
    }
}
