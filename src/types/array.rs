//! This module defines the owned, typed buffers the transform kernels
//! exchange: `NumericArray` (one variant per wire data type) and `Decoded`,
//! the tagged value a pipeline carries between steps.

use std::sync::Arc;

use crate::error::BincifError;
use crate::types::DataType;
use crate::utils::typed_vec_from_le_bytes;

/// A decoded string sequence. `None` marks a row with no string value.
pub type StringSeq = Vec<Option<Arc<str>>>;

//==================================================================================
// 1. NumericArray
//==================================================================================

/// An owned, homogeneous numeric buffer in one of the eight wire types.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl NumericArray {
    /// Reinterprets little-endian wire bytes as an array of `ty`.
    pub fn from_le_bytes(bytes: &[u8], ty: DataType) -> Result<Self, BincifError> {
        Ok(match ty {
            DataType::Int8 => Self::Int8(typed_vec_from_le_bytes(bytes)?),
            DataType::Int16 => Self::Int16(typed_vec_from_le_bytes(bytes)?),
            DataType::Int32 => Self::Int32(typed_vec_from_le_bytes(bytes)?),
            DataType::Uint8 => Self::Uint8(typed_vec_from_le_bytes(bytes)?),
            DataType::Uint16 => Self::Uint16(typed_vec_from_le_bytes(bytes)?),
            DataType::Uint32 => Self::Uint32(typed_vec_from_le_bytes(bytes)?),
            DataType::Float32 => Self::Float32(typed_vec_from_le_bytes(bytes)?),
            DataType::Float64 => Self::Float64(typed_vec_from_le_bytes(bytes)?),
        })
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Uint8(_) => DataType::Uint8,
            Self::Uint16(_) => DataType::Uint16,
            Self::Uint32(_) => DataType::Uint32,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint8(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `i` widened to `i64`. Float elements truncate toward zero.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn get_i64(&self, i: usize) -> i64 {
        match self {
            Self::Int8(v) => i64::from(v[i]),
            Self::Int16(v) => i64::from(v[i]),
            Self::Int32(v) => i64::from(v[i]),
            Self::Uint8(v) => i64::from(v[i]),
            Self::Uint16(v) => i64::from(v[i]),
            Self::Uint32(v) => i64::from(v[i]),
            Self::Float32(v) => v[i] as i64,
            Self::Float64(v) => v[i] as i64,
        }
    }

    /// Element at `i` widened to `f64`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn get_f64(&self, i: usize) -> f64 {
        match self {
            Self::Int8(v) => f64::from(v[i]),
            Self::Int16(v) => f64::from(v[i]),
            Self::Int32(v) => f64::from(v[i]),
            Self::Uint8(v) => f64::from(v[i]),
            Self::Uint16(v) => f64::from(v[i]),
            Self::Uint32(v) => f64::from(v[i]),
            Self::Float32(v) => f64::from(v[i]),
            Self::Float64(v) => v[i],
        }
    }

    /// Borrows the backing slice when the array is Int32.
    pub fn as_int32(&self) -> Option<&[i32]> {
        match self {
            Self::Int32(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

//==================================================================================
// 2. Decoded: the value between pipeline steps
//==================================================================================

/// The value flowing through a decode pipeline: the raw buffer before the
/// terminal ByteArray step has consumed it, a typed numeric buffer, or a
/// string sequence produced by a StringArray step.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Bytes(Vec<u8>),
    Numeric(NumericArray),
    Text(StringSeq),
}

impl Decoded {
    /// Sequence length: element count for typed values, byte count for raw.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(b) => b.len(),
            Self::Numeric(a) => a.len(),
            Self::Text(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "raw bytes",
            Self::Numeric(a) => match a.data_type() {
                DataType::Int8 => "Int8",
                DataType::Int16 => "Int16",
                DataType::Int32 => "Int32",
                DataType::Uint8 => "Uint8",
                DataType::Uint16 => "Uint16",
                DataType::Uint32 => "Uint32",
                DataType::Float32 => "Float32",
                DataType::Float64 => "Float64",
            },
            Self::Text(_) => "strings",
        }
    }

    /// Unwraps the raw byte buffer a terminal step consumes.
    pub fn into_bytes(self) -> Result<Vec<u8>, BincifError> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(BincifError::malformed(format!(
                "step expects the raw byte buffer, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Unwraps the numeric buffer a numeric transform consumes.
    pub fn into_numeric(self) -> Result<NumericArray, BincifError> {
        match self {
            Self::Numeric(a) => Ok(a),
            other => Err(BincifError::malformed(format!(
                "step expects a numeric array, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Borrows the Int32 slice required by transforms defined over Int32
    /// input.
    pub fn as_int32(&self) -> Result<&[i32], BincifError> {
        match self {
            Self::Numeric(a) => a.as_int32().ok_or_else(|| {
                BincifError::malformed(format!(
                    "step expects an Int32 array, got {}",
                    self.kind_name()
                ))
            }),
            other => Err(BincifError::malformed(format!(
                "step expects an Int32 array, got {}",
                other.kind_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_le_bytes_dispatch() {
        let arr = NumericArray::from_le_bytes(&[1, 0, 0, 0, 255, 255, 255, 255], DataType::Int32)
            .unwrap();
        assert_eq!(arr, NumericArray::Int32(vec![1, -1]));
        assert_eq!(arr.data_type(), DataType::Int32);
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_widening_accessors() {
        let arr = NumericArray::Float64(vec![-2.75, 0.5]);
        assert_eq!(arr.get_i64(0), -2);
        assert_eq!(arr.get_i64(1), 0);
        assert_eq!(arr.get_f64(0), -2.75);

        let arr = NumericArray::Uint32(vec![u32::MAX]);
        assert_eq!(arr.get_i64(0), 4_294_967_295);
    }

    #[test]
    fn test_decoded_unwrap_errors_name_the_value() {
        let numeric = Decoded::Numeric(NumericArray::Uint8(vec![1]));
        let err = numeric.into_bytes().unwrap_err();
        assert!(matches!(err, BincifError::MalformedEncoding(ref m) if m.contains("Uint8")));

        let bytes = Decoded::Bytes(vec![0, 1]);
        assert!(bytes.as_int32().is_err());
    }
}
