//! This module defines the canonical, type-safe representation of the eight
//! wire data types, replacing raw integer codes at the earliest possible
//! boundary so the rest of the decoder never sees an unvalidated code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BincifError;

/// The eight element types a ByteArray (or a transform's `srcType`) may cite.
///
/// The discriminants are the on-wire codes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "i32", try_from = "i32")]
pub enum DataType {
    Int8 = 1,
    Int16 = 2,
    Int32 = 3,
    Uint8 = 4,
    Uint16 = 5,
    Uint32 = 6,
    Float32 = 32,
    Float64 = 33,
}

impl DataType {
    /// Resolves a wire code to a `DataType`.
    ///
    /// # Errors
    /// Returns `BincifError::UnsupportedType` for any code outside the
    /// enumerated set.
    pub fn from_code(code: i32) -> Result<Self, BincifError> {
        match code {
            1 => Ok(Self::Int8),
            2 => Ok(Self::Int16),
            3 => Ok(Self::Int32),
            4 => Ok(Self::Uint8),
            5 => Ok(Self::Uint16),
            6 => Ok(Self::Uint32),
            32 => Ok(Self::Float32),
            33 => Ok(Self::Float64),
            _ => Err(BincifError::UnsupportedType(code)),
        }
    }

    /// The on-wire code for this type.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Element width in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_integer(self) -> bool {
        !self.is_float()
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32)
    }
}

impl TryFrom<i32> for DataType {
    type Error = BincifError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<DataType> for i32 {
    fn from(ty: DataType) -> i32 {
        ty.code()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [1, 2, 3, 4, 5, 6, 32, 33] {
            assert_eq!(DataType::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_unknown_code_is_unsupported() {
        assert_eq!(
            DataType::from_code(99),
            Err(BincifError::UnsupportedType(99))
        );
        assert_eq!(DataType::from_code(0), Err(BincifError::UnsupportedType(0)));
    }

    #[test]
    fn test_widths() {
        assert_eq!(DataType::Int8.width(), 1);
        assert_eq!(DataType::Uint16.width(), 2);
        assert_eq!(DataType::Float32.width(), 4);
        assert_eq!(DataType::Float64.width(), 8);
    }

    #[test]
    fn test_classification() {
        assert!(DataType::Int32.is_signed_integer());
        assert!(!DataType::Uint32.is_signed_integer());
        assert!(DataType::Float64.is_float());
        assert!(DataType::Uint8.is_integer());
    }
}
