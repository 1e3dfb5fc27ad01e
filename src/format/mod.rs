//! Defines the encoded tree this decoder consumes: files, data blocks,
//! categories, columns, and the transform descriptors attached to each
//! column's byte buffer. This is the single source of truth for the wire
//! field names and the closed set of encoding kinds.
//!
//! The structs mirror the BinaryCIF container records one to one, so a
//! MessagePack or JSON deserializer can produce them directly. Descriptors
//! arrive as permissive `RawEncoding` records and are converted into the
//! closed [`Encoding`] enum at the serde boundary; that conversion is the
//! only place an unknown `kind` string can exist.

use serde::{Deserialize, Serialize};

use crate::error::BincifError;
use crate::types::DataType;

/// Encoder version line this decoder understands. A file whose version does
/// not start with this prefix is still decoded, with a warning.
pub const SUPPORTED_VERSION_PREFIX: &str = "0.3";

//==================================================================================
// 1. The encoded tree
//==================================================================================

/// The root record: an ordered list of data blocks plus provenance strings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodedFile {
    pub version: String,
    pub encoder: String,
    #[serde(rename = "dataBlocks")]
    pub data_blocks: Vec<EncodedDataBlock>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodedDataBlock {
    pub header: String,
    pub categories: Vec<EncodedCategory>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodedCategory {
    pub name: String,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    pub columns: Vec<EncodedColumn>,
}

/// A column: a required value buffer and an optional presence mask, each an
/// independently encoded stream.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodedColumn {
    pub name: String,
    pub data: EncodedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<EncodedData>,
}

/// A raw byte buffer together with the transform stack that produced it,
/// in application (encode) order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodedData {
    pub encoding: Vec<Encoding>,
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}

//==================================================================================
// 2. Encoding descriptors
//==================================================================================

/// The closed set of transform descriptors.
///
/// Decoding applies these in reverse declaration order. The enum is closed
/// so the pipeline dispatch is exhaustiveness-checked; on the wire each
/// descriptor is a record tagged by a `kind` string, modeled here by
/// [`RawEncoding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEncoding", into = "RawEncoding")]
pub enum Encoding {
    /// Reinterpret the raw little-endian buffer as elements of `ty`.
    ByteArray { ty: DataType },
    /// Int32 → float: `out[i] = in[i] / factor`.
    FixedPoint { factor: f64, src_type: DataType },
    /// Int32 → float over a uniformly discretized closed interval.
    IntervalQuantization {
        min: f64,
        max: f64,
        num_steps: u32,
        src_type: DataType,
    },
    /// (value, length) pairs → flat integer sequence of `src_size`.
    RunLength { src_type: DataType, src_size: usize },
    /// Cumulative sum with starting offset `origin`.
    Delta { origin: i64, src_type: DataType },
    /// Narrow-int sequence → Int32 via saturation-continuation tokens.
    IntegerPacking {
        byte_count: u8,
        is_unsigned: bool,
        src_size: usize,
    },
    /// Index sequence over a shared string pool with its own offset table.
    StringArray(StringArrayEncoding),
}

/// Parameters of a StringArray descriptor. The two nested stacks are full
/// pipelines of their own and each terminates in a ByteArray.
#[derive(Debug, Clone, PartialEq)]
pub struct StringArrayEncoding {
    pub data_encoding: Vec<Encoding>,
    pub string_data: String,
    pub offset_encoding: Vec<Encoding>,
    pub offsets: Vec<u8>,
}

impl Encoding {
    /// The wire `kind` tag for this descriptor.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ByteArray { .. } => "ByteArray",
            Self::FixedPoint { .. } => "FixedPoint",
            Self::IntervalQuantization { .. } => "IntervalQuantization",
            Self::RunLength { .. } => "RunLength",
            Self::Delta { .. } => "Delta",
            Self::IntegerPacking { .. } => "IntegerPacking",
            Self::StringArray(_) => "StringArray",
        }
    }
}

//==================================================================================
// 3. Raw descriptors and the conversion boundary
//==================================================================================

/// The permissive on-wire form of a descriptor: a `kind` tag plus whichever
/// parameter fields that kind carries. Everything except `kind` is optional
/// here; [`Encoding::try_from`] enforces per-kind presence.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawEncoding {
    pub kind: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(rename = "numSteps", default, skip_serializing_if = "Option::is_none")]
    pub num_steps: Option<u32>,
    #[serde(rename = "srcType", default, skip_serializing_if = "Option::is_none")]
    pub src_type: Option<i32>,
    #[serde(rename = "srcSize", default, skip_serializing_if = "Option::is_none")]
    pub src_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<i64>,
    #[serde(rename = "byteCount", default, skip_serializing_if = "Option::is_none")]
    pub byte_count: Option<u8>,
    #[serde(
        rename = "isUnsigned",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_unsigned: Option<bool>,
    #[serde(
        rename = "dataEncoding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_encoding: Option<Vec<RawEncoding>>,
    #[serde(
        rename = "stringData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub string_data: Option<String>,
    #[serde(
        rename = "offsetEncoding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub offset_encoding: Option<Vec<RawEncoding>>,
    #[serde(with = "serde_bytes", default, skip_serializing_if = "Option::is_none")]
    pub offsets: Option<Vec<u8>>,
}

fn require<T>(field: Option<T>, kind: &str, name: &str) -> Result<T, BincifError> {
    field.ok_or_else(|| {
        BincifError::malformed(format!("{} descriptor is missing '{}'", kind, name))
    })
}

fn convert_stack(raw: Vec<RawEncoding>) -> Result<Vec<Encoding>, BincifError> {
    raw.into_iter().map(Encoding::try_from).collect()
}

impl TryFrom<RawEncoding> for Encoding {
    type Error = BincifError;

    fn try_from(raw: RawEncoding) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "ByteArray" => {
                let ty = DataType::from_code(require(raw.data_type, "ByteArray", "type")?)?;
                Ok(Encoding::ByteArray { ty })
            }
            "FixedPoint" => {
                let factor = require(raw.factor, "FixedPoint", "factor")?;
                if factor == 0.0 {
                    return Err(BincifError::malformed("FixedPoint factor must be nonzero"));
                }
                let src_type = DataType::from_code(require(raw.src_type, "FixedPoint", "srcType")?)?;
                if !src_type.is_float() {
                    return Err(BincifError::malformed(format!(
                        "FixedPoint srcType must be a float type, got {}",
                        src_type
                    )));
                }
                Ok(Encoding::FixedPoint { factor, src_type })
            }
            "IntervalQuantization" => {
                let src_type = DataType::from_code(require(
                    raw.src_type,
                    "IntervalQuantization",
                    "srcType",
                )?)?;
                if !src_type.is_float() {
                    return Err(BincifError::malformed(format!(
                        "IntervalQuantization srcType must be a float type, got {}",
                        src_type
                    )));
                }
                Ok(Encoding::IntervalQuantization {
                    min: require(raw.min, "IntervalQuantization", "min")?,
                    max: require(raw.max, "IntervalQuantization", "max")?,
                    num_steps: require(raw.num_steps, "IntervalQuantization", "numSteps")?,
                    src_type,
                })
            }
            "RunLength" => {
                let src_type = DataType::from_code(require(raw.src_type, "RunLength", "srcType")?)?;
                if !src_type.is_integer() {
                    return Err(BincifError::malformed(format!(
                        "RunLength srcType must be an integer type, got {}",
                        src_type
                    )));
                }
                Ok(Encoding::RunLength {
                    src_type,
                    src_size: require(raw.src_size, "RunLength", "srcSize")?,
                })
            }
            "Delta" => {
                let src_type = DataType::from_code(require(raw.src_type, "Delta", "srcType")?)?;
                if !src_type.is_signed_integer() {
                    return Err(BincifError::malformed(format!(
                        "Delta srcType must be a signed integer type, got {}",
                        src_type
                    )));
                }
                Ok(Encoding::Delta {
                    origin: require(raw.origin, "Delta", "origin")?,
                    src_type,
                })
            }
            "IntegerPacking" => {
                let byte_count = require(raw.byte_count, "IntegerPacking", "byteCount")?;
                if byte_count != 1 && byte_count != 2 {
                    return Err(BincifError::malformed(format!(
                        "IntegerPacking byteCount must be 1 or 2, got {}",
                        byte_count
                    )));
                }
                Ok(Encoding::IntegerPacking {
                    byte_count,
                    is_unsigned: require(raw.is_unsigned, "IntegerPacking", "isUnsigned")?,
                    src_size: require(raw.src_size, "IntegerPacking", "srcSize")?,
                })
            }
            "StringArray" => Ok(Encoding::StringArray(StringArrayEncoding {
                data_encoding: convert_stack(require(
                    raw.data_encoding,
                    "StringArray",
                    "dataEncoding",
                )?)?,
                string_data: require(raw.string_data, "StringArray", "stringData")?,
                offset_encoding: convert_stack(require(
                    raw.offset_encoding,
                    "StringArray",
                    "offsetEncoding",
                )?)?,
                offsets: require(raw.offsets, "StringArray", "offsets")?,
            })),
            other => Err(BincifError::UnknownEncodingKind(other.to_string())),
        }
    }
}

impl From<Encoding> for RawEncoding {
    fn from(encoding: Encoding) -> RawEncoding {
        let tagged = |kind: &str| RawEncoding {
            kind: kind.to_string(),
            ..RawEncoding::default()
        };
        match encoding {
            Encoding::ByteArray { ty } => RawEncoding {
                data_type: Some(ty.code()),
                ..tagged("ByteArray")
            },
            Encoding::FixedPoint { factor, src_type } => RawEncoding {
                factor: Some(factor),
                src_type: Some(src_type.code()),
                ..tagged("FixedPoint")
            },
            Encoding::IntervalQuantization {
                min,
                max,
                num_steps,
                src_type,
            } => RawEncoding {
                min: Some(min),
                max: Some(max),
                num_steps: Some(num_steps),
                src_type: Some(src_type.code()),
                ..tagged("IntervalQuantization")
            },
            Encoding::RunLength { src_type, src_size } => RawEncoding {
                src_type: Some(src_type.code()),
                src_size: Some(src_size),
                ..tagged("RunLength")
            },
            Encoding::Delta { origin, src_type } => RawEncoding {
                origin: Some(origin),
                src_type: Some(src_type.code()),
                ..tagged("Delta")
            },
            Encoding::IntegerPacking {
                byte_count,
                is_unsigned,
                src_size,
            } => RawEncoding {
                byte_count: Some(byte_count),
                is_unsigned: Some(is_unsigned),
                src_size: Some(src_size),
                ..tagged("IntegerPacking")
            },
            Encoding::StringArray(params) => RawEncoding {
                data_encoding: Some(params.data_encoding.into_iter().map(Into::into).collect()),
                string_data: Some(params.string_data),
                offset_encoding: Some(
                    params.offset_encoding.into_iter().map(Into::into).collect(),
                ),
                offsets: Some(params.offsets),
                ..tagged("StringArray")
            },
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
