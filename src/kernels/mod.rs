//! This module serves as the public API and dispatcher for the collection of
//! pure, stateless transform kernels, one sub-module per encoding kind.
//!
//! `decode_step` is the sole entry point used by the pipeline driver. It
//! takes the value produced by the previous step plus one descriptor and
//! returns the next value. Because [`Encoding`] is a closed enum, the
//! dispatch is exhaustiveness-checked.

pub mod byte_array;
pub mod delta;
pub mod fixed_point;
pub mod intpack;
pub mod quantize;
pub mod rle;
pub mod strings;

use crate::error::BincifError;
use crate::format::Encoding;
use crate::types::Decoded;

/// Applies the inverse of one encoding step.
pub fn decode_step(input: Decoded, encoding: &Encoding) -> Result<Decoded, BincifError> {
    match encoding {
        Encoding::ByteArray { ty } => {
            let bytes = input.into_bytes()?;
            Ok(Decoded::Numeric(byte_array::decode(&bytes, *ty)?))
        }
        Encoding::FixedPoint { factor, src_type } => Ok(Decoded::Numeric(fixed_point::decode(
            input.as_int32()?,
            *factor,
            *src_type,
        )?)),
        Encoding::IntervalQuantization {
            min,
            max,
            num_steps,
            src_type,
        } => Ok(Decoded::Numeric(quantize::decode(
            input.as_int32()?,
            *min,
            *max,
            *num_steps,
            *src_type,
        )?)),
        Encoding::RunLength { src_type, src_size } => Ok(Decoded::Numeric(rle::decode(
            input.as_int32()?,
            *src_type,
            *src_size,
        )?)),
        Encoding::Delta { origin, src_type } => {
            let values = input.into_numeric()?;
            Ok(Decoded::Numeric(delta::decode(&values, *origin, *src_type)?))
        }
        Encoding::IntegerPacking {
            byte_count,
            is_unsigned,
            src_size,
        } => {
            let values = input.into_numeric()?;
            Ok(Decoded::Numeric(intpack::decode(
                &values,
                *byte_count,
                *is_unsigned,
                *src_size,
            )?))
        }
        Encoding::StringArray(params) => {
            let bytes = input.into_bytes()?;
            Ok(Decoded::Text(strings::decode(&bytes, params)?))
        }
    }
}
