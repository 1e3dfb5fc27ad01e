//! This module contains the kernel for decoding string-array columns: a
//! shared character pool, an offset table bounding each pool entry, and a
//! per-row index sequence. Offsets and indices are full decode pipelines of
//! their own and are run through the regular driver.

use std::sync::Arc;

use crate::error::BincifError;
use crate::format::StringArrayEncoding;
use crate::pipeline::executor;
use crate::types::StringSeq;

/// Decodes the per-row string sequence.
///
/// `bytes` is the buffer that reached this step, carrying the encoded row
/// indices. A negative index denotes a row with no string. Pool substrings
/// are materialized once per pool entry and shared between rows via
/// `Arc<str>`, so repeated indices intern to the same allocation.
///
/// # Errors
/// `MalformedEncoding` for an index outside the pool, an offset pair that is
/// decreasing or out of bounds, or an offset that does not fall on a UTF-8
/// character boundary of the pool.
pub fn decode(bytes: &[u8], params: &StringArrayEncoding) -> Result<StringSeq, BincifError> {
    let offsets = executor::decode_stack(&params.offset_encoding, &params.offsets)?
        .into_numeric()?;
    let mut bounds = Vec::with_capacity(offsets.len());
    for i in 0..offsets.len() {
        let offset = offsets.get_i64(i);
        if offset < 0 || offset as usize > params.string_data.len() {
            return Err(BincifError::malformed(format!(
                "string pool offset {} outside pool of {} bytes",
                offset,
                params.string_data.len()
            )));
        }
        bounds.push(offset as usize);
    }

    let indices = executor::decode_stack(&params.data_encoding, bytes)?.into_numeric()?;
    let pool_len = bounds.len().saturating_sub(1);
    let mut interned: Vec<Option<Arc<str>>> = vec![None; pool_len];

    let mut out = Vec::with_capacity(indices.len());
    for row in 0..indices.len() {
        let index = indices.get_i64(row);
        if index < 0 {
            out.push(None);
            continue;
        }
        let index = index as usize;
        if index >= pool_len {
            return Err(BincifError::malformed(format!(
                "string index {} outside pool of {} entries",
                index, pool_len
            )));
        }
        if interned[index].is_none() {
            interned[index] = Some(slice_pool(&params.string_data, bounds[index], bounds[index + 1])?);
        }
        out.push(interned[index].clone());
    }
    Ok(out)
}

fn slice_pool(pool: &str, start: usize, end: usize) -> Result<Arc<str>, BincifError> {
    if start > end {
        return Err(BincifError::malformed(format!(
            "string pool offsets decrease: {} then {}",
            start, end
        )));
    }
    pool.get(start..end)
        .map(Arc::from)
        .ok_or_else(|| {
            BincifError::malformed(format!(
                "string pool range {}..{} is not on a character boundary",
                start, end
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Encoding;
    use crate::types::DataType;
    use crate::utils::typed_slice_to_le_bytes;

    fn byte_array(ty: DataType) -> Vec<Encoding> {
        vec![Encoding::ByteArray { ty }]
    }

    #[test]
    fn test_string_array_with_absent_rows() {
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "foobar".to_string(),
            offset_encoding: byte_array(DataType::Uint8),
            offsets: vec![0, 3, 6],
        };
        let indices: Vec<i8> = vec![0, 1, 0, -1, 1];
        let decoded = decode(&typed_slice_to_le_bytes(&indices), &params).unwrap();

        let as_strs: Vec<Option<&str>> = decoded.iter().map(|s| s.as_deref()).collect();
        assert_eq!(
            as_strs,
            vec![Some("foo"), Some("bar"), Some("foo"), None, Some("bar")]
        );
    }

    #[test]
    fn test_string_array_interns_repeated_indices() {
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "xy".to_string(),
            offset_encoding: byte_array(DataType::Uint8),
            offsets: vec![0, 2],
        };
        let decoded = decode(&typed_slice_to_le_bytes(&[0i8, 0, 0]), &params).unwrap();
        let first = decoded[0].as_ref().unwrap();
        let third = decoded[2].as_ref().unwrap();
        assert!(Arc::ptr_eq(first, third));
    }

    #[test]
    fn test_string_array_with_encoded_offsets() {
        // Offsets [0, 2, 4] stored as deltas [0, 2, 2] over Int8.
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "abcd".to_string(),
            offset_encoding: vec![
                Encoding::Delta {
                    origin: 0,
                    src_type: DataType::Int32,
                },
                Encoding::ByteArray { ty: DataType::Int8 },
            ],
            offsets: typed_slice_to_le_bytes(&[0i8, 2, 2]),
        };
        let decoded = decode(&typed_slice_to_le_bytes(&[1i8, 0]), &params).unwrap();
        let as_strs: Vec<Option<&str>> = decoded.iter().map(|s| s.as_deref()).collect();
        assert_eq!(as_strs, vec![Some("cd"), Some("ab")]);
    }

    #[test]
    fn test_string_array_index_outside_pool_fails() {
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "ab".to_string(),
            offset_encoding: byte_array(DataType::Uint8),
            offsets: vec![0, 2],
        };
        let result = decode(&typed_slice_to_le_bytes(&[1i8]), &params);
        assert!(matches!(result, Err(BincifError::MalformedEncoding(_))));
    }

    #[test]
    fn test_string_array_offset_outside_pool_fails() {
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "ab".to_string(),
            offset_encoding: byte_array(DataType::Uint8),
            offsets: vec![0, 9],
        };
        let result = decode(&typed_slice_to_le_bytes(&[0i8]), &params);
        assert!(matches!(result, Err(BincifError::MalformedEncoding(_))));
    }

    #[test]
    fn test_string_array_boundary_violation_fails() {
        // "é" is two bytes; offset 1 splits it.
        let params = StringArrayEncoding {
            data_encoding: byte_array(DataType::Int8),
            string_data: "é".to_string(),
            offset_encoding: byte_array(DataType::Uint8),
            offsets: vec![0, 1],
        };
        let result = decode(&typed_slice_to_le_bytes(&[0i8]), &params);
        assert!(matches!(result, Err(BincifError::MalformedEncoding(_))));
    }
}
