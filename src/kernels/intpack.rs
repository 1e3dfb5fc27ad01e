//! This module contains the kernel for inverting integer packing: a wide
//! integer sequence narrowed to 1- or 2-byte tokens, where a token at the
//! saturation bound means "accumulate and continue with the next token".

use crate::error::BincifError;
use crate::types::NumericArray;

/// Unpacks a narrow-integer token sequence into Int32 values.
///
/// The continuation tokens are the bounds of the narrow type: `0x7F`/`0x7FFF`
/// and `-upper - 1` for signed tokens, `0xFF`/`0xFFFF` for unsigned tokens
/// (the negative bound can never match an unsigned token). A value is the sum
/// of its saturation run plus the one terminating token.
///
/// # Errors
/// `MalformedEncoding` if the input ends inside a saturation run or the
/// number of unpacked values differs from `src_size`.
pub fn decode(
    values: &NumericArray,
    byte_count: u8,
    is_unsigned: bool,
    src_size: usize,
) -> Result<NumericArray, BincifError> {
    let upper: i64 = match (is_unsigned, byte_count) {
        (true, 1) => 0xFF,
        (true, _) => 0xFFFF,
        (false, 1) => 0x7F,
        (false, _) => 0x7FFF,
    };
    let lower: i64 = -upper - 1;

    let n = values.len();
    let mut out = Vec::with_capacity(src_size);
    let mut i = 0;
    while i < n {
        let mut value: i64 = 0;
        let mut token = values.get_i64(i);
        while token == upper || token == lower {
            value += token;
            i += 1;
            if i >= n {
                return Err(BincifError::malformed(
                    "integer packing input ends inside a saturation run",
                ));
            }
            token = values.get_i64(i);
        }
        value += token;
        i += 1;
        out.push(value as i32);
    }

    if out.len() != src_size {
        return Err(BincifError::malformed(format!(
            "integer packing produced {} values, descriptor declares {}",
            out.len(),
            src_size
        )));
    }
    Ok(NumericArray::Int32(out))
}
