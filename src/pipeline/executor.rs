//! This module contains the core execution logic for decode pipelines.
//!
//! An encoding stack is persisted in application (encode) order, so decoding
//! walks it back to front: the raw byte buffer goes in, each step's output
//! becomes the next step's input, and the final value is whatever the first
//! declared encoding produced. The driver adds no recovery; the first failing
//! step aborts the decode.

use log::debug;

use crate::error::BincifError;
use crate::format::{EncodedData, Encoding};
use crate::kernels;
use crate::types::Decoded;

/// Decodes one encoded stream back to its typed or string sequence.
pub fn decode(encoded: &EncodedData) -> Result<Decoded, BincifError> {
    decode_stack(&encoded.encoding, &encoded.data)
}

/// Runs `bytes` through `encodings` in reverse declaration order.
pub fn decode_stack(encodings: &[Encoding], bytes: &[u8]) -> Result<Decoded, BincifError> {
    let mut current = Decoded::Bytes(bytes.to_vec());
    for encoding in encodings.iter().rev() {
        current = kernels::decode_step(current, encoding)?;
        debug!(
            "decoded {} step -> {} of {}",
            encoding.kind_name(),
            current.kind_name(),
            current.len()
        );
    }
    Ok(current)
}
