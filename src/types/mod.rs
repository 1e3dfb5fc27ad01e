//! This module defines the core, strongly-typed data representations used
//! throughout the decoder: the wire data-type codes and the owned typed
//! buffers that transform kernels produce and consume.

pub mod array;
pub mod data_type;

pub use array::{Decoded, NumericArray, StringSeq};
pub use data_type::DataType;
