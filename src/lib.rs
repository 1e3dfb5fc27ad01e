//! bincif is the decoder core for the BinaryCIF tabular format used by
//! crystallographic and structural data: a tree of files, data blocks,
//! categories, and columns, where each column is a typed array compressed by
//! a stack of invertible numeric transforms.
//!
//! The crate decodes those stacks back to typed arrays and strings and
//! presents the result through a uniform row/column accessor API that hides
//! whether a column is numeric or textual and whether some rows are absent.
//! It does not parse the outer container (MessagePack or JSON); the encoded
//! tree in [`format`] derives `serde::Deserialize` with the wire field
//! names, so any serde deserializer produces it directly.
//!
//! ```
//! use bincif::format::{EncodedData, Encoding};
//! use bincif::types::DataType;
//! use bincif::pipeline;
//!
//! let encoded = EncodedData {
//!     encoding: vec![
//!         Encoding::Delta { origin: 10, src_type: DataType::Int32 },
//!         Encoding::ByteArray { ty: DataType::Int8 },
//!     ],
//!     data: vec![1, 2, 3, 255],
//! };
//! let decoded = pipeline::decode(&encoded).unwrap().into_numeric().unwrap();
//! assert_eq!(decoded.as_int32().unwrap(), &[11, 13, 16, 15]);
//! ```

/// The crate version, set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod format;
pub mod kernels;
pub mod pipeline;
pub mod table;
pub mod types;
pub mod utils;

pub use error::BincifError;
pub use format::{EncodedColumn, EncodedData, EncodedFile, Encoding};
pub use table::{Category, CifFile, Column, DataBlock, Presence};
pub use types::{DataType, Decoded, NumericArray};
