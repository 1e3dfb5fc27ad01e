//! This module defines the outer two levels of the decoded view: the data
//! block (ordered categories with constant-time lookup by name) and the file
//! (ordered data blocks plus provenance).

use std::collections::HashMap;

use log::warn;

use crate::format::{EncodedDataBlock, EncodedFile, SUPPORTED_VERSION_PREFIX};
use crate::table::category::Category;

pub struct DataBlock {
    header: String,
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl DataBlock {
    pub fn from_encoded(encoded: EncodedDataBlock) -> Self {
        let categories: Vec<Category> = encoded
            .categories
            .into_iter()
            .map(Category::from_encoded)
            .collect();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
        DataBlock {
            header: encoded.header,
            categories,
            index,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name())
    }

    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&i| &self.categories[i])
    }
}

/// The decoded view of one BinaryCIF file.
pub struct CifFile {
    version: String,
    encoder: String,
    data_blocks: Vec<DataBlock>,
}

impl CifFile {
    /// Wraps an encoded tree. Block and category shells are built eagerly;
    /// no column is decoded until it is asked for.
    pub fn from_encoded(encoded: EncodedFile) -> Self {
        if !encoded.version.starts_with(SUPPORTED_VERSION_PREFIX) {
            warn!(
                "file version '{}' is outside the supported {}.x line",
                encoded.version, SUPPORTED_VERSION_PREFIX
            );
        }
        CifFile {
            version: encoded.version,
            encoder: encoded.encoder,
            data_blocks: encoded
                .data_blocks
                .into_iter()
                .map(DataBlock::from_encoded)
                .collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoder(&self) -> &str {
        &self.encoder
    }

    /// Data blocks in declaration order.
    pub fn data_blocks(&self) -> &[DataBlock] {
        &self.data_blocks
    }
}
