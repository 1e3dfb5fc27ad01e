//! This module defines the category view: an ordered set of named columns
//! over a fixed row count. Construction is cheap; a column's pipeline runs
//! the first time the column is requested, and the built column (or its
//! error) is cached behind a `OnceLock` so concurrent first touches are
//! safe.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use log::warn;

use crate::error::BincifError;
use crate::format::{EncodedCategory, EncodedColumn, EncodedData};
use crate::pipeline::executor;
use crate::table::column::Column;
use crate::types::Decoded;

pub struct Category {
    name: String,
    row_count: usize,
    columns: Vec<EncodedColumn>,
    index: HashMap<String, usize>,
    cache: Vec<OnceLock<Result<Arc<Column>, BincifError>>>,
}

impl Category {
    pub fn from_encoded(encoded: EncodedCategory) -> Self {
        let mut index = HashMap::with_capacity(encoded.columns.len());
        for (slot, column) in encoded.columns.iter().enumerate() {
            if index.insert(column.name.clone(), slot).is_some() {
                warn!(
                    "category '{}' declares column '{}' more than once, keeping the last",
                    encoded.name, column.name
                );
            }
        }
        let cache = encoded.columns.iter().map(|_| OnceLock::new()).collect();
        Category {
            name: encoded.name,
            row_count: encoded.row_count,
            columns: encoded.columns,
            index,
            cache,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Decodes and returns the named column, or the `Undefined` sentinel
    /// when the name is unknown. The first call per name pays for the
    /// pipeline; later calls clone the cached `Arc`.
    pub fn get_column(&self, name: &str) -> Result<Arc<Column>, BincifError> {
        let Some(&slot) = self.index.get(name) else {
            return Ok(Arc::new(Column::Undefined));
        };
        self.cache[slot]
            .get_or_init(|| self.decode_column(&self.columns[slot]))
            .clone()
    }

    fn decode_column(&self, column: &EncodedColumn) -> Result<Arc<Column>, BincifError> {
        let values = executor::decode(&column.data)?;
        if !matches!(values, Decoded::Bytes(_)) && values.len() != self.row_count {
            return Err(BincifError::malformed(format!(
                "column '{}' decoded {} values for a category of {} rows",
                column.name,
                values.len(),
                self.row_count
            )));
        }
        let mask = match &column.mask {
            Some(encoded) => Some(decode_mask(encoded, &column.name, self.row_count)?),
            None => None,
        };
        Column::from_decoded(values, mask).map(Arc::new)
    }
}

/// Decodes a presence-mask stream to one byte per row.
fn decode_mask(
    encoded: &EncodedData,
    column_name: &str,
    row_count: usize,
) -> Result<Vec<u8>, BincifError> {
    let decoded = executor::decode(encoded)?.into_numeric()?;
    if decoded.len() != row_count {
        return Err(BincifError::malformed(format!(
            "mask of column '{}' decoded {} values for {} rows",
            column_name,
            decoded.len(),
            row_count
        )));
    }
    let mut mask = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let value = decoded.get_i64(row);
        mask.push(match value {
            0..=255 => value as u8,
            _ => {
                warn!(
                    "mask of column '{}' holds {} at row {}, reading as not-specified",
                    column_name, value, row
                );
                1
            }
        });
    }
    Ok(mask)
}
