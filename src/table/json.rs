//! This module renders the decoded view as plain JSON records. A category's
//! rows become name-to-string mappings, with `.` and `?` standing in for
//! absent cells, matching how text CIF renders them.

use std::borrow::Cow;

use serde_json::{json, Map, Value};

use crate::error::BincifError;
use crate::table::block::{CifFile, DataBlock};
use crate::table::category::Category;
use crate::table::column::Presence;

impl Category {
    /// Decodes every column and renders the category as
    /// `{ "name": ..., "rows": [ { column: string, ... }, ... ] }`.
    pub fn to_json(&self) -> Result<Value, BincifError> {
        let mut columns = Vec::with_capacity(self.column_count());
        for name in self.column_names() {
            columns.push((name, self.get_column(name)?));
        }

        let mut rows = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let mut cells = Map::new();
            for (name, column) in &columns {
                let text = match column.get_value_presence(row) {
                    Presence::NotSpecified => Cow::Borrowed("."),
                    Presence::Unknown => Cow::Borrowed("?"),
                    Presence::Present => column.get_string(row).unwrap_or(Cow::Borrowed(".")),
                };
                cells.insert((*name).to_string(), Value::String(text.into_owned()));
            }
            rows.push(Value::Object(cells));
        }

        Ok(json!({ "name": self.name(), "rows": rows }))
    }
}

impl DataBlock {
    pub fn to_json(&self) -> Result<Value, BincifError> {
        let categories = self
            .categories()
            .iter()
            .map(Category::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({ "header": self.header(), "categories": categories }))
    }
}

impl CifFile {
    pub fn to_json(&self) -> Result<Value, BincifError> {
        let blocks = self
            .data_blocks()
            .iter()
            .map(DataBlock::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "version": self.version(),
            "encoder": self.encoder(),
            "dataBlocks": blocks,
        }))
    }
}
