//! This module defines the decoded column: four concrete variants spanning
//! the two independent axes (numeric or textual backing store, with or
//! without a presence mask) plus the `Undefined` sentinel handed out for
//! unknown column names.
//!
//! A column is immutable once built. Row accessors index the backing buffer
//! directly, so an out-of-range row panics via the slice bounds check.

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::BincifError;
use crate::types::{Decoded, NumericArray, StringSeq};
use crate::utils::{parse_float, parse_int};

//==================================================================================
// 1. Presence
//==================================================================================

/// Row presence as recorded in a mask byte: 0 is present, 1 renders as `.`,
/// 2 renders as `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    NotSpecified,
    Unknown,
}

impl Presence {
    /// Any byte outside the defined set reads as `NotSpecified`, the
    /// conservative interpretation.
    pub fn from_mask_byte(byte: u8) -> Presence {
        match byte {
            0 => Presence::Present,
            2 => Presence::Unknown,
            _ => Presence::NotSpecified,
        }
    }

    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

//==================================================================================
// 2. Column variants
//==================================================================================

/// A decoded, row-addressable column.
#[derive(Debug, Clone)]
pub enum Column {
    Numeric {
        values: NumericArray,
    },
    MaskedNumeric {
        values: NumericArray,
        mask: Vec<u8>,
    },
    Text {
        values: StringSeq,
    },
    MaskedText {
        values: StringSeq,
        mask: Vec<u8>,
    },
    /// Sentinel for unknown column names: zero rows, every getter a neutral
    /// default, never an error.
    Undefined,
}

impl Column {
    /// Builds the variant matching the decoded value shape. A mask with no
    /// non-zero byte marks every row present and collapses to the unmasked
    /// variant.
    pub(crate) fn from_decoded(
        values: Decoded,
        mask: Option<Vec<u8>>,
    ) -> Result<Column, BincifError> {
        let mask = mask.filter(|m| m.iter().any(|&b| b != 0));
        match (values, mask) {
            (Decoded::Numeric(values), None) => Ok(Column::Numeric { values }),
            (Decoded::Numeric(values), Some(mask)) => Ok(Column::MaskedNumeric { values, mask }),
            (Decoded::Text(values), None) => Ok(Column::Text { values }),
            (Decoded::Text(values), Some(mask)) => Ok(Column::MaskedText { values, mask }),
            (Decoded::Bytes(_), _) => Err(BincifError::malformed(
                "column stack produced raw bytes; a ByteArray or StringArray step is required",
            )),
        }
    }

    /// False only for the `Undefined` sentinel.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Column::Undefined)
    }

    pub fn row_count(&self) -> usize {
        match self {
            Column::Numeric { values } => values.len(),
            Column::MaskedNumeric { values, .. } => values.len(),
            Column::Text { values } => values.len(),
            Column::MaskedText { values, .. } => values.len(),
            Column::Undefined => 0,
        }
    }

    pub fn get_value_presence(&self, row: usize) -> Presence {
        match self {
            Column::MaskedNumeric { mask, .. } | Column::MaskedText { mask, .. } => {
                Presence::from_mask_byte(mask[row])
            }
            _ => Presence::Present,
        }
    }

    /// The string form of the row value, or `None` when the row is absent.
    /// Numeric values are formatted in decimal; text values borrow from the
    /// interned pool.
    pub fn get_string(&self, row: usize) -> Option<Cow<'_, str>> {
        match self {
            Column::Numeric { values } => Some(Cow::Owned(number_to_string(values, row))),
            Column::MaskedNumeric { values, mask } => {
                if mask[row] == 0 {
                    Some(Cow::Owned(number_to_string(values, row)))
                } else {
                    None
                }
            }
            Column::Text { values } => values[row].as_deref().map(Cow::Borrowed),
            Column::MaskedText { values, mask } => {
                if mask[row] == 0 {
                    values[row].as_deref().map(Cow::Borrowed)
                } else {
                    None
                }
            }
            Column::Undefined => None,
        }
    }

    /// The integer form of the row value: numeric stores truncate toward
    /// zero, text stores run the fast parser, absent rows read as 0.
    pub fn get_int(&self, row: usize) -> i64 {
        match self {
            Column::Numeric { values } => values.get_i64(row),
            Column::MaskedNumeric { values, mask } => {
                if mask[row] == 0 {
                    values.get_i64(row)
                } else {
                    0
                }
            }
            Column::Text { values } => parse_stored_int(&values[row]),
            Column::MaskedText { values, mask } => {
                if mask[row] == 0 {
                    parse_stored_int(&values[row])
                } else {
                    0
                }
            }
            Column::Undefined => 0,
        }
    }

    /// The real form of the row value; same conventions as [`Self::get_int`].
    pub fn get_float(&self, row: usize) -> f64 {
        match self {
            Column::Numeric { values } => values.get_f64(row),
            Column::MaskedNumeric { values, mask } => {
                if mask[row] == 0 {
                    values.get_f64(row)
                } else {
                    0.0
                }
            }
            Column::Text { values } => parse_stored_float(&values[row]),
            Column::MaskedText { values, mask } => {
                if mask[row] == 0 {
                    parse_stored_float(&values[row])
                } else {
                    0.0
                }
            }
            Column::Undefined => 0.0,
        }
    }

    /// Compares the row value against a string: numeric stores compare the
    /// parsed number, text stores compare bytes. An absent row (and every
    /// row of the sentinel) is equal only to the empty string; presence
    /// itself is queried through [`Self::get_value_presence`].
    pub fn string_equals(&self, row: usize, value: &str) -> bool {
        match self {
            Column::Numeric { values } => number_equals(values, row, value),
            Column::MaskedNumeric { values, mask } => {
                if mask[row] == 0 {
                    number_equals(values, row, value)
                } else {
                    value.is_empty()
                }
            }
            Column::Text { values } => text_equals(&values[row], value),
            Column::MaskedText { values, mask } => {
                if mask[row] == 0 {
                    text_equals(&values[row], value)
                } else {
                    value.is_empty()
                }
            }
            Column::Undefined => value.is_empty(),
        }
    }

    /// Compares the stored values of two rows. The mask is deliberately not
    /// consulted: two absent rows whose backing values happen to match
    /// compare equal, and callers group by that.
    pub fn are_values_equal(&self, row_a: usize, row_b: usize) -> bool {
        match self {
            Column::Numeric { values } | Column::MaskedNumeric { values, .. } => {
                stored_numbers_equal(values, row_a, row_b)
            }
            Column::Text { values } | Column::MaskedText { values, .. } => {
                values[row_a] == values[row_b]
            }
            Column::Undefined => true,
        }
    }
}

//==================================================================================
// 3. Store-level helpers
//==================================================================================

fn number_to_string(values: &NumericArray, row: usize) -> String {
    if values.data_type().is_float() {
        values.get_f64(row).to_string()
    } else {
        values.get_i64(row).to_string()
    }
}

fn number_equals(values: &NumericArray, row: usize, value: &str) -> bool {
    parse_float(value, 0, value.len()) == values.get_f64(row)
}

fn text_equals(stored: &Option<Arc<str>>, value: &str) -> bool {
    match stored {
        Some(s) => s.as_bytes() == value.as_bytes(),
        None => value.is_empty(),
    }
}

fn stored_numbers_equal(values: &NumericArray, row_a: usize, row_b: usize) -> bool {
    if values.data_type().is_float() {
        values.get_f64(row_a) == values.get_f64(row_b)
    } else {
        values.get_i64(row_a) == values.get_i64(row_b)
    }
}

fn parse_stored_int(value: &Option<Arc<str>>) -> i64 {
    match value {
        Some(s) => parse_int(s, 0, s.len()),
        None => 0,
    }
}

fn parse_stored_float(value: &Option<Arc<str>>) -> f64 {
    match value {
        Some(s) => parse_float(s, 0, s.len()),
        None => 0.0,
    }
}
