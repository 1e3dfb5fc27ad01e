//! End-to-end tests for the view layer: hand-built encoded trees decoded
//! through the full pipeline and read back through the column accessors.

use std::sync::Arc;

use serde_json::json;

use crate::error::BincifError;
use crate::format::{
    EncodedCategory, EncodedColumn, EncodedData, EncodedDataBlock, EncodedFile, Encoding,
    StringArrayEncoding,
};
use crate::table::{CifFile, Category, Column, DataBlock, Presence};
use crate::types::DataType;
use crate::utils::typed_slice_to_le_bytes;

//==================================================================================
// 1. Fixture helpers
//==================================================================================

fn plain_data(encoding: Vec<Encoding>, data: Vec<u8>) -> EncodedData {
    EncodedData { encoding, data }
}

fn int32_data(values: &[i32]) -> EncodedData {
    plain_data(
        vec![Encoding::ByteArray {
            ty: DataType::Int32,
        }],
        typed_slice_to_le_bytes(values),
    )
}

fn mask_data(mask: &[u8]) -> EncodedData {
    plain_data(
        vec![Encoding::ByteArray { ty: DataType::Uint8 }],
        mask.to_vec(),
    )
}

fn column(name: &str, data: EncodedData, mask: Option<EncodedData>) -> EncodedColumn {
    EncodedColumn {
        name: name.to_string(),
        data,
        mask,
    }
}

fn category(name: &str, row_count: usize, columns: Vec<EncodedColumn>) -> Category {
    Category::from_encoded(EncodedCategory {
        name: name.to_string(),
        row_count,
        columns,
    })
}

fn string_column(name: &str, pool: &str, offsets: &[u8], indices: &[i8]) -> EncodedColumn {
    let data = plain_data(
        vec![Encoding::StringArray(StringArrayEncoding {
            data_encoding: vec![Encoding::ByteArray { ty: DataType::Int8 }],
            string_data: pool.to_string(),
            offset_encoding: vec![Encoding::ByteArray { ty: DataType::Uint8 }],
            offsets: offsets.to_vec(),
        })],
        typed_slice_to_le_bytes(indices),
    );
    column(name, data, None)
}

//==================================================================================
// 2. Column semantics
//==================================================================================

#[test]
fn test_masked_numeric_accessors() {
    let cat = category(
        "_test",
        3,
        vec![column("id", int32_data(&[0, 0, 5]), Some(mask_data(&[0, 1, 2])))],
    );
    let col = cat.get_column("id").unwrap();

    assert!(col.is_defined());
    assert_eq!(col.row_count(), 3);
    assert_eq!(col.get_string(0).as_deref(), Some("0"));
    assert_eq!(col.get_string(1), None);
    assert_eq!(col.get_string(2), None);
    assert_eq!(col.get_value_presence(0), Presence::Present);
    assert_eq!(col.get_value_presence(1), Presence::NotSpecified);
    assert_eq!(col.get_value_presence(2), Presence::Unknown);
    assert_eq!(col.get_int(2), 0);
    assert_eq!(col.get_float(2), 0.0);
}

#[test]
fn test_presence_consistency_on_masked_column() {
    let cat = category(
        "_test",
        4,
        vec![column(
            "v",
            int32_data(&[1, 2, 3, 4]),
            Some(mask_data(&[0, 1, 0, 2])),
        )],
    );
    let col = cat.get_column("v").unwrap();
    for row in 0..4 {
        assert_eq!(
            col.get_string(row).is_none(),
            !col.get_value_presence(row).is_present()
        );
    }
}

#[test]
fn test_all_present_mask_collapses_to_unmasked() {
    let cat = category(
        "_test",
        2,
        vec![column("v", int32_data(&[1, 2]), Some(mask_data(&[0, 0])))],
    );
    let col = cat.get_column("v").unwrap();
    assert!(matches!(*col, Column::Numeric { .. }));
}

#[test]
fn test_values_equal_ignores_mask() {
    // Rows 0 and 1 share the backing value 7 but differ in presence; they
    // still compare equal, which callers rely on for grouping.
    let cat = category(
        "_test",
        3,
        vec![column(
            "v",
            int32_data(&[7, 7, 9]),
            Some(mask_data(&[1, 0, 0])),
        )],
    );
    let col = cat.get_column("v").unwrap();
    assert!(col.are_values_equal(0, 1));
    assert!(!col.are_values_equal(1, 2));
    for row in 0..3 {
        assert!(col.are_values_equal(row, row));
    }
}

#[test]
fn test_string_equals_numeric_and_absent() {
    let cat = category(
        "_test",
        3,
        vec![column(
            "v",
            int32_data(&[42, 42, 0]),
            Some(mask_data(&[0, 2, 0])),
        )],
    );
    let col = cat.get_column("v").unwrap();
    assert!(col.string_equals(0, "42"));
    assert!(col.string_equals(0, "42.0"));
    assert!(!col.string_equals(0, "43"));
    // Absent rows are equal only to the empty-string sentinel.
    assert!(col.string_equals(1, ""));
    assert!(!col.string_equals(1, "42"));
    assert!(col.string_equals(2, "0"));
}

#[test]
fn test_float_column_accessors() {
    let data = plain_data(
        vec![
            Encoding::FixedPoint {
                factor: 100.0,
                src_type: DataType::Float64,
            },
            Encoding::ByteArray {
                ty: DataType::Int32,
            },
        ],
        typed_slice_to_le_bytes(&[150i32, -275, 300]),
    );
    let cat = category("_test", 3, vec![column("x", data, None)]);
    let col = cat.get_column("x").unwrap();

    assert_eq!(col.get_float(0), 1.5);
    assert_eq!(col.get_float(1), -2.75);
    // Truncation toward zero, both signs.
    assert_eq!(col.get_int(1), -2);
    assert_eq!(col.get_int(2), 3);
    assert_eq!(col.get_string(1).as_deref(), Some("-2.75"));
    assert!(col.string_equals(0, "1.5"));
}

#[test]
fn test_string_column_accessors() {
    let cat = category(
        "_entity",
        5,
        vec![string_column("type", "foobar", &[0, 3, 6], &[0, 1, 0, -1, 1])],
    );
    let col = cat.get_column("type").unwrap();

    assert_eq!(col.get_string(0).as_deref(), Some("foo"));
    assert_eq!(col.get_string(3), None);
    assert!(col.string_equals(1, "bar"));
    assert!(!col.string_equals(1, "foo"));
    assert!(col.string_equals(3, ""));
    assert!(col.are_values_equal(0, 2));
    assert!(!col.are_values_equal(0, 1));
    // Numeric reads over text parse the raw bytes; these are not numbers.
    assert_eq!(col.get_int(0), 0);
}

#[test]
fn test_text_column_numeric_reads() {
    let cat = category(
        "_seq",
        3,
        vec![string_column("num", "12-3.5", &[0, 2, 6], &[0, 1, 0])],
    );
    let col = cat.get_column("num").unwrap();
    assert_eq!(col.get_int(0), 12);
    assert_eq!(col.get_float(1), -3.5);
    assert_eq!(col.get_int(1), 0);
}

//==================================================================================
// 3. Category and block behavior
//==================================================================================

#[test]
fn test_unknown_column_is_undefined_sentinel() {
    let cat = category("_test", 1, vec![column("a", int32_data(&[1]), None)]);
    let col = cat.get_column("nope").unwrap();
    assert!(!col.is_defined());
    assert_eq!(col.row_count(), 0);
    assert_eq!(col.get_string(0), None);
    assert_eq!(col.get_int(0), 0);
    assert_eq!(col.get_float(0), 0.0);
    assert_eq!(col.get_value_presence(0), Presence::Present);
    assert!(col.string_equals(0, ""));
}

#[test]
fn test_get_column_is_cached_and_idempotent() {
    let cat = category("_test", 2, vec![column("a", int32_data(&[3, 4]), None)]);
    let first = cat.get_column("a").unwrap();
    let second = cat.get_column("a").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    for row in 0..2 {
        assert_eq!(first.get_int(row), second.get_int(row));
        assert_eq!(first.get_string(row), second.get_string(row));
    }
}

#[test]
fn test_row_count_mismatch_is_malformed() {
    let cat = category("_test", 5, vec![column("a", int32_data(&[1, 2]), None)]);
    let first = cat.get_column("a").unwrap_err();
    assert!(matches!(first, BincifError::MalformedEncoding(_)));
    // The failure is cached too; a second call reports the same error.
    let second = cat.get_column("a").unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_mask_length_mismatch_is_malformed() {
    let cat = category(
        "_test",
        2,
        vec![column("a", int32_data(&[1, 2]), Some(mask_data(&[0])))],
    );
    assert!(matches!(
        cat.get_column("a"),
        Err(BincifError::MalformedEncoding(_))
    ));
}

#[test]
fn test_column_names_preserve_declaration_order() {
    let cat = category(
        "_test",
        1,
        vec![
            column("z", int32_data(&[1]), None),
            column("a", int32_data(&[2]), None),
            column("m", int32_data(&[3]), None),
        ],
    );
    let names: Vec<&str> = cat.column_names().collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    assert_eq!(cat.column_count(), 3);
}

//==================================================================================
// 4. File-level behavior and the JSON projection
//==================================================================================

fn two_block_file() -> CifFile {
    CifFile::from_encoded(EncodedFile {
        version: "0.3.0".to_string(),
        encoder: "bincif tests".to_string(),
        data_blocks: vec![
            EncodedDataBlock {
                header: "1ABC".to_string(),
                categories: vec![EncodedCategory {
                    name: "_atom_site".to_string(),
                    row_count: 3,
                    columns: vec![
                        column("id", int32_data(&[1, 2, 3]), None),
                        column(
                            "occupancy",
                            int32_data(&[0, 0, 5]),
                            Some(mask_data(&[0, 1, 2])),
                        ),
                    ],
                }],
            },
            EncodedDataBlock {
                header: "2XYZ".to_string(),
                categories: vec![],
            },
        ],
    })
}

#[test]
fn test_file_and_block_ordering() {
    let file = two_block_file();
    assert_eq!(file.version(), "0.3.0");
    assert_eq!(file.encoder(), "bincif tests");

    let headers: Vec<&str> = file.data_blocks().iter().map(DataBlock::header).collect();
    assert_eq!(headers, vec!["1ABC", "2XYZ"]);

    let block = &file.data_blocks()[0];
    assert!(block.get_category("_atom_site").is_some());
    assert!(block.get_category("_missing").is_none());
}

#[test]
fn test_category_json_substitutes_absent_cells() {
    let file = two_block_file();
    let cat = file.data_blocks()[0].get_category("_atom_site").unwrap();
    let rendered = cat.to_json().unwrap();
    assert_eq!(
        rendered,
        json!({
            "name": "_atom_site",
            "rows": [
                { "id": "1", "occupancy": "0" },
                { "id": "2", "occupancy": "." },
                { "id": "3", "occupancy": "?" },
            ],
        })
    );
}

#[test]
fn test_file_json_shape() {
    let file = two_block_file();
    let rendered = file.to_json().unwrap();
    assert_eq!(rendered["version"], "0.3.0");
    assert_eq!(rendered["dataBlocks"][0]["header"], "1ABC");
    assert_eq!(rendered["dataBlocks"][1]["categories"], json!([]));
}
