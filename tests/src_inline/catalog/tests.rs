use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::writer::FileWriter as IpcFileWriter;
use arrow::record_batch::RecordBatch;
use parquet::data_type::{ByteArray, ByteArrayType, Int32Type};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

use super::loader::load_catalog;
use super::*;
use crate::input::InputError;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn small_catalog() -> RankingCatalog {
    RankingCatalog::new(
        strings(&["m1", "m2"]),
        strings(&["nameA", "nameB", "nameC"]),
        vec![
            2.0, 1.0, 3.0, //
            3.0, 2.0, 1.0,
        ],
    )
    .unwrap()
}

#[test]
fn test_names_for_motif_sorted_by_rank() {
    let catalog = small_catalog();
    assert_eq!(
        catalog.names_for_motif("m1").unwrap(),
        vec!["nameB", "nameA", "nameC"]
    );
    assert_eq!(
        catalog.names_for_motif("m2").unwrap(),
        vec!["nameC", "nameB", "nameA"]
    );
}

#[test]
fn test_missing_motif_is_error() {
    let catalog = small_catalog();
    assert_eq!(
        catalog.names_for_motif("nope").unwrap_err(),
        CatalogError::MotifNotFound {
            motif: "nope".to_string()
        }
    );
}

#[test]
fn test_all_names_excludes_motif_column() {
    let catalog = small_catalog();
    let names = catalog.all_names();
    assert_eq!(names, vec!["nameA", "nameB", "nameC"]);
    assert!(!names.contains(&MOTIF_COLUMN));
}

#[test]
fn test_equal_ranks_keep_column_order() {
    let catalog = RankingCatalog::new(
        strings(&["m1"]),
        strings(&["x", "y", "z"]),
        vec![1.0, 1.0, 0.5],
    )
    .unwrap();
    assert_eq!(catalog.names_for_motif("m1").unwrap(), vec!["z", "x", "y"]);
}

#[test]
fn test_shape_mismatch_rejected() {
    let err = RankingCatalog::new(strings(&["m1"]), strings(&["x", "y"]), vec![1.0]).unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}

#[test]
fn test_duplicate_motif_keeps_first_row() {
    let catalog = RankingCatalog::new(
        strings(&["m1", "m1"]),
        strings(&["x", "y"]),
        vec![1.0, 2.0, 2.0, 1.0],
    )
    .unwrap();
    assert_eq!(catalog.names_for_motif("m1").unwrap(), vec!["x", "y"]);
}

#[test]
fn test_load_csv_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "nameA,motifs,nameB,nameC").unwrap();
    writeln!(f, "3,m1,1,2").unwrap();
    writeln!(f, "1,m2,2,3").unwrap();
    drop(f);

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.n_motifs(), 2);
    assert_eq!(catalog.n_genes(), 3);
    assert!(catalog.has_motif("m2"));
    assert_eq!(
        catalog.names_for_motif("m1").unwrap(),
        vec!["nameB", "nameC", "nameA"]
    );
}

#[test]
fn test_load_tsv_catalog_without_motif_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.tsv");
    std::fs::write(&path, "motif\tnameA\nm1\t1\n").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_load_csv_catalog_rejects_text_rank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.csv");
    std::fs::write(&path, "motifs,nameA\nm1,first\n").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_non_finite_rank_rejected() {
    let err = RankingCatalog::new(
        strings(&["m1"]),
        strings(&["nameA", "nameB"]),
        vec![1.0, f64::NAN],
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(ref msg) if msg.contains("nameB")));
}

#[test]
fn test_load_csv_catalog_rejects_infinite_rank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.csv");
    std::fs::write(&path, "motifs,nameA,nameB\nm1,1,inf\n").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(
        err,
        InputError::Catalog(CatalogError::Malformed(_))
    ));
}

/// Writes `__index_level_0__`, `nameA`, `nameB`, `nameC` as INT32 and `motifs`
/// as UTF8 (or INT32 when `numeric_motifs`).
fn write_parquet_catalog(path: &Path, numeric_motifs: bool) {
    let motif_type = if numeric_motifs {
        "REQUIRED INT32 motifs;"
    } else {
        "REQUIRED BYTE_ARRAY motifs (UTF8);"
    };
    let message = format!(
        "message rankings {{
            REQUIRED INT32 __index_level_0__;
            REQUIRED INT32 nameA;
            REQUIRED INT32 nameB;
            REQUIRED INT32 nameC;
            {motif_type}
        }}"
    );
    let schema = Arc::new(parse_message_type(&message).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(File::create(path).unwrap(), schema, props).unwrap();

    let int_columns: [Vec<i32>; 4] = [vec![0, 1], vec![3, 1], vec![1, 2], vec![2, 3]];
    let motifs = vec![ByteArray::from("m1"), ByteArray::from("m2")];
    let mut row_group = writer.next_row_group().unwrap();
    let mut column = 0;
    while let Some(mut col) = row_group.next_column().unwrap() {
        if column < int_columns.len() {
            col.typed::<Int32Type>()
                .write_batch(&int_columns[column], None, None)
                .unwrap();
        } else if numeric_motifs {
            col.typed::<Int32Type>()
                .write_batch(&[10, 20], None, None)
                .unwrap();
        } else {
            col.typed::<ByteArrayType>()
                .write_batch(&motifs, None, None)
                .unwrap();
        }
        col.close().unwrap();
        column += 1;
    }
    row_group.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn test_load_parquet_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.parquet");
    write_parquet_catalog(&path, false);

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.n_motifs(), 2);
    assert_eq!(catalog.all_names(), vec!["nameA", "nameB", "nameC"]);
    assert_eq!(
        catalog.names_for_motif("m1").unwrap(),
        vec!["nameB", "nameC", "nameA"]
    );
    assert_eq!(
        catalog.names_for_motif("m2").unwrap(),
        vec!["nameA", "nameB", "nameC"]
    );
}

#[test]
fn test_load_parquet_catalog_rejects_numeric_motifs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.pq");
    write_parquet_catalog(&path, true);
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(ref msg) if msg.contains("motifs")));
}

fn write_feather_catalog(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, values)| Field::new(*name, values.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch =
        RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, v)| v).collect())
            .unwrap();
    let mut writer = IpcFileWriter::try_new(File::create(path).unwrap(), &schema).unwrap();
    writer.write(&batch).unwrap();
    writer.finish().unwrap();
}

#[test]
fn test_load_feather_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mm10.rankings.feather");
    write_feather_catalog(
        &path,
        vec![
            ("nameA", Arc::new(Int32Array::from(vec![3, 1])) as ArrayRef),
            ("nameB", Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef),
            ("nameC", Arc::new(Int32Array::from(vec![2, 3])) as ArrayRef),
            ("motifs", Arc::new(StringArray::from(vec!["m1", "m2"])) as ArrayRef),
        ],
    );

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.n_genes(), 3);
    assert_eq!(catalog.all_names(), vec!["nameA", "nameB", "nameC"]);
    assert_eq!(
        catalog.names_for_motif("m1").unwrap(),
        vec!["nameB", "nameC", "nameA"]
    );
    assert_eq!(
        catalog.names_for_motif("m2").unwrap(),
        vec!["nameA", "nameB", "nameC"]
    );
}

#[test]
fn test_load_feather_catalog_rejects_missing_rank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.feather");
    write_feather_catalog(
        &path,
        vec![
            ("motifs", Arc::new(StringArray::from(vec!["m1"])) as ArrayRef),
            ("nameA", Arc::new(Int32Array::from(vec![None::<i32>])) as ArrayRef),
        ],
    );
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(ref msg) if msg.contains("nameA")));
}

#[test]
fn test_load_feather_catalog_rejects_numeric_motifs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.feather");
    write_feather_catalog(
        &path,
        vec![
            ("motifs", Arc::new(Int32Array::from(vec![1])) as ArrayRef),
            ("nameA", Arc::new(Int32Array::from(vec![1])) as ArrayRef),
        ],
    );
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_feather_with_wrong_contents_is_arrow_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rankings.feather");
    std::fs::write(&path, "motifs,nameA\nm1,1\n").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, InputError::Arrow { .. }));
}
