use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::ipc::reader::FileReader as IpcFileReader;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use tracing::info;

use crate::catalog::{MOTIF_COLUMN, RankingCatalog};
use crate::input::InputError;
use crate::input::reader::csv_reader;

/// Loads a ranking database, picking the reader from the file extension:
/// `.feather`/`.arrow` (Arrow IPC, as cisTarget ships them), `.parquet`/`.pq`,
/// anything else is read as CSV/TSV.
pub fn load_catalog(path: &Path) -> Result<RankingCatalog, InputError> {
    let catalog = if is_feather(path) {
        load_feather(path)?
    } else if is_parquet(path) {
        load_parquet(path)?
    } else {
        load_delimited(path)?
    };
    info!(
        "ranking catalog {}: {} motifs x {} genes",
        path.display(),
        catalog.n_motifs(),
        catalog.n_genes()
    );
    Ok(catalog)
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "parquet" || ext == "pq")
}

fn is_feather(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "feather" || ext == "arrow" || ext == "ipc")
}

// pandas writes its index as `__index_level_N__` when it is not a RangeIndex
fn is_index_column(name: &str) -> bool {
    name.starts_with("__index_level_")
}

pub fn load_parquet(path: &Path) -> Result<RankingCatalog, InputError> {
    let pq_err = |source| InputError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = SerializedFileReader::new(file).map_err(pq_err)?;
    let metadata = reader.metadata();
    let nrows = metadata.file_metadata().num_rows() as usize;
    let fields = metadata.file_metadata().schema().get_fields();

    let motif_col = fields
        .iter()
        .position(|f| f.name() == MOTIF_COLUMN)
        .ok_or_else(|| {
            InputError::MissingInput(format!(
                "{} has no {MOTIF_COLUMN} column",
                path.display()
            ))
        })?;
    let gene_cols: Vec<usize> = (0..fields.len())
        .filter(|&j| j != motif_col && !is_index_column(fields[j].name()))
        .collect();
    let genes: Vec<String> = gene_cols
        .iter()
        .map(|&j| fields[j].name().to_string())
        .collect();

    let mut motifs = Vec::with_capacity(nrows);
    let mut ranks = Vec::with_capacity(nrows * genes.len());
    let mut is_gene = vec![false; fields.len()];
    for &j in &gene_cols {
        is_gene[j] = true;
    }

    let row_iter = reader.get_row_iter(None).map_err(pq_err)?;
    for record in row_iter {
        let row = record.map_err(pq_err)?;
        for (j, (name, field)) in row.get_column_iter().enumerate() {
            if j == motif_col {
                match field {
                    Field::Str(s) => motifs.push(s.clone()),
                    other => {
                        return Err(InputError::InvalidInput(format!(
                            "{MOTIF_COLUMN} value {other} is not a string"
                        )));
                    }
                }
            } else if is_gene.get(j).copied().unwrap_or(false) {
                let rank = field_as_rank(field).ok_or_else(|| {
                    InputError::InvalidInput(format!(
                        "rank for gene {name} is not numeric: {field}"
                    ))
                })?;
                ranks.push(rank);
            }
        }
    }

    Ok(RankingCatalog::new(motifs, genes, ranks)?)
}

fn field_as_rank(field: &Field) -> Option<f64> {
    match field {
        Field::Byte(v) => Some(*v as f64),
        Field::Short(v) => Some(*v as f64),
        Field::Int(v) => Some(*v as f64),
        Field::Long(v) => Some(*v as f64),
        Field::UByte(v) => Some(*v as f64),
        Field::UShort(v) => Some(*v as f64),
        Field::UInt(v) => Some(*v as f64),
        Field::ULong(v) => Some(*v as f64),
        Field::Float(v) => Some(*v as f64),
        Field::Double(v) => Some(*v),
        _ => None,
    }
}

/// Feather v2 is the Arrow IPC file format; v1 files are rejected by the reader.
pub fn load_feather(path: &Path) -> Result<RankingCatalog, InputError> {
    let arrow_err = |source| InputError::Arrow {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = IpcFileReader::try_new(file, None).map_err(arrow_err)?;
    let schema = reader.schema();

    let motif_col = schema
        .fields()
        .iter()
        .position(|f| f.name() == MOTIF_COLUMN)
        .ok_or_else(|| {
            InputError::MissingInput(format!(
                "{} has no {MOTIF_COLUMN} column",
                path.display()
            ))
        })?;
    let motif_type = schema.field(motif_col).data_type();
    if !matches!(
        motif_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Dictionary(..)
    ) {
        return Err(InputError::InvalidInput(format!(
            "{MOTIF_COLUMN} column has type {motif_type}, expected strings"
        )));
    }
    let gene_cols: Vec<usize> = (0..schema.fields().len())
        .filter(|&j| j != motif_col && !is_index_column(schema.field(j).name()))
        .collect();
    let genes: Vec<String> = gene_cols
        .iter()
        .map(|&j| schema.field(j).name().to_string())
        .collect();

    let mut motifs = Vec::new();
    let mut ranks = Vec::new();
    for batch in reader {
        let batch = batch.map_err(arrow_err)?;
        let motif_values =
            cast(batch.column(motif_col).as_ref(), &DataType::Utf8).map_err(arrow_err)?;
        let motif_values = motif_values.as_string_opt::<i32>().ok_or_else(|| {
            InputError::InvalidInput(format!("{MOTIF_COLUMN} column is not text"))
        })?;
        let gene_values: Vec<ArrayRef> = gene_cols
            .iter()
            .map(|&j| cast(batch.column(j).as_ref(), &DataType::Float64).map_err(arrow_err))
            .collect::<Result<_, _>>()?;
        let gene_values: Vec<&Float64Array> = gene_values
            .iter()
            .zip(&genes)
            .map(|(values, gene)| {
                values.as_primitive_opt::<Float64Type>().ok_or_else(|| {
                    InputError::InvalidInput(format!("rank column {gene} is not numeric"))
                })
            })
            .collect::<Result<_, _>>()?;

        for i in 0..batch.num_rows() {
            if motif_values.is_null(i) {
                return Err(InputError::InvalidInput(format!(
                    "motif row {} has no {MOTIF_COLUMN} value",
                    motifs.len() + 1
                )));
            }
            motifs.push(motif_values.value(i).to_string());
            for (values, gene) in gene_values.iter().zip(&genes) {
                if values.is_null(i) {
                    return Err(InputError::InvalidInput(format!(
                        "rank for gene {gene} in motif row {} is missing or not numeric",
                        motifs.len()
                    )));
                }
                ranks.push(values.value(i));
            }
        }
    }

    Ok(RankingCatalog::new(motifs, genes, ranks)?)
}

pub fn load_delimited(path: &Path) -> Result<RankingCatalog, InputError> {
    let mut reader = csv_reader(path)?;
    let headers = reader.headers().map_err(InputError::csv(path))?.clone();
    let motif_col = headers
        .iter()
        .position(|h| h == MOTIF_COLUMN)
        .ok_or_else(|| {
            InputError::MissingInput(format!(
                "{} has no {MOTIF_COLUMN} column",
                path.display()
            ))
        })?;
    let gene_cols: Vec<usize> = (0..headers.len())
        .filter(|&j| j != motif_col && !headers[j].is_empty() && !is_index_column(&headers[j]))
        .collect();
    let genes: Vec<String> = gene_cols.iter().map(|&j| headers[j].to_string()).collect();

    let mut motifs = Vec::new();
    let mut ranks = Vec::new();
    for row in reader.records() {
        let record = row.map_err(InputError::csv(path))?;
        motifs.push(record.get(motif_col).unwrap_or_default().to_string());
        for &j in &gene_cols {
            let raw = record.get(j).unwrap_or_default();
            let rank = raw.parse::<f64>().map_err(|_| {
                InputError::InvalidInput(format!(
                    "rank {raw:?} for gene {} in motif row {} is not numeric",
                    &headers[j],
                    motifs.len()
                ))
            })?;
            ranks.push(rank);
        }
    }

    Ok(RankingCatalog::new(motifs, genes, ranks)?)
}
