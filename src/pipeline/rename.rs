use std::collections::HashMap;
use std::io::BufWriter;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::input::InputError;
use crate::input::counts::read_gene_axis;
use crate::input::reader::{csv_reader, delimiter_for};

const SHOWN_UNMAPPED: usize = 5;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{count} gene identifiers have no name (first: {})", shown.join(", "))]
    Unmapped { count: usize, shown: Vec<String> },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStats {
    pub n_genes: usize,
}

/// Replaces the gene identifiers of a genes x cells counts table with real names.
///
/// Every identifier in the table must have a name; otherwise nothing is written.
pub fn rename_counts(
    counts: &Path,
    names: &HashMap<String, String>,
    out: &Path,
) -> Result<RenameStats, RenameError> {
    let axis = read_gene_axis(counts)?;
    let unmapped: Vec<&String> = axis.iter().filter(|id| !names.contains_key(*id)).collect();
    if !unmapped.is_empty() {
        return Err(RenameError::Unmapped {
            count: unmapped.len(),
            shown: unmapped
                .iter()
                .take(SHOWN_UNMAPPED)
                .map(|s| s.to_string())
                .collect(),
        });
    }

    // staged next to `out`, which may be `counts` itself
    let dir = match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;

    let mut reader = csv_reader(counts)?;
    let headers = reader.headers().map_err(InputError::csv(counts))?.clone();
    let mut n_genes = 0usize;
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter_for(out))
            .from_writer(BufWriter::new(staged.as_file_mut()));
        writer.write_record(&headers)?;

        let mut renamed = csv::StringRecord::new();
        for row in reader.records() {
            let record = row.map_err(InputError::csv(counts))?;
            renamed.clear();
            for (j, field) in record.iter().enumerate() {
                if j == 0 {
                    // presence checked above
                    renamed.push_field(names.get(field).map(String::as_str).unwrap_or(field));
                } else {
                    renamed.push_field(field);
                }
            }
            writer.write_record(&renamed)?;
            n_genes += 1;
        }
        writer.flush()?;
    }
    drop(reader);
    staged.persist(out).map_err(|err| err.error)?;

    info!("renamed {} genes into {}", n_genes, out.display());
    Ok(RenameStats { n_genes })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/rename.rs"]
mod tests;
