use std::path::Path;

use crate::input::InputError;
use crate::input::reader::csv_reader;
use crate::model::GeneId;

/// Marker the simulator puts in the ids of genes with no regulatory role.
pub const NOISE_MARKER: &str = "gene";

/// Gene identifiers of a genes x cells counts table (first column of every row).
pub fn read_gene_axis(path: &Path) -> Result<Vec<GeneId>, InputError> {
    let mut reader = csv_reader(path)?;
    let mut ids = Vec::new();
    for row in reader.records() {
        let record = row.map_err(InputError::csv(path))?;
        match record.get(0) {
            Some(id) if !id.is_empty() => ids.push(id.to_string()),
            _ => {
                return Err(InputError::InvalidInput(format!(
                    "counts row {} in {} has no gene identifier",
                    ids.len() + 1,
                    path.display()
                )));
            }
        }
    }
    Ok(ids)
}

pub fn noise_ids_from_axis(axis: &[GeneId]) -> Vec<GeneId> {
    axis.iter()
        .filter(|id| id.contains(NOISE_MARKER))
        .cloned()
        .collect()
}
