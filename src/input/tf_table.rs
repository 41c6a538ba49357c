use std::collections::HashSet;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::csv_reader;
use crate::model::TfBinding;

/// Reads `id,name,motif` rows. Row order is the order TFs claim target names.
pub fn load_tf_table(path: &Path) -> Result<Vec<TfBinding>, InputError> {
    let mut reader = csv_reader(path)?;
    let mut tfs = Vec::new();
    for row in reader.deserialize::<TfBinding>() {
        tfs.push(row.map_err(InputError::csv(path))?);
    }
    if tfs.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "TF table {} is empty",
            path.display()
        )));
    }
    validate_tfs(&tfs)?;
    Ok(tfs)
}

pub fn validate_tfs(tfs: &[TfBinding]) -> Result<(), InputError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for tf in tfs {
        if tf.id.is_empty() || tf.name.is_empty() || tf.motif.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "TF row has an empty field: id={:?} name={:?} motif={:?}",
                tf.id, tf.name, tf.motif
            )));
        }
        if !ids.insert(tf.id.as_str()) {
            return Err(InputError::InvalidInput(format!(
                "TF id {} listed twice",
                tf.id
            )));
        }
        if !names.insert(tf.name.as_str()) {
            return Err(InputError::InvalidInput(format!(
                "TF name {} listed twice",
                tf.name
            )));
        }
    }
    Ok(())
}
