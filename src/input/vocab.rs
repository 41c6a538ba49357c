use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::input::reader::csv_reader;

/// Ligand and receptor name universes of a ligand-receptor network
/// (NicheNet layout: `from` = ligand, `to` = receptor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LrVocabulary {
    pub ligands: BTreeSet<String>,
    pub receptors: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct LrRow {
    from: String,
    to: String,
}

pub fn load_lr_vocabulary(path: &Path) -> Result<LrVocabulary, InputError> {
    let mut reader = csv_reader(path)?;
    let mut vocab = LrVocabulary::default();
    for row in reader.deserialize::<LrRow>() {
        let row = row.map_err(InputError::csv(path))?;
        if !row.from.is_empty() {
            vocab.ligands.insert(row.from);
        }
        if !row.to.is_empty() {
            vocab.receptors.insert(row.to);
        }
    }
    Ok(vocab)
}
