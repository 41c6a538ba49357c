use std::path::Path;

use crate::input::InputError;
use crate::input::reader::csv_reader;
use crate::model::{LigandReceptorRecord, RegulatoryRecord};

/// Regulatory ground truth is mandatory, so an empty table is rejected.
pub fn load_regulatory(path: &Path) -> Result<Vec<RegulatoryRecord>, InputError> {
    let mut reader = csv_reader(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<RegulatoryRecord>() {
        let record = row.map_err(InputError::csv(path))?;
        if !record.effect.is_finite() {
            return Err(InputError::InvalidInput(format!(
                "non-finite regulator.effect for {} -> {} in {}",
                record.regulator,
                record.regulated,
                path.display()
            )));
        }
        records.push(record);
    }
    if records.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "regulatory ground truth {} has no records",
            path.display()
        )));
    }
    Ok(records)
}

pub fn load_ligand_receptor(path: &Path) -> Result<Vec<LigandReceptorRecord>, InputError> {
    let mut reader = csv_reader(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<LigandReceptorRecord>() {
        records.push(row.map_err(InputError::csv(path))?);
    }
    Ok(records)
}
