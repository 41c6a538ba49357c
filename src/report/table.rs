use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;
use crate::input::reader::csv_reader;
use crate::model::IdentityTable;
use crate::report::OutputError;

#[derive(Debug, Serialize)]
struct NameRow<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct OwnedNameRow {
    id: String,
    name: String,
}

/// Writes `id,name` with a header and no index column.
pub fn write_identity_csv<W: Write>(table: &IdentityTable, out: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(out);
    for binding in table.bindings() {
        writer.serialize(NameRow {
            id: &binding.id,
            name: &binding.name,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads an `id,name` table back as a lookup map. Repeated ids or names are rejected.
pub fn read_name_table(path: &Path) -> Result<HashMap<String, String>, InputError> {
    let mut reader = csv_reader(path)?;
    let mut by_id = HashMap::new();
    let mut names = std::collections::HashSet::new();
    for row in reader.deserialize::<OwnedNameRow>() {
        let row = row.map_err(InputError::csv(path))?;
        if !names.insert(row.name.clone()) {
            return Err(InputError::InvalidInput(format!(
                "name {} appears twice in {}",
                row.name,
                path.display()
            )));
        }
        if by_id.insert(row.id.clone(), row.name).is_some() {
            return Err(InputError::InvalidInput(format!(
                "identifier {} appears twice in {}",
                row.id,
                path.display()
            )));
        }
    }
    Ok(by_id)
}
