use std::path::Path;

use crate::input::InputError;
use crate::input::reader::open_maybe_gz;

/// One identifier per line; blank lines are skipped.
pub fn parse_id_list(path: &Path) -> Result<Vec<String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut ids = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }
        ids.push(line.to_string());
    }

    Ok(ids)
}
