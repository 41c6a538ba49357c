use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::pipeline::NamingOutcome;
use crate::report::json::render_summary_json;
use crate::report::table::write_identity_csv;
use crate::report::text::render_report_text;
use crate::report::{OutputError, RunInfo, build_summary};

pub const NAMES_FILE: &str = "gene_names.csv";
pub const SUMMARY_FILE: &str = "naming_summary.json";
pub const REPORT_FILE: &str = "report.txt";

#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub names: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

pub fn write_outputs(
    outcome: &NamingOutcome,
    run: RunInfo,
    out_dir: &Path,
) -> Result<WrittenOutputs, OutputError> {
    fs::create_dir_all(out_dir)?;

    let names = out_dir.join(NAMES_FILE);
    let file = BufWriter::new(File::create(&names)?);
    write_identity_csv(&outcome.table, file)?;

    let summary_data = build_summary(outcome, run);
    let summary = out_dir.join(SUMMARY_FILE);
    fs::write(&summary, render_summary_json(&summary_data)?)?;

    let report = out_dir.join(REPORT_FILE);
    fs::write(&report, render_report_text(&summary_data))?;

    info!(
        "wrote {} identifier-name rows to {}",
        outcome.table.len(),
        names.display()
    );
    Ok(WrittenOutputs {
        names,
        summary,
        report,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_write.rs"]
mod tests;
