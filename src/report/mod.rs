pub mod json;
pub mod table;
pub mod text;

use serde::Serialize;
use thiserror::Error;

use crate::model::{GeneCategory, GeneId};
use crate::pipeline::NamingOutcome;
use crate::pipeline::stage2_targets::UnboundTargets;
use crate::pipeline::stage3_pools::PoolStats;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: GeneCategory,
    pub requested: usize,
    pub bound: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub tool: String,
    pub version: String,
    pub seed: u64,
    pub strict_targets: bool,
    pub rankings: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamingSummary {
    #[serde(flatten)]
    pub run: RunInfo,
    pub n_bound: usize,
    pub categories: Vec<CategoryCount>,
    pub pools: Vec<PoolStats>,
    pub unbound_targets: Vec<UnboundTargets>,
    pub receptor_excluded_targets: Vec<GeneId>,
    pub overlapping_ids: usize,
    pub dropped_bindings: usize,
    pub missing_ids: Vec<GeneId>,
}

pub fn build_summary(outcome: &NamingOutcome, run: RunInfo) -> NamingSummary {
    let sets = &outcome.categories;
    let requested = [
        (GeneCategory::TranscriptionFactor, sets.tfs.len()),
        (GeneCategory::Target, sets.targets.len()),
        (GeneCategory::Noise, sets.noise.len()),
        (GeneCategory::Ligand, sets.ligands.len()),
        (GeneCategory::Receptor, sets.receptors.len()),
    ];
    let categories = requested
        .into_iter()
        .map(|(category, requested)| CategoryCount {
            category,
            requested,
            bound: outcome.table.count(category),
        })
        .collect();

    NamingSummary {
        run,
        n_bound: outcome.table.len(),
        categories,
        pools: outcome.pools.clone(),
        unbound_targets: outcome.unbound.clone(),
        receptor_excluded_targets: outcome.receptor_excluded.clone(),
        overlapping_ids: sets.overlaps().len(),
        dropped_bindings: outcome.dropped_duplicates.len(),
        missing_ids: outcome.missing.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
