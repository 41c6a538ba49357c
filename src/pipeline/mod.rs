pub mod rename;
pub mod stage1_resolve;
pub mod stage2_targets;
pub mod stage3_pools;
pub mod stage4_merge;
pub mod stage5_write;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::catalog::{CatalogError, RankingSource};
use crate::input::vocab::LrVocabulary;
use crate::model::identity::IdentityError;
use crate::model::{
    Binding, GeneCategory, GeneId, IdentityTable, LigandReceptorRecord, RegulatoryRecord,
    TfBinding,
};
use stage1_resolve::{CategorySets, build_regulator_targets, resolve_categories};
use stage2_targets::{UnboundTargets, assign_target_names};
use stage3_pools::{PoolStats, assign_from_pool};
use stage4_merge::{merge_bindings, missing_ids};

#[derive(Debug, Error)]
pub enum NamingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("{category} pool has {available} unused names but {needed} identifiers need one")]
    InsufficientPool {
        category: GeneCategory,
        needed: usize,
        available: usize,
    },
    #[error(
        "motif {motif} of TF {tf} ran out of names: {claimed} claimed for {needed} targets"
    )]
    TargetsExhausted {
        tf: GeneId,
        motif: String,
        needed: usize,
        claimed: usize,
    },
    #[error("{needed} {category} identifiers need names but no ligand-receptor vocabulary was given")]
    MissingVocabulary {
        category: GeneCategory,
        needed: usize,
    },
    #[error("identity table integrity check failed: {0}")]
    DuplicateBinding(#[from] IdentityError),
}

#[derive(Debug, Clone, Copy)]
pub struct NamingInputs<'a> {
    pub tfs: &'a [TfBinding],
    pub regulatory: &'a [RegulatoryRecord],
    pub ligand_receptor: &'a [LigandReceptorRecord],
    pub noise_ids: &'a [GeneId],
    pub vocabulary: Option<&'a LrVocabulary>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NamingOptions {
    /// Fail instead of leaving targets unnamed when a motif runs out of names.
    pub strict_targets: bool,
}

#[derive(Debug, Clone)]
pub struct NamingOutcome {
    pub table: IdentityTable,
    pub categories: CategorySets,
    /// Targets still unnamed after every phase, grouped by the TF whose motif ran short.
    pub unbound: Vec<UnboundTargets>,
    pub receptor_excluded: Vec<GeneId>,
    pub pools: Vec<PoolStats>,
    pub dropped_duplicates: Vec<Binding>,
    /// Input identifiers without a name; non-empty only after a partial target binding.
    pub missing: Vec<GeneId>,
}

/// Runs every naming phase in order and returns the merged identity table.
///
/// TF and target names depend only on the inputs; noise, ligand and receptor
/// names are drawn from `rng`.
pub fn assign_gene_names<R: Rng + ?Sized>(
    inputs: &NamingInputs<'_>,
    catalog: &dyn RankingSource,
    options: NamingOptions,
    rng: &mut R,
) -> Result<NamingOutcome, NamingError> {
    let tf_ids: Vec<GeneId> = inputs.tfs.iter().map(|tf| tf.id.clone()).collect();
    let regulator_targets = build_regulator_targets(inputs.regulatory, &tf_ids);
    let categories = resolve_categories(
        inputs.tfs,
        &regulator_targets,
        inputs.ligand_receptor,
        inputs.noise_ids,
    );

    let targets = assign_target_names(
        inputs.tfs,
        &regulator_targets,
        catalog,
        &categories.receptor_set(),
        options,
    )?;
    info!(
        "named {} TFs and {} targets",
        inputs.tfs.len(),
        targets.bindings.len().saturating_sub(inputs.tfs.len())
    );

    let mut claimed = targets.claimed_names();
    let mut pools = Vec::with_capacity(3);

    let (noise, stats) = assign_from_pool(
        GeneCategory::Noise,
        &categories.noise,
        catalog.all_names(),
        &mut claimed,
        rng,
    )?;
    pools.push(stats);

    let (ligands, stats) = assign_from_pool(
        GeneCategory::Ligand,
        &categories.ligands,
        vocabulary_side(inputs.vocabulary, GeneCategory::Ligand, categories.ligands.len())?,
        &mut claimed,
        rng,
    )?;
    pools.push(stats);

    let (receptors, stats) = assign_from_pool(
        GeneCategory::Receptor,
        &categories.receptors,
        vocabulary_side(
            inputs.vocabulary,
            GeneCategory::Receptor,
            categories.receptors.len(),
        )?,
        &mut claimed,
        rng,
    )?;
    pools.push(stats);

    let (table, dropped_duplicates) =
        merge_bindings(vec![targets.bindings, noise, ligands, receptors])?;
    let missing = missing_ids(&table, &categories);

    // a target short of a ranked name may still be named by a later TF or as a receptor
    let mut unbound = targets.unbound;
    for entry in &mut unbound {
        entry.ids.retain(|id| table.name_of(id).is_none());
    }
    unbound.retain(|entry| !entry.ids.is_empty());

    Ok(NamingOutcome {
        table,
        categories,
        unbound,
        receptor_excluded: targets.receptor_excluded,
        pools,
        dropped_duplicates,
        missing,
    })
}

fn vocabulary_side(
    vocabulary: Option<&LrVocabulary>,
    category: GeneCategory,
    needed: usize,
) -> Result<Vec<&str>, NamingError> {
    let Some(vocab) = vocabulary else {
        if needed > 0 {
            return Err(NamingError::MissingVocabulary { category, needed });
        }
        return Ok(Vec::new());
    };
    let side = match category {
        GeneCategory::Ligand => &vocab.ligands,
        _ => &vocab.receptors,
    };
    Ok(side.iter().map(String::as_str).collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/naming.rs"]
mod tests;
