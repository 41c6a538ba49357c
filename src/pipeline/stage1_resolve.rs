use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use crate::model::{GeneCategory, GeneId, LigandReceptorRecord, RegulatoryRecord, TfBinding};

/// Regulator -> regulated identifiers, strongest effect first.
pub type RegulatorTargets = HashMap<GeneId, Vec<GeneId>>;

/// Orders each regulator's targets by descending effect. Ties keep input order.
/// Regulators without records map to an empty list.
pub fn build_regulator_targets(
    records: &[RegulatoryRecord],
    regulators: &[GeneId],
) -> RegulatorTargets {
    let mut by_regulator: HashMap<&str, Vec<&RegulatoryRecord>> = HashMap::new();
    for record in records {
        by_regulator
            .entry(record.regulator.as_str())
            .or_default()
            .push(record);
    }

    let mut out = HashMap::with_capacity(regulators.len());
    for regulator in regulators {
        let mut rows = by_regulator
            .get(regulator.as_str())
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| b.effect.total_cmp(&a.effect));
        out.insert(
            regulator.clone(),
            rows.into_iter().map(|r| r.regulated.clone()).collect(),
        );
    }
    out
}

/// Identifier lists per category, each deduplicated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategorySets {
    pub tfs: Vec<GeneId>,
    pub targets: Vec<GeneId>,
    pub noise: Vec<GeneId>,
    pub ligands: Vec<GeneId>,
    pub receptors: Vec<GeneId>,
}

impl CategorySets {
    pub fn receptor_set(&self) -> HashSet<GeneId> {
        self.receptors.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeneCategory, &GeneId)> {
        tagged(GeneCategory::TranscriptionFactor, &self.tfs)
            .chain(tagged(GeneCategory::Target, &self.targets))
            .chain(tagged(GeneCategory::Noise, &self.noise))
            .chain(tagged(GeneCategory::Ligand, &self.ligands))
            .chain(tagged(GeneCategory::Receptor, &self.receptors))
    }

    /// Identifiers listed under more than one category.
    pub fn overlaps(&self) -> BTreeMap<&str, Vec<GeneCategory>> {
        let mut seen: BTreeMap<&str, Vec<GeneCategory>> = BTreeMap::new();
        for (category, id) in self.iter() {
            let entry = seen.entry(id.as_str()).or_default();
            if !entry.contains(&category) {
                entry.push(category);
            }
        }
        seen.retain(|_, categories| categories.len() > 1);
        seen
    }
}

pub fn resolve_categories(
    tfs: &[TfBinding],
    regulator_targets: &RegulatorTargets,
    ligand_receptor: &[LigandReceptorRecord],
    noise_ids: &[GeneId],
) -> CategorySets {
    let sets = CategorySets {
        tfs: unique(tfs.iter().map(|tf| &tf.id)),
        targets: unique(
            tfs.iter()
                .filter_map(|tf| regulator_targets.get(&tf.id))
                .flatten(),
        ),
        noise: unique(noise_ids.iter()),
        ligands: unique(ligand_receptor.iter().map(|r| &r.ligand)),
        receptors: unique(ligand_receptor.iter().map(|r| &r.receptor)),
    };

    for (id, categories) in sets.overlaps() {
        let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
        warn!(
            "identifier {} is listed as {}; only one binding is kept",
            id,
            labels.join(" and ")
        );
    }
    sets
}

fn tagged(
    category: GeneCategory,
    ids: &[GeneId],
) -> impl Iterator<Item = (GeneCategory, &GeneId)> {
    ids.iter().map(move |id| (category, id))
}

fn unique<'a>(ids: impl Iterator<Item = &'a GeneId>) -> Vec<GeneId> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_resolve.rs"]
mod tests;
