use std::collections::HashSet;

use tracing::warn;

use crate::model::{Binding, GeneId, IdentityTable};
use crate::pipeline::NamingError;
use crate::pipeline::stage1_resolve::CategorySets;

/// Keeps the first binding of every identifier; returns kept and dropped bindings.
pub fn dedup_by_id(bindings: Vec<Binding>) -> (Vec<Binding>, Vec<Binding>) {
    let mut seen: HashSet<GeneId> = HashSet::with_capacity(bindings.len());
    let mut kept = Vec::with_capacity(bindings.len());
    let mut dropped = Vec::new();
    for binding in bindings {
        if seen.insert(binding.id.clone()) {
            kept.push(binding);
        } else {
            dropped.push(binding);
        }
    }
    (kept, dropped)
}

pub fn merge_bindings(
    phases: Vec<Vec<Binding>>,
) -> Result<(IdentityTable, Vec<Binding>), NamingError> {
    let all: Vec<Binding> = phases.into_iter().flatten().collect();
    let (kept, dropped) = dedup_by_id(all);
    let table = IdentityTable::from_bindings(kept)?;
    for binding in &dropped {
        if let (Some(name), Some(category)) = (
            table.name_of(&binding.id),
            table.category_of(&binding.id),
        ) {
            warn!(
                "identifier {} already named {} as {}; dropping its {} binding to {}",
                binding.id, name, category, binding.category, binding.name
            );
        }
    }
    Ok((table, dropped))
}

/// Input identifiers the table does not cover, in category order.
pub fn missing_ids(table: &IdentityTable, categories: &CategorySets) -> Vec<GeneId> {
    let bound = table.ids();
    let mut seen = HashSet::new();
    categories
        .iter()
        .map(|(_, id)| id)
        .filter(|id| !bound.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_merge.rs"]
mod tests;
