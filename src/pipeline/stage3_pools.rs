use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::model::{Binding, GeneCategory, GeneId};
use crate::pipeline::NamingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub category: GeneCategory,
    pub pool_size: usize,
    pub drawn: usize,
}

/// Names of `universe` not yet claimed, sorted so a seeded draw is reproducible.
pub fn unused_pool<'a>(
    universe: impl IntoIterator<Item = &'a str>,
    claimed: &HashSet<String>,
) -> Vec<&'a str> {
    universe
        .into_iter()
        .filter(|name| !claimed.contains(*name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Draws one unused name per identifier, without replacement, and marks the
/// drawn names as claimed.
pub fn assign_from_pool<'a, R: Rng + ?Sized>(
    category: GeneCategory,
    ids: &[GeneId],
    universe: impl IntoIterator<Item = &'a str>,
    claimed: &mut HashSet<String>,
    rng: &mut R,
) -> Result<(Vec<Binding>, PoolStats), NamingError> {
    let pool = unused_pool(universe, claimed);
    let stats = PoolStats {
        category,
        pool_size: pool.len(),
        drawn: ids.len(),
    };
    if ids.is_empty() {
        return Ok((Vec::new(), stats));
    }
    if pool.len() < ids.len() {
        return Err(NamingError::InsufficientPool {
            category,
            needed: ids.len(),
            available: pool.len(),
        });
    }

    let picks = rand::seq::index::sample(rng, pool.len(), ids.len());
    let mut bindings = Vec::with_capacity(ids.len());
    for (id, pick) in ids.iter().zip(picks.into_iter()) {
        let name = pool[pick].to_string();
        claimed.insert(name.clone());
        bindings.push(Binding {
            id: id.clone(),
            name,
            category,
        });
    }
    info!(
        "drew {} {} names from a pool of {}",
        stats.drawn, category, stats.pool_size
    );
    Ok((bindings, stats))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_pools.rs"]
mod tests;
