use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::RankingSource;
use crate::model::{Binding, GeneCategory, GeneId, TfBinding};
use crate::pipeline::stage1_resolve::RegulatorTargets;
use crate::pipeline::stage4_merge::dedup_by_id;
use crate::pipeline::{NamingError, NamingOptions};

/// Targets of one TF left without a name because its motif ranking ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnboundTargets {
    pub tf: GeneId,
    pub motif: String,
    pub ids: Vec<GeneId>,
}

#[derive(Debug, Clone)]
pub struct TargetNaming {
    /// TF bindings first, then target bindings in TF order.
    pub bindings: Vec<Binding>,
    pub unbound: Vec<UnboundTargets>,
    /// Targets that are also receptors; named later from the receptor vocabulary.
    pub receptor_excluded: Vec<GeneId>,
}

impl TargetNaming {
    pub fn claimed_names(&self) -> HashSet<String> {
        self.bindings.iter().map(|b| b.name.clone()).collect()
    }
}

pub fn assign_target_names(
    tfs: &[TfBinding],
    regulator_targets: &RegulatorTargets,
    catalog: &dyn RankingSource,
    receptors: &HashSet<GeneId>,
    options: NamingOptions,
) -> Result<TargetNaming, NamingError> {
    let mut bindings: Vec<Binding> = tfs
        .iter()
        .map(|tf| Binding {
            id: tf.id.clone(),
            name: tf.name.clone(),
            category: GeneCategory::TranscriptionFactor,
        })
        .collect();
    let mut claimed: HashSet<String> = bindings.iter().map(|b| b.name.clone()).collect();
    let mut unbound = Vec::new();
    let no_targets = Vec::new();

    for tf in tfs {
        let targets = regulator_targets.get(&tf.id).unwrap_or(&no_targets);
        let candidates = catalog.names_for_motif(&tf.motif)?;
        let top_num = targets.len();

        let mut fresh = Vec::with_capacity(top_num);
        for name in candidates {
            if fresh.len() == top_num {
                break;
            }
            if claimed.insert(name.to_string()) {
                fresh.push(name);
            }
        }
        debug!(
            "TF {} ({}): {} targets, {} names claimed from motif {}",
            tf.id,
            tf.name,
            top_num,
            fresh.len(),
            tf.motif
        );

        for (id, name) in targets.iter().zip(&fresh) {
            bindings.push(Binding {
                id: id.clone(),
                name: name.to_string(),
                category: GeneCategory::Target,
            });
        }

        if fresh.len() < top_num {
            if options.strict_targets {
                return Err(NamingError::TargetsExhausted {
                    tf: tf.id.clone(),
                    motif: tf.motif.clone(),
                    needed: top_num,
                    claimed: fresh.len(),
                });
            }
            warn!(
                "motif {} of TF {} ran out of unused names: {} of {} targets left unnamed",
                tf.motif,
                tf.id,
                top_num - fresh.len(),
                top_num
            );
            unbound.push(UnboundTargets {
                tf: tf.id.clone(),
                motif: tf.motif.clone(),
                ids: targets[fresh.len()..].to_vec(),
            });
        }
    }

    let (bindings, dropped) = dedup_by_id(bindings);
    if !dropped.is_empty() {
        debug!(
            "{} target bindings dropped as repeated identifiers",
            dropped.len()
        );
    }

    let mut receptor_excluded = Vec::new();
    let bindings = bindings
        .into_iter()
        .filter(|b| {
            let exclude = b.category == GeneCategory::Target && receptors.contains(&b.id);
            if exclude {
                receptor_excluded.push(b.id.clone());
            }
            !exclude
        })
        .collect();

    Ok(TargetNaming {
        bindings,
        unbound,
        receptor_excluded,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_targets.rs"]
mod tests;
