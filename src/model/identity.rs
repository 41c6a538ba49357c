use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::{GeneCategory, GeneId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub id: GeneId,
    pub name: String,
    pub category: GeneCategory,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identifier {id} is bound twice")]
    DuplicateId { id: GeneId },
    #[error("name {name} is bound to both {first} and {second}")]
    DuplicateName {
        name: String,
        first: GeneId,
        second: GeneId,
    },
}

/// Final identifier -> name table. Built once, never mutated afterwards.
///
/// Construction rejects both repeated identifiers and repeated names, so every
/// table that exists is injective.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    bindings: Vec<Binding>,
    by_id: HashMap<GeneId, usize>,
}

impl IdentityTable {
    pub fn from_bindings(bindings: Vec<Binding>) -> Result<Self, IdentityError> {
        let mut by_id: HashMap<GeneId, usize> = HashMap::with_capacity(bindings.len());
        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(bindings.len());
        for (idx, binding) in bindings.iter().enumerate() {
            if by_id.insert(binding.id.clone(), idx).is_some() {
                return Err(IdentityError::DuplicateId {
                    id: binding.id.clone(),
                });
            }
            if let Some(&first) = by_name.get(binding.name.as_str()) {
                return Err(IdentityError::DuplicateName {
                    name: binding.name.clone(),
                    first: bindings[first].id.clone(),
                    second: binding.id.clone(),
                });
            }
            by_name.insert(binding.name.as_str(), idx);
        }
        Ok(Self { bindings, by_id })
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.by_id
            .get(id)
            .map(|&idx| self.bindings[idx].name.as_str())
    }

    pub fn category_of(&self, id: &str) -> Option<GeneCategory> {
        self.by_id.get(id).map(|&idx| self.bindings[idx].category)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn count(&self, category: GeneCategory) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.category == category)
            .count()
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.bindings.iter().map(|b| b.id.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/identity.rs"]
mod tests;
