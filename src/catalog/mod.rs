use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

pub mod loader;

/// Reserved column of a ranking database holding motif names.
pub const MOTIF_COLUMN: &str = "motifs";

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("motif {motif} not found in ranking catalog")]
    MotifNotFound { motif: String },
    #[error("malformed ranking catalog: {0}")]
    Malformed(String),
}

/// Read-only view over a motif x gene rank table.
pub trait RankingSource {
    /// Candidate names for `motif`, most enriched (lowest rank) first.
    fn names_for_motif(&self, motif: &str) -> Result<Vec<&str>, CatalogError>;

    /// Every candidate name in the catalog, excluding the motif column label.
    fn all_names(&self) -> Vec<&str>;
}

#[derive(Debug, Clone)]
pub struct RankingCatalog {
    genes: Vec<String>,
    motifs: Vec<String>,
    motif_row: HashMap<String, usize>,
    // row-major, one row per motif
    ranks: Vec<f64>,
}

impl RankingCatalog {
    pub fn new(
        motifs: Vec<String>,
        genes: Vec<String>,
        ranks: Vec<f64>,
    ) -> Result<Self, CatalogError> {
        if ranks.len() != motifs.len() * genes.len() {
            return Err(CatalogError::Malformed(format!(
                "{} rank values for {} motifs x {} genes",
                ranks.len(),
                motifs.len(),
                genes.len()
            )));
        }
        let mut seen = HashSet::with_capacity(genes.len());
        for gene in &genes {
            if gene == MOTIF_COLUMN {
                return Err(CatalogError::Malformed(format!(
                    "gene column named {MOTIF_COLUMN}"
                )));
            }
            if !seen.insert(gene.as_str()) {
                return Err(CatalogError::Malformed(format!(
                    "gene column {gene} repeated"
                )));
            }
        }

        if let Some(pos) = ranks.iter().position(|r| !r.is_finite()) {
            let n = genes.len();
            return Err(CatalogError::Malformed(format!(
                "non-finite rank {} for gene {} in motif {}",
                ranks[pos],
                genes[pos % n],
                motifs[pos / n]
            )));
        }

        let mut motif_row = HashMap::with_capacity(motifs.len());
        for (row, motif) in motifs.iter().enumerate() {
            if motif_row.contains_key(motif) {
                warn!("motif {} appears more than once; keeping the first row", motif);
                continue;
            }
            motif_row.insert(motif.clone(), row);
        }

        Ok(Self {
            genes,
            motifs,
            motif_row,
            ranks,
        })
    }

    pub fn n_motifs(&self) -> usize {
        self.motifs.len()
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn has_motif(&self, motif: &str) -> bool {
        self.motif_row.contains_key(motif)
    }

    fn row(&self, row: usize) -> &[f64] {
        let n = self.genes.len();
        &self.ranks[row * n..(row + 1) * n]
    }
}

impl RankingSource for RankingCatalog {
    fn names_for_motif(&self, motif: &str) -> Result<Vec<&str>, CatalogError> {
        let row = *self
            .motif_row
            .get(motif)
            .ok_or_else(|| CatalogError::MotifNotFound {
                motif: motif.to_string(),
            })?;
        let ranks = self.row(row);
        let mut order: Vec<usize> = (0..self.genes.len()).collect();
        // stable: equal ranks keep column order
        order.sort_by(|&a, &b| ranks[a].total_cmp(&ranks[b]));
        Ok(order.into_iter().map(|j| self.genes[j].as_str()).collect())
    }

    fn all_names(&self) -> Vec<&str> {
        self.genes.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
