use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub mod counts;
pub mod ground_truth;
pub mod id_list;
pub mod reader;
pub mod tf_table;
pub mod vocab;

use crate::model::{GeneId, LigandReceptorRecord, RegulatoryRecord, TfBinding};
use counts::{noise_ids_from_axis, read_gene_axis};
use ground_truth::{load_ligand_receptor, load_regulatory};
use id_list::parse_id_list;
use tf_table::load_tf_table;
use vocab::{LrVocabulary, load_lr_vocabulary};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("parquet error in {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },
    #[error("arrow error in {}: {source}", path.display())]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },
    #[error(transparent)]
    Catalog(#[from] crate::catalog::CatalogError),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl InputError {
    pub(crate) fn csv(path: &Path) -> impl FnOnce(csv::Error) -> InputError + '_ {
        move |source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where noise identifiers come from.
#[derive(Debug, Clone)]
pub enum NoiseSource {
    IdList(PathBuf),
    Counts(PathBuf),
    None,
}

#[derive(Debug, Clone)]
pub struct InputPaths {
    pub tfs: PathBuf,
    pub grn: PathBuf,
    pub lr: Option<PathBuf>,
    pub lr_vocab: Option<PathBuf>,
    pub noise: NoiseSource,
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub tfs: Vec<TfBinding>,
    pub regulatory: Vec<RegulatoryRecord>,
    pub ligand_receptor: Vec<LigandReceptorRecord>,
    pub vocabulary: Option<LrVocabulary>,
    pub noise_ids: Vec<GeneId>,
}

pub fn load_inputs(paths: &InputPaths) -> Result<InputBundle, InputError> {
    let tfs = load_tf_table(&paths.tfs)?;
    let regulatory = load_regulatory(&paths.grn)?;
    info!(
        "loaded {} transcription factors and {} regulatory records",
        tfs.len(),
        regulatory.len()
    );

    let ligand_receptor = match &paths.lr {
        Some(path) => load_ligand_receptor(path)?,
        None => Vec::new(),
    };
    let vocabulary = match &paths.lr_vocab {
        Some(path) => Some(load_lr_vocabulary(path)?),
        None => None,
    };
    if !ligand_receptor.is_empty() {
        info!("loaded {} ligand-receptor pairs", ligand_receptor.len());
    }

    let noise_ids = match &paths.noise {
        NoiseSource::IdList(path) => parse_id_list(path)?,
        NoiseSource::Counts(path) => {
            let axis = read_gene_axis(path)?;
            let noise = noise_ids_from_axis(&axis);
            debug!(
                "counts gene axis has {} identifiers, {} recognised as noise",
                axis.len(),
                noise.len()
            );
            noise
        }
        NoiseSource::None => Vec::new(),
    };

    Ok(InputBundle {
        tfs,
        regulatory,
        ligand_receptor,
        vocabulary,
        noise_ids,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
