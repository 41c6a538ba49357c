mod catalog;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::CatalogError;
use crate::catalog::loader::load_catalog;
use crate::input::{InputError, InputPaths, NoiseSource, load_inputs};
use crate::pipeline::rename::{RenameError, rename_counts};
use crate::pipeline::stage5_write::write_outputs;
use crate::pipeline::{NamingError, NamingInputs, NamingOptions, assign_gene_names};
use crate::report::table::read_name_table;
use crate::report::{OutputError, RunInfo};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Rename(#[from] RenameError),
}

#[derive(Debug, Parser)]
#[command(
    name = "spagrn-namer",
    version,
    about = "Map simulated spatial GRN gene identifiers to real gene names"
)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the identifier -> name table
    Assign(AssignArgs),
    /// Rename the gene axis of a counts table using an identifier -> name table
    Rename(RenameArgs),
}

#[derive(Debug, Clone, Args)]
struct AssignArgs {
    /// TF table with `id,name,motif` columns
    #[arg(long)]
    tfs: PathBuf,

    /// regulatory ground truth (`regulator.gene,regulated.gene,regulator.effect`)
    #[arg(long)]
    grn: PathBuf,

    /// motif x gene ranking database (.parquet, .csv or .tsv)
    #[arg(long)]
    rankings: PathBuf,

    /// ligand-receptor ground truth (`ligand,receptor`)
    #[arg(long)]
    lr: Option<PathBuf>,

    /// ligand-receptor network supplying ligand (`from`) and receptor (`to`) names
    #[arg(long)]
    lr_vocab: Option<PathBuf>,

    /// noise gene identifiers, one per line
    #[arg(long, conflicts_with = "counts")]
    noise_ids: Option<PathBuf>,

    /// genes x cells counts table; ids containing "gene" are taken as noise
    #[arg(long)]
    counts: Option<PathBuf>,

    /// random seed for noise/ligand/receptor sampling
    #[arg(long)]
    seed: Option<u64>,

    /// fail when a motif runs out of names for its TF's targets
    #[arg(long, default_value_t = false)]
    strict_targets: bool,

    /// output directory
    #[arg(long, short)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct RenameArgs {
    /// genes x cells counts table
    #[arg(long)]
    counts: PathBuf,

    /// `id,name` table written by `assign`
    #[arg(long)]
    names: PathBuf,

    /// renamed counts table
    #[arg(long, short)]
    out: PathBuf,
}

impl AssignArgs {
    fn input_paths(&self) -> InputPaths {
        let noise = match (&self.noise_ids, &self.counts) {
            (Some(path), _) => NoiseSource::IdList(path.clone()),
            (None, Some(path)) => NoiseSource::Counts(path.clone()),
            (None, None) => NoiseSource::None,
        };
        InputPaths {
            tfs: self.tfs.clone(),
            grn: self.grn.clone(),
            lr: self.lr.clone(),
            lr_vocab: self.lr_vocab.clone(),
            noise,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Assign(args) => run_assign(&args),
        Command::Rename(args) => run_rename(&args),
    }
}

fn run_assign(args: &AssignArgs) -> Result<(), AppError> {
    let bundle = load_inputs(&args.input_paths())?;
    let catalog = load_catalog(&args.rankings)?;
    let unknown: Vec<&str> = bundle
        .tfs
        .iter()
        .filter(|tf| !catalog.has_motif(&tf.motif))
        .map(|tf| tf.motif.as_str())
        .collect();
    if let Some(first) = unknown.first() {
        warn!(
            "{} TF motifs missing from the ranking catalog: {}",
            unknown.len(),
            unknown.join(", ")
        );
        return Err(NamingError::from(CatalogError::MotifNotFound {
            motif: first.to_string(),
        })
        .into());
    }

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    if args.seed.is_none() {
        info!("no --seed given; sampling with seed {}", seed);
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let inputs = NamingInputs {
        tfs: &bundle.tfs,
        regulatory: &bundle.regulatory,
        ligand_receptor: &bundle.ligand_receptor,
        noise_ids: &bundle.noise_ids,
        vocabulary: bundle.vocabulary.as_ref(),
    };
    let options = NamingOptions {
        strict_targets: args.strict_targets,
    };
    let outcome = assign_gene_names(&inputs, &catalog, options, &mut rng)?;
    if outcome.table.is_empty() {
        warn!("no identifiers were named");
    }
    if !outcome.missing.is_empty() {
        warn!(
            "{} identifiers left without a name; see the summary for the list",
            outcome.missing.len()
        );
    }

    let run = RunInfo {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        seed,
        strict_targets: args.strict_targets,
        rankings: args.rankings.display().to_string(),
    };
    let written = write_outputs(&outcome, run, &args.out)?;
    info!(
        "names in {}, summary in {}, report in {}",
        written.names.display(),
        written.summary.display(),
        written.report.display()
    );
    Ok(())
}

fn run_rename(args: &RenameArgs) -> Result<(), AppError> {
    let names = read_name_table(&args.names)?;
    let stats = rename_counts(&args.counts, &names, &args.out)?;
    if stats.n_genes == 0 {
        warn!("{} has no gene rows", args.counts.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
