//! Kerbcast, a street-parking occupancy forecaster.
//!
//! Subcommands:
//! - `train`: event log → trained model artifact (model + feature order)
//! - `intervals`: event log → state-interval report CSV

use clap::{Args, Parser, Subcommand};
use kc_bundle::ArtifactWriter;
use kc_common::{Error, ErrorCategory};
use kc_config::PipelineConfig;
use kc_core::logging::init_logging;
use kc_core::{ingest, intervals, pipeline};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{error, info};

/// Kerbcast - short-horizon street parking occupancy forecasting
#[derive(Parser)]
#[command(name = "kerbcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Pipeline configuration file (JSON); defaults apply when omitted
    #[arg(long, global = true, env = "KERBCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the occupancy model and publish the artifact pair
    Train(TrainArgs),

    /// Reconstruct per-bay state intervals and write the report CSV
    Intervals(IntervalsArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Event log CSV (kerbsideid, status, status_timestamp)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Artifact directory to publish (model.bin, features.txt, manifest.json)
    #[arg(long, short = 'o', default_value = "models/parking_model")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct IntervalsArgs {
    /// Event log CSV (kerbsideid, status, status_timestamp)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Report path; stdout when omitted
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match load_config(&cli.global) {
        Ok(config) => match cli.command {
            Commands::Train(args) => run_train(&args, &config),
            Commands::Intervals(args) => run_intervals(&args),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!(category = %e.category(), "{}", e);
        std::process::exit(exit_code(&e));
    }
}

fn load_config(global: &GlobalOpts) -> Result<PipelineConfig, Error> {
    match &global.config {
        Some(path) => PipelineConfig::load(path),
        None => Ok(PipelineConfig::default()),
    }
}

fn run_train(args: &TrainArgs, config: &PipelineConfig) -> Result<(), Error> {
    let file = File::open(&args.input)
        .map_err(|e| Error::Ingest(format!("cannot open {}: {}", args.input.display(), e)))?;
    let outcome = pipeline::train_from_reader(BufReader::new(file), config)?;

    let model_bytes = outcome.model.to_bytes()?;
    let writer = ArtifactWriter::new(
        model_bytes,
        outcome.model.feature_names().to_vec(),
        outcome.model.target_name(),
        outcome.row_count,
    );
    let published = writer.publish(&args.out)?;

    info!(
        artifact = %published.display(),
        rows = outcome.row_count,
        samples = outcome.sample_count,
        dropped = outcome.ingest.rows_dropped(),
        "Training run finished"
    );
    Ok(())
}

fn run_intervals(args: &IntervalsArgs) -> Result<(), Error> {
    let file = File::open(&args.input)
        .map_err(|e| Error::Ingest(format!("cannot open {}: {}", args.input.display(), e)))?;
    let (events, _) = ingest::read_events(BufReader::new(file))?;
    let table = intervals::reconstruct(&events);

    match &args.out {
        Some(path) => {
            let out = File::create(path)?;
            intervals::write_csv(&table, out)?;
            info!(intervals = table.len(), report = %path.display(), "Interval report written");
        }
        None => {
            intervals::write_csv(&table, std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn exit_code(e: &Error) -> i32 {
    match e.category() {
        ErrorCategory::Config => 2,
        ErrorCategory::Ingest => 3,
        ErrorCategory::Training => 4,
        ErrorCategory::Artifact => 5,
        ErrorCategory::Io => 1,
    }
}
