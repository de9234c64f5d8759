use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-roiqc",
    version,
    about = "Quality analysis of ROI timeseries and motion confounds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[arg(long, num_args = 1.., required = true, help = "Timeseries TSV files (repeatable)")]
    pub timeseries: Vec<PathBuf>,

    #[arg(
        long,
        num_args = 1..,
        required = true,
        help = "Confounds TSV files, in the same order as --timeseries"
    )]
    pub confounds: Vec<PathBuf>,

    #[arg(long, help = "ROI coordinate TSV with x/y/z columns")]
    pub coords: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub scans: ScanArgs,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false, help = "Only emit group-level report entries")]
    pub group_only: bool,

    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of worker threads (1 = serial)"
    )]
    pub threads: u64,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    #[arg(long, default_value_t = false, help = "Also write roiqc.json")]
    pub json: bool,

    #[arg(long, default_value_t = 0.2, help = "Framewise displacement spike threshold")]
    pub fd_threshold: f64,

    #[arg(long, default_value_t = 100, help = "Louvain iterations per modularity estimate")]
    pub iterations: usize,

    #[arg(long, help = "Seed for reproducible modularity estimates")]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub scans: ScanArgs,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
