use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_roiqc::cli::{Cli, Commands};
use kira_roiqc::ctx::Ctx;
use kira_roiqc::io;
use kira_roiqc::pipeline::Pipeline;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = match &cli.command {
        Commands::Run(args) => args.verbose,
        Commands::Validate(args) => args.verbose,
    };
    init_tracing(verbose);

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = Ctx::new(
                args.scans.timeseries,
                args.scans.confounds,
                args.scans.coords,
                args.out,
                args.group_only,
                args.threads as usize,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.write_json = args.json;
            ctx.spike_threshold = args.fd_threshold;
            ctx.iterations = args.iterations;
            ctx.seed = args.seed;

            Pipeline::quality_analysis().run(&mut ctx)?;
            print!("{}", io::summary::format_summary(&ctx));
            print_warnings(&ctx);
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.scans.timeseries,
                args.scans.confounds,
                args.scans.coords,
                PathBuf::from("."),
                false,
                1,
                env!("CARGO_PKG_VERSION"),
            );
            Pipeline::validate().run(&mut ctx)?;
            println!("kira-roiqc validate ok");
            println!("scans: {}", ctx.scans.len());
            print_warnings(&ctx);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
