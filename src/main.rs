//! grocer command-line entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grocer::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli)
}
