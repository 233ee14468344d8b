mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("etflens=warn")),
        )
        .with_target(false)
        .init();

    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let reports = commands::run(&cli).await?;
    output::render(&reports, cli.format, cli.pretty)
}
