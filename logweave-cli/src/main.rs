//! logweave CLI -- renderer configuration checks and render previews

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Command output goes to stdout; logs go to stderr.
    let general = logging::resolve_general(&cli.config, cli.log_level.as_deref()).await;

    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match &cli.command {
        Commands::Check => commands::check::execute(&cli.config, &writer).await,
        Commands::Render(args) => commands::render::execute(args, &cli.config, &writer).await,
    }
}
