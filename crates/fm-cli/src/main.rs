//! Foreman CLI - inspect and manage builders, masters, and projects

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{builders, init, masters, projects};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Init => init::execute(&cli.global).await,
        cli::Commands::Builders(args) => builders::execute(args, &cli.global).await,
        cli::Commands::Masters(args) => masters::execute(args, &cli.global).await,
        cli::Commands::Projects(args) => projects::execute(args, &cli.global).await,
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is warn.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
