mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = dispatch(cli).await {
        error::handle_error(err);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Completions { shell } => {
            completions::generate_completions(shell);
            Ok(())
        }
        Commands::Describe(args) => commands::describe::run(args, format),
        Commands::Resolve(args) => commands::resolve::run(args, format),
        Commands::Run(args) => {
            let credentials = config::CliConfig::load().credentials(cli.url, cli.api_key)?;
            commands::run::run(args, credentials, format).await
        }
        Commands::Test => {
            let credentials = config::CliConfig::load().credentials(cli.url, cli.api_key)?;
            commands::test::run(credentials, format).await
        }
    }
}
