// ABOUTME: Entry point for the redeploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use redeploy::config::{self, Config};
use redeploy::error::Result;
use redeploy::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    let result = run(cli, Output::new(mode)).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command {
        Commands::Init { service, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, service.as_deref(), force)
        }
        Commands::Plan => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;
            commands::plan(&config, &output)
        }
        Commands::Run => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;
            commands::run(config, output).await
        }
    }
}
