// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "redeploy")]
#[command(about = "Redeploy a service on a remote host over SSH")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON-lines events instead of human output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new redeploy.yml configuration file
    Init {
        /// Service name to write into the template
        #[arg(short, long)]
        service: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the rendered step sequence without connecting
    Plan,

    /// Run the deployment
    Run,
}
