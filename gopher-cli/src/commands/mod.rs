//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod search;

use job::{PollArgs, SubmitArgs};

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search twitter: submit a query and wait for its results
    Search {
        /// Search terms
        query: String,

        /// Print the raw JSON output
        #[arg(long)]
        json: bool,
    },
    /// Submit a job and print its id without waiting
    Submit(SubmitArgs),
    /// Wait for the result of a previously submitted job
    Poll(PollArgs),
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Search { query, json } => search::run_search(&query, json, config).await,
        Commands::Submit(args) => job::submit_job(args, config).await,
        Commands::Poll(args) => job::poll_job(args, config).await,
    }
}
