//! # Repository List CLI
//!
//! This is the binary entry point for the `repolist` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and terminal styling from the global flags.
//! - Executing the appropriate command and reporting its errors.
//!
//! Planning logic lives in the `repolist` library crate; the binary is a thin
//! front end that renders the planner's rows as text or JSON.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
