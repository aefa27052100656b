//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use repolist::output::{ColorChoice, OutputStyle};

/// repolist - Filtered, sectioned and paginated repository index views
#[derive(Parser, Debug)]
#[command(name = "repolist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_enum, value_name = "WHEN", default_value = "auto")]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one page of the repository index
    List(commands::list::ListArgs),

    /// Check a catalog file for problems
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// `--log-level` sets the baseline; `RUST_LOG` refines it when present.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None);
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let style = OutputStyle::resolve(self.color);

        match self.command {
            Commands::List(args) => commands::list::execute(args, style),
            Commands::Validate(args) => commands::validate::execute(args, style),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
