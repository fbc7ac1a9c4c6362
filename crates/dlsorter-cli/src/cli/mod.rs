//! CLI for the DLSorter download sorter.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dlsorter_core::config;
use dlsorter_core::rules::RuleStore;

use commands::{
    run_add, run_completions, run_edit, run_list, run_move, run_remove, run_test, run_toggle,
    run_watch,
};

/// Top-level CLI for the DLSorter download sorter.
#[derive(Debug, Parser)]
#[command(name = "dlsorter")]
#[command(about = "DLSorter: rule-driven download sorting and redirecting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List all rules in evaluation order.
    List,

    /// Add a new rule.
    Add {
        /// Destination template, e.g. "/dl/${YYYY}/$1/".
        dir: String,
        /// Regex matched against the download URL or referrer.
        #[arg(long, default_value = "")]
        pattern: String,
        /// Regex matched against the bare filename.
        #[arg(long, default_value = "")]
        file_pattern: String,
        /// Create the rule disabled.
        #[arg(long)]
        disabled: bool,
        /// Insert at this 0-based position instead of appending.
        #[arg(long, value_name = "INDEX")]
        at: Option<usize>,
    },

    /// Edit a rule's patterns or destination by its ID.
    Edit {
        /// Rule identifier (unique prefix accepted).
        id: String,
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        file_pattern: Option<String>,
        #[arg(long)]
        dir: Option<String>,
    },

    /// Delete a rule by its ID.
    Remove {
        /// Rule identifier (unique prefix accepted).
        id: String,
    },

    /// Enable or disable a rule by its ID.
    Toggle {
        /// Rule identifier (unique prefix accepted).
        id: String,
    },

    /// Move a rule to a new position in the list.
    Move {
        /// Rule identifier (unique prefix accepted).
        id: String,
        /// New 0-based position (clamped to the end).
        index: usize,
    },

    /// Dry-run a download descriptor against the rules; prints the decision.
    Test {
        /// Download URL.
        url: String,
        /// Referrer of the page that started the download.
        #[arg(long, default_value = "")]
        referrer: String,
        /// Full destination path as the download service would choose it.
        /// Defaults to the last URL path segment.
        #[arg(long)]
        filename: Option<String>,
    },

    /// Read download-created events as JSON lines and intercept each one.
    Watch {
        /// Event source: a file path, or "-" for stdin.
        #[arg(long, default_value = "-")]
        input: String,
        /// Journal file recording cancel/erase/create decisions.
        #[arg(long, value_name = "PATH")]
        journal: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = match &cfg.rules_path {
            Some(path) => RuleStore::open(path.clone())?,
            None => RuleStore::open_default()?,
        };
        let store = Arc::new(store);

        match cli.command {
            CliCommand::List => run_list(&store).await?,
            CliCommand::Add {
                dir,
                pattern,
                file_pattern,
                disabled,
                at,
            } => run_add(&store, &dir, &pattern, &file_pattern, disabled, at).await?,
            CliCommand::Edit {
                id,
                pattern,
                file_pattern,
                dir,
            } => run_edit(&store, &id, pattern, file_pattern, dir).await?,
            CliCommand::Remove { id } => run_remove(&store, &id).await?,
            CliCommand::Toggle { id } => run_toggle(&store, &id).await?,
            CliCommand::Move { id, index } => run_move(&store, &id, index).await?,
            CliCommand::Test {
                url,
                referrer,
                filename,
            } => run_test(&store, &url, &referrer, filename.as_deref()).await?,
            CliCommand::Watch { input, journal } => {
                run_watch(store, &cfg, &input, journal).await?;
            }
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
