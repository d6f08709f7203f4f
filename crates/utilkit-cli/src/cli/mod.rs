//! CLI for utilkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use utilkit_core::config::{self, UtilkitConfig};
use utilkit_core::db::Database;

use commands::{run_exec, run_headers, run_params, run_query, ExecMode};

/// Top-level CLI for utilkit.
#[derive(Debug, Parser)]
#[command(name = "utilkit")]
#[command(about = "utilkit: database helpers, retry executor and request-string formatters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a query against the configured database and print the rows.
    Query {
        /// SQL text.
        sql: String,
    },

    /// Execute a statement against the configured database and commit it.
    Exec {
        /// SQL text.
        sql: String,
        /// Retry once inline on any failure.
        #[arg(long)]
        retry_once: bool,
        /// Run the statement under the retry executor with up to N retries
        /// (delay from the `[retry]` config section).
        #[arg(long, value_name = "N")]
        retries: Option<u32>,
    },

    /// Turn a pasted `Key: Value` header block into a header list.
    Headers {
        /// File holding the header block; reads stdin when omitted.
        path: Option<String>,
    },

    /// Split a request URL into its base and decoded query parameters.
    Params {
        /// Request URL including the query string.
        url: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Query { sql } => {
                let (_, db) = open_database()?;
                run_query(&db, &sql)?;
            }
            CliCommand::Exec {
                sql,
                retry_once,
                retries,
            } => {
                let (cfg, db) = open_database()?;
                let mode = ExecMode {
                    retry_once,
                    retries,
                };
                run_exec(&db, &cfg.retry_or_default(), &sql, mode)?;
            }
            CliCommand::Headers { path } => run_headers(path.as_deref().map(Path::new))?,
            CliCommand::Params { url } => run_params(&url)?,
        }

        Ok(())
    }
}

/// Load config (creating the default file on first use) and build the
/// database helper from its `[database]` section.
fn open_database() -> Result<(UtilkitConfig, Database)> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg.database.backend);
    let db = Database::new(cfg.database.connection())?;
    Ok((cfg, db))
}

#[cfg(test)]
mod tests;
