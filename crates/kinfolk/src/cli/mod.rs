pub mod extract;
pub mod ingest;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use kinfolk_core::{IngestConfig, RecordWarning};

#[derive(Parser)]
#[command(
    name = "kin",
    about = "Extract person records from family-history pages",
    version
)]
pub struct Cli {
    /// Ingest settings as JSON (page suffixes, group tags)
    #[arg(long, global = true, env = "KINFOLK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the records on one page as JSON
    Extract {
        /// Page file to read
        page: PathBuf,
    },
    /// Read every page in a directory into the database
    Ingest {
        /// Directory holding the pages
        dir: PathBuf,
        /// SQLite database path
        #[arg(long, env = "KINFOLK_DB", default_value = "kinfolk.db")]
        db: String,
    },
    /// List stored records by last name
    List {
        /// SQLite database path
        #[arg(long, env = "KINFOLK_DB", default_value = "kinfolk.db")]
        db: String,
        /// Only records whose names match this full-text query
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of one line per record
        #[arg(long)]
        json: bool,
    },
}

pub async fn load_config(path: Option<&Path>) -> Result<IngestConfig> {
    match path {
        Some(path) => IngestConfig::load(path)
            .await
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(IngestConfig::default()),
    }
}

pub(crate) fn print_warnings(page: &str, warnings: &[RecordWarning]) {
    for w in warnings {
        eprintln!(
            "{} {page} {}: {}",
            style("warning").yellow().bold(),
            w.record,
            w.warning
        );
    }
}
