use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::raid::collector::{DEFAULT_TIMEOUT_SECS, DEFAULT_TOOL};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "array-inventory")]
#[command(about = "Inventory Smart Array RAID controllers for ETL feeds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ARRAY_INVENTORY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "ARRAY_INVENTORY_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// RAID controller, logical drive and physical drive inventory
    #[command(subcommand)]
    Raid(RaidCommands),
}

/// Where the controller configuration text comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to the hpacucli binary
    #[arg(long, env = "ARRAY_INVENTORY_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Seconds to wait for the tool before giving up
    #[arg(long, env = "ARRAY_INVENTORY_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Parse captured tool output from a file instead (`-` for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum RaidCommands {
    /// Show the parsed controller snapshot
    Show {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print flattened rows as CSV
    Csv {
        /// Host name for the first column (default: this host)
        #[arg(short, long = "box")]
        box_name: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Post the controller report to an inventory API
    PostInventory {
        /// Inventory API base URL
        #[arg(short, long, env = "ARRAY_INVENTORY_URL", default_value = "http://localhost:6183")]
        url: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}
