//! Command-line surface

use clap::{Args, Parser, Subcommand};
use cmsquery_core::ObjectType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cmsquery",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build (and run) bulk repository lookups, expanding folders to everything beneath them"
)]
pub struct Cli {
    /// Config file (default: $CMSQUERY_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which service to talk to.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Environment name from the config file
    #[arg(short, long, conflicts_with = "host")]
    pub env: Option<String>,

    /// Explicit base URL of the service
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the lookup query for a set of objects, optionally running it
    Lookup {
        #[command(flatten)]
        target: Target,

        /// Logon token (default: $CMSQUERY_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Object type: Reports, Connections, Universes or Folders
        #[arg(short = 't', long = "type", value_parser = parse_object_type)]
        object_type: ObjectType,

        /// Run the query and print the records as JSON
        #[arg(short = 'x', long)]
        execute: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Abort folder crawls deeper than this (overrides config)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Most parent folders per children query (overrides config)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Object CUIDs, space- or comma-separated
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// List folders and stage a selection of paths
    Browse {
        #[command(flatten)]
        target: Target,

        /// Folder path by names, e.g. Sales/Q1 (default: list top-level folders)
        #[arg(short, long)]
        path: Option<String>,

        /// Entry names in the opened folder to add to the selection
        #[arg(short, long, requires = "path")]
        select: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Show version
    Version,
}

fn parse_object_type(s: &str) -> Result<ObjectType, String> {
    s.parse().map_err(|e: cmsquery_core::Error| e.to_string())
}
