use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wardrive")]
#[command(about = "Process wardriving captures into a consolidated GeoJSON map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory containing capture CSV files
    #[arg(long, default_value = "~/.wardrive/captures", global = true)]
    pub data_dir: String,

    /// Config file path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and write the GeoJSON document
    Build {
        /// Output file (default: <data-dir>/wardrive.geojson)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Cached IEEE OUI registry CSV for vendor lookups
        #[arg(long)]
        oui: Option<PathBuf>,

        /// Skip the deterministic marker offset for co-located APs
        #[arg(long)]
        no_jitter: bool,

        /// Print per-file progress
        #[arg(long, short)]
        verbose: bool,
    },

    /// Inspect capture sessions
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Validate one capture file and report row-level problems
    Check {
        /// Capture file to validate
        file_path: PathBuf,
    },

    /// Vendor directory utilities
    Vendor {
        #[command(subcommand)]
        command: VendorCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Parse captures and list per-session summaries
    List,
}

#[derive(Subcommand)]
pub enum VendorCommand {
    /// Resolve a single MAC address to its manufacturer
    Lookup {
        /// MAC address in any common notation
        mac: String,

        /// Cached IEEE OUI registry CSV
        #[arg(long)]
        oui: Option<PathBuf>,
    },
}
