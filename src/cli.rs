use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Provisioner - ordered, idempotent contract deployment
#[derive(Parser, Debug)]
#[command(name = "provisioner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./provisioner.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy every unit of the plan that is not yet recorded
    Deploy {
        /// Target network (default: config `default_network`)
        #[arg(short, long)]
        network: Option<String>,

        /// Redeploy units that are already recorded
        #[arg(short, long)]
        force: bool,

        /// Dry run - show what would be deployed
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what the manifest records for each unit
    Status {
        /// Network to report on
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Write recorded contract addresses into a dotenv file
    ExportEnv {
        /// Network whose addresses are exported
        #[arg(short, long)]
        network: Option<String>,

        /// Dotenv file to update (default: config `paths.env_file`)
        #[arg(long)]
        env_file: Option<PathBuf>,
    },

    /// Copy each unit's build artifact (ABI and bytecode) for applications
    ExportAbis {
        /// Destination directory (default: config `paths.abis`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Deploy { .. } => "deploy",
            Commands::Status { .. } => "status",
            Commands::ExportEnv { .. } => "export-env",
            Commands::ExportAbis { .. } => "export-abis",
        }
    }
}
