//! Provisioner CLI - ordered, idempotent contract deployment
//!
//! Usage: provisioner <COMMAND>
//!
//! Commands:
//!   deploy      Deploy every unit of the plan that is not yet recorded
//!   status      Show what the manifest records for each unit
//!   export-env  Write recorded contract addresses into a dotenv file
//!   export-abis Copy build artifacts (ABIs) for applications

mod cli;
mod commands;
mod logging;
mod ui;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "could not install Ctrl+C handler");
        }
    }

    match run(&cli, interrupted) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::output::print_error(&err, cli.command.name(), cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, interrupted: Arc<AtomicBool>) -> Result<()> {
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Deploy {
            network,
            force,
            dry_run,
        } => commands::deploy::cmd_deploy(
            config,
            network.as_deref(),
            *force,
            *dry_run,
            cli.json,
            interrupted,
        ),
        Commands::Status { network } => {
            commands::status::cmd_status(config, network.as_deref(), cli.json)
        }
        Commands::ExportEnv { network, env_file } => commands::export_env::cmd_export_env(
            config,
            network.as_deref(),
            env_file.as_deref(),
            cli.json,
        ),
        Commands::ExportAbis { out } => {
            commands::export_abis::cmd_export_abis(config, out.as_deref(), cli.json)
        }
    }
}
