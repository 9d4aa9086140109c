//! # CLI Commands
//!
//! clap surface of the maglaunch binary. Two commands: print the
//! parameter form, and run the two-step launch sequence.

use crate::dispatcher::{DISPATCHER_URL, EXECUTION_TOKEN_VAR};
use crate::error::LaunchError;
use crate::runtime::{self, HOME_DIR, LaunchContext, SHARED_DIR};
use crate::upload::{DATA_SERVICE_URL, resolve_execution_name};
use clap::{Parser, Subcommand};
use maglaunch_core::{ParamValue, RUNNER_PATH, build_command, magmap_registry, render_form, render_text};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Launcher for the nf-core/magmap pipeline.
#[derive(Parser)]
#[command(name = "maglaunch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the pipeline's input parameters
    Params {
        /// Emit the form as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Provision storage and run the pipeline
    Run {
        /// JSON file of parameter values keyed by name
        #[arg(long)]
        params: PathBuf,
        /// Shared working directory
        #[arg(long, default_value = SHARED_DIR)]
        shared_dir: PathBuf,
        /// Directory staged into the shared dir
        #[arg(long, default_value = HOME_DIR)]
        home_dir: PathBuf,
        /// Pipeline runner executable
        #[arg(long, default_value = RUNNER_PATH)]
        runner: PathBuf,
        /// Storage dispatcher endpoint
        #[arg(long, default_value = DISPATCHER_URL)]
        dispatcher_url: String,
        /// Data service endpoint for the log upload
        #[arg(long, default_value = DATA_SERVICE_URL)]
        data_url: String,
        /// Print the derived command line and exit
        #[arg(long)]
        dry_run: bool,
    },
}

/// Options for [`cmd_run`], mirroring the `run` subcommand's flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub params_file: PathBuf,
    pub shared_dir: PathBuf,
    pub home_dir: PathBuf,
    pub runner: PathBuf,
    pub dispatcher_url: String,
    pub data_url: String,
    pub dry_run: bool,
}

/// Print the parameter form.
pub fn cmd_params(json: bool) -> Result<(), LaunchError> {
    let registry = magmap_registry()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&render_form(&registry))?);
    } else {
        print!("{}", render_text(&registry));
    }
    Ok(())
}

/// Validate the supplied parameters and execute the launch sequence.
pub async fn cmd_run(opts: RunOptions) -> Result<(), LaunchError> {
    let registry = magmap_registry()?;
    let supplied: BTreeMap<String, ParamValue> =
        serde_json::from_str(&fs::read_to_string(&opts.params_file)?)?;
    let resolved = registry.resolve(&supplied)?;

    if opts.dry_run {
        let cmd = build_command(&opts.runner, &opts.shared_dir, &resolved);
        println!("{}", cmd.join(" "));
        return Ok(());
    }

    let token =
        env::var(EXECUTION_TOKEN_VAR).map_err(|_| LaunchError::MissingToken(EXECUTION_TOKEN_VAR))?;
    let ctx = LaunchContext {
        runner: opts.runner,
        home_dir: opts.home_dir,
        shared_dir: opts.shared_dir,
        dispatcher_url: opts.dispatcher_url,
        data_url: opts.data_url,
        token,
        execution_name: resolve_execution_name(),
    };
    runtime::launch(&ctx, &resolved).await
}
