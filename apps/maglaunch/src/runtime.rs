//! # Pipeline Runtime
//!
//! The launch sequence itself: provision the shared storage volume,
//! stage the working directory, run the pipeline subprocess, and always
//! attempt the log upload afterwards — whether the run succeeded or
//! not. The run's own failure takes precedence over an upload failure.

use crate::dispatcher::{DispatcherClient, STORAGE_GIB};
use crate::error::LaunchError;
use crate::upload::upload_log;
use maglaunch_core::{build_command, ParamDecl, ParamValue};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shared working directory the staged tree is copied into.
pub const SHARED_DIR: &str = "/nf-workdir";

/// Home directory of the task container, the source of the staged tree.
pub const HOME_DIR: &str = "/root";

/// Log file the runner writes, relative to the shared dir.
pub const LOG_FILE: &str = ".nextflow.log";

/// Directory names never copied into the shared dir, at any depth.
pub const IGNORE_LIST: [&str; 9] = [
    "latch",
    ".latch",
    "nextflow",
    ".nextflow",
    "work",
    "results",
    "miniconda",
    "anaconda3",
    "mambaforge",
];

/// Runner environment: home directory override.
const NXF_HOME: (&str, &str) = ("NXF_HOME", "/root/.nextflow");

/// Runner environment: JVM heap and processor-count tuning.
const NXF_OPTS: (&str, &str) = ("NXF_OPTS", "-Xms2048M -Xmx8G -XX:ActiveProcessorCount=4");

/// Runner environment: storage claim to mount.
const STORAGE_CLAIM_VAR: &str = "K8S_STORAGE_CLAIM_NAME";

/// Runner environment: disable the runner's update check.
const DISABLE_CHECK_LATEST: (&str, &str) = ("NXF_DISABLE_CHECK_LATEST", "true");

/// Everything the launch sequence needs beyond the parameters.
///
/// Paths and endpoints default to the fixed production values but are
/// injectable so tests can point them at temp dirs and mock servers.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    /// Path of the pipeline runner executable.
    pub runner: PathBuf,
    /// Source of the staged tree.
    pub home_dir: PathBuf,
    /// Shared working directory.
    pub shared_dir: PathBuf,
    /// Storage dispatcher endpoint.
    pub dispatcher_url: String,
    /// Data service endpoint for the log upload.
    pub data_url: String,
    /// Execution token for platform auth.
    pub token: String,
    /// Execution name keying the log upload, if resolvable.
    pub execution_name: Option<String>,
}

/// Stage the shared working directory.
///
/// Recursively copies `home` into `shared`, skipping [`IGNORE_LIST`]
/// names at every depth, merging into an existing tree, and skipping
/// dangling symlinks.
pub fn stage_workdir(home: &Path, shared: &Path) -> io::Result<()> {
    fs::create_dir_all(shared)?;
    copy_tree(home, shared)
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        if IGNORE_LIST.iter().any(|ig| name.as_os_str() == OsStr::new(ig)) {
            continue;
        }
        let src_path = entry.path();
        let dst_path = dst.join(&name);
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_tree(&src_path, &dst_path)?;
        } else if file_type.is_symlink() {
            // fs::metadata follows the link; a dangling one is skipped
            match fs::metadata(&src_path) {
                Ok(meta) if meta.is_dir() => {
                    fs::create_dir_all(&dst_path)?;
                    copy_tree(&src_path, &dst_path)?;
                }
                Ok(_) => {
                    fs::copy(&src_path, &dst_path)?;
                }
                Err(_) => {
                    debug!("skipping dangling symlink {}", src_path.display());
                }
            }
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Run the pipeline subprocess to completion.
///
/// The calling task blocks until the runner exits. Non-zero exit is
/// fatal; whatever parallelism the pipeline uses internally is opaque
/// here.
pub async fn run_pipeline(
    ctx: &LaunchContext,
    cmd: &[String],
    claim: &str,
) -> Result<(), LaunchError> {
    let (program, args) = cmd.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty pipeline command line")
    })?;
    info!("launching pipeline runtime");
    info!("{}", cmd.join(" "));

    let status = tokio::process::Command::new(program)
        .args(args)
        .env(NXF_HOME.0, NXF_HOME.1)
        .env(NXF_OPTS.0, NXF_OPTS.1)
        .env(STORAGE_CLAIM_VAR, claim)
        .env(DISABLE_CHECK_LATEST.0, DISABLE_CHECK_LATEST.1)
        .current_dir(&ctx.shared_dir)
        .status()
        .await?;

    if status.success() {
        Ok(())
    } else {
        Err(LaunchError::PipelineFailed { status })
    }
}

/// Execute the full two-step launch sequence.
///
/// Provision, stage, run, then always attempt the log upload. An upload
/// failure is surfaced only when the run itself succeeded; a failed run
/// is what the caller hears about.
pub async fn launch(
    ctx: &LaunchContext,
    resolved: &[(&ParamDecl, ParamValue)],
) -> Result<(), LaunchError> {
    let client = DispatcherClient::new(&ctx.dispatcher_url, &ctx.token)?;
    info!("provisioning shared storage volume");
    let claim = client.provision_storage(STORAGE_GIB).await?;
    info!(claim = %claim, "storage volume provisioned");

    stage_workdir(&ctx.home_dir, &ctx.shared_dir)?;
    let cmd = build_command(&ctx.runner, &ctx.shared_dir, resolved);

    let run_result = run_pipeline(ctx, &cmd, &claim).await;

    let log_path = ctx.shared_dir.join(LOG_FILE);
    let upload_result = upload_log(
        &ctx.data_url,
        &ctx.token,
        ctx.execution_name.as_deref(),
        &log_path,
    )
    .await;

    match (run_result, upload_result) {
        (Err(run_err), Err(upload_err)) => {
            warn!("log upload failed after pipeline failure: {upload_err}");
            Err(run_err)
        }
        (Err(run_err), Ok(())) => Err(run_err),
        (Ok(()), Err(upload_err)) => Err(upload_err),
        (Ok(()), Ok(())) => Ok(()),
    }
}
