//! # Launch Errors
//!
//! Every fatal condition of the two-step launch sequence. There are no
//! retries and no recovery: errors propagate straight out of the
//! command that hit them. The single non-fatal condition (no resolvable
//! execution name for the log upload) is logged and skipped, so it has
//! no variant here.

use maglaunch_core::ParamError;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors from the launch sequence.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The execution token environment variable is not set. Raised
    /// before any network call.
    #[error("failed to get execution token: {0} is not set")]
    MissingToken(&'static str),

    /// The execution token cannot be carried in an HTTP header.
    #[error("execution token is not a valid header value: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// Parameter validation failed.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// An HTTP call failed (connection error or non-2xx status).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provisioning response carried no storage claim name.
    #[error("provisioning response is missing the storage claim name")]
    MalformedResponse,

    /// Filesystem or subprocess I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The pipeline subprocess exited unsuccessfully.
    #[error("pipeline process failed: {status}")]
    PipelineFailed {
        /// Exit status of the runner (carries the code, or the signal).
        status: ExitStatus,
    },
}
