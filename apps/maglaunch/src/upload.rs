//! # Log Upload
//!
//! After the runner exits (success or failure), its log file is pushed
//! to remote storage keyed by the current execution's name. No
//! resolvable name means the upload is skipped with a warning; it is
//! the one condition in the launch sequence that is reported rather
//! than raised.

use crate::dispatcher::auth_headers;
use crate::error::LaunchError;
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed in-cluster endpoint of the data service.
pub const DATA_SERVICE_URL: &str = "http://nf-data-service.flyte.svc.cluster.local";

/// Environment variable carrying the human-readable execution name.
pub const EXECUTION_NAME_VAR: &str = "FLYTE_INTERNAL_EXECUTION_NAME";

/// Remote prefix under which this workflow's logs are kept.
const REMOTE_LOG_PREFIX: &str = "ldata/maglaunch";

/// Resolve the current execution's name, if any.
#[must_use]
pub fn resolve_execution_name() -> Option<String> {
    env::var(EXECUTION_NAME_VAR).ok().filter(|n| !n.is_empty())
}

/// Join URL segments with exactly one slash between each.
#[must_use]
pub fn urljoin(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment.trim_matches('/'));
    }
    url
}

/// Upload the runner's log file, keyed by the execution name.
///
/// Does nothing if the log file does not exist. Skips (with a warning)
/// if no execution name is available — that alone is never an error.
///
/// # Errors
///
/// [`LaunchError::Http`] if the upload request itself fails.
pub async fn upload_log(
    data_url: &str,
    token: &str,
    execution_name: Option<&str>,
    log_path: &Path,
) -> Result<(), LaunchError> {
    if !log_path.exists() {
        return Ok(());
    }
    let Some(name) = execution_name else {
        warn!("skipping log upload, failed to resolve execution name");
        return Ok(());
    };

    let remote = urljoin(data_url, &[REMOTE_LOG_PREFIX, name, "nextflow.log"]);
    info!(remote = %remote, "uploading {}", log_path.display());

    let contents = std::fs::read(log_path)?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .default_headers(auth_headers(token)?)
        .build()?;
    client
        .put(&remote)
        .body(contents)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
