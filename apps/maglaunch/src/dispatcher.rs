//! # Dispatcher Client
//!
//! HTTP client for the platform's storage dispatcher. One call: ask for
//! a shared storage volume, get back the storage-claim name that the
//! runtime mounts for the run.

use crate::error::LaunchError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use std::time::Duration;

/// Fixed in-cluster endpoint of the storage dispatcher.
pub const DISPATCHER_URL: &str = "http://nf-dispatcher-service.flyte.svc.cluster.local";

/// Environment variable carrying the execution token.
pub const EXECUTION_TOKEN_VAR: &str = "FLYTE_INTERNAL_EXECUTION_ID";

/// Fixed size of the shared storage allocation, in GiB.
pub const STORAGE_GIB: u64 = 100;

/// Provisioning request body.
#[derive(Debug, Serialize)]
struct ProvisionRequest {
    storage_gib: u64,
}

/// Build the auth headers every platform call carries.
pub(crate) fn auth_headers(token: &str) -> Result<HeaderMap, LaunchError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Latch-Execution-Token {token}"))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// HTTP client for the storage dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherClient {
    base_url: String,
    client: reqwest::Client,
}

impl DispatcherClient {
    /// Create a client for the given dispatcher, authenticating every
    /// request with the execution token.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self, LaunchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(auth_headers(token)?)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Request a shared storage volume and return its claim name.
    ///
    /// # Errors
    ///
    /// [`LaunchError::Http`] on connection failure or non-2xx status,
    /// [`LaunchError::MalformedResponse`] if a 2xx response carries no
    /// `name` field.
    pub async fn provision_storage(&self, storage_gib: u64) -> Result<String, LaunchError> {
        let url = format!("{}/provision-storage", self.base_url);
        let body: serde_json::Value = self
            .client
            .post(&url)
            .json(&ProvisionRequest { storage_gib })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body.get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or(LaunchError::MalformedResponse)
    }
}
