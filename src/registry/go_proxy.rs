//! Go module proxy client
//!
//! API endpoints:
//! - List versions: {endpoint}/{module}/@v/list (plain text, one per line)
//! - Latest version: {endpoint}/{module}/@latest (JSON)
//!
//! Each call issues exactly one request; failed lookups are never retried
//! here. The caller decides whether to re-invoke.

use crate::domain::VersionInfo;
use crate::error::RegistryError;
use crate::registry::ModuleRegistry;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Well-known public Go module proxy
pub const DEFAULT_PROXY_URL: &str = "https://proxy.golang.org";

/// Timeout applied to each proxy request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent header sent with each request
const USER_AGENT: &str = concat!("modcheck/", env!("CARGO_PKG_VERSION"));

/// Client for a Go module proxy.
///
/// Stateless beyond the configured endpoint; a single instance is safely
/// shared by any number of concurrent lookup tasks.
pub struct GoProxyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GoProxyClient {
    /// Creates a client against the given proxy endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RegistryError> {
        let endpoint = endpoint.into();
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RegistryError::transport(&endpoint, e))?;

        Ok(Self { client, endpoint })
    }

    /// The configured proxy endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Base URL for a module's proxy endpoints
    fn module_url(&self, module: &str) -> String {
        format!("{}/{}", self.endpoint, encode_module_path(module))
    }
}

/// Encodes a module path for proxy URLs: uppercase letters become
/// !lowercase, per the proxy's case-encoding scheme.
fn encode_module_path(module: &str) -> String {
    let mut encoded = String::with_capacity(module.len());
    for ch in module.chars() {
        if ch.is_ascii_uppercase() {
            encoded.push('!');
            encoded.push(ch.to_ascii_lowercase());
        } else {
            encoded.push(ch);
        }
    }
    encoded
}

/// Maps a not-found style status, if any. The proxy answers 404 for unknown
/// modules and 410 for ones it no longer serves.
fn is_not_found(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::GONE
}

#[async_trait]
impl ModuleRegistry for GoProxyClient {
    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
        let url = format!("{}/@v/list", self.module_url(module));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::transport(module, e))?;

        let status = response.status();
        if is_not_found(status) {
            return Err(RegistryError::module_not_found(module));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::transport(module, e))?;

        if !status.is_success() {
            return Err(RegistryError::unexpected_status(
                module,
                status.as_u16(),
                body,
            ));
        }

        // A body of at most one byte means the module has no versions yet
        if body.len() <= 1 {
            return Ok(Vec::new());
        }

        Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn latest_version(&self, module: &str) -> Result<VersionInfo, RegistryError> {
        let url = format!("{}/@latest", self.module_url(module));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::transport(module, e))?;

        let status = response.status();
        if is_not_found(status) {
            return Err(RegistryError::module_not_found(module));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::transport(module, e))?;

        if !status.is_success() {
            return Err(RegistryError::unexpected_status(
                module,
                status.as_u16(),
                body,
            ));
        }

        serde_json::from_str(&body).map_err(|e| RegistryError::invalid_response(module, e.to_string()))
    }
}
