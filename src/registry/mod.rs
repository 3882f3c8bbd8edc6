//! Go module proxy access
//!
//! This module provides:
//! - The ModuleRegistry trait, the seam the update checker looks through
//! - GoProxyClient, the HTTP implementation against a module proxy

mod go_proxy;

pub use go_proxy::{GoProxyClient, DEFAULT_PROXY_URL};

use crate::domain::VersionInfo;
use crate::error::RegistryError;
use async_trait::async_trait;

/// A registry that can answer version queries for Go module paths.
///
/// Implementations hold no mutable state and are shared across concurrent
/// lookup tasks behind an `Arc`.
#[async_trait]
pub trait ModuleRegistry: Send + Sync {
    /// Lists the published versions of a module, in registry-defined order.
    /// An empty list is a valid answer for a module without versions.
    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError>;

    /// Returns the latest published version of a module
    async fn latest_version(&self, module: &str) -> Result<VersionInfo, RegistryError>;
}
