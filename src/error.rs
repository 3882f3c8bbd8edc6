//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with go.mod reading and parsing
//! - RegistryError: Issues with Go module proxy communication
//! - CheckError: Failures of a single update-resolution call
//! - AppError: Top-level error surfaced per input path

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Update check related errors
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Errors related to go.mod manifest handling
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read the manifest file
    #[error("failed to read manifest file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest content could not be parsed
    #[error("failed to parse go.mod at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors related to Go module proxy communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Module not known to the proxy (HTTP 404 or 410)
    #[error("module '{module}' not found in proxy")]
    ModuleNotFound { module: String },

    /// Proxy answered with a non-success status other than not-found.
    /// Carries the status code and raw body text for diagnostics.
    #[error("proxy returned HTTP {status} for '{module}': {body}")]
    UnexpectedStatus {
        module: String,
        status: u16,
        body: String,
    },

    /// Proxy answered 200 but the body could not be decoded
    #[error("invalid response from proxy for '{module}': {message}")]
    InvalidResponse { module: String, message: String },

    /// Request never completed (connection, timeout, cancellation)
    #[error("request to proxy failed for '{module}': {source}")]
    Transport {
        module: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from a single update-resolution call
#[derive(Error, Debug)]
pub enum CheckError {
    /// Manifest bytes could not be parsed
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A per-module version lookup failed
    #[error("could not get latest version of '{module}': {source}")]
    Lookup {
        module: String,
        #[source]
        source: RegistryError,
    },
}

impl ManifestError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new ModuleNotFound error
    pub fn module_not_found(module: impl Into<String>) -> Self {
        RegistryError::ModuleNotFound {
            module: module.into(),
        }
    }

    /// Creates a new UnexpectedStatus error
    pub fn unexpected_status(
        module: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        RegistryError::UnexpectedStatus {
            module: module.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(module: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Creates a new Transport error
    pub fn transport(module: impl Into<String>, source: reqwest::Error) -> Self {
        RegistryError::Transport {
            module: module.into(),
            source,
        }
    }

    /// True when the proxy reported the module as unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::ModuleNotFound { .. })
    }
}

impl CheckError {
    /// Creates a new Lookup error chained with the offending module path
    pub fn lookup(module: impl Into<String>, source: RegistryError) -> Self {
        CheckError::Lookup {
            module: module.into(),
            source,
        }
    }
}
