//! Core domain types for the update check
//!
//! This module provides:
//! - ModuleRequirement: one require entry from a go.mod manifest
//! - VersionInfo: the proxy's latest-version record for a module
//! - Update and UpdateReport: the outcome of one manifest check

mod requirement;
mod update;
mod version_info;

pub use requirement::ModuleRequirement;
pub use update::{Update, UpdateReport};
pub use version_info::VersionInfo;
