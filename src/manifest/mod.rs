//! go.mod manifest parsing
//!
//! This module provides:
//! - Extraction of require entries from go.mod byte content
//! - Strict parsing: malformed content is an error, never a partial result

mod go_mod;

pub use go_mod::parse_go_mod;
