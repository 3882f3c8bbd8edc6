//! go.mod parser
//!
//! Handles:
//! - require statements (single and block)
//! - // indirect comments
//! - replace/exclude/retract directives (never update candidates)
//!
//! Parsing is strict: non-UTF-8 bytes, unknown directives, and unparseable
//! require entries fail the whole parse. A caller never sees a partial
//! requirement list.

use crate::domain::ModuleRequirement;
use crate::error::ManifestError;
use regex::Regex;
use std::sync::LazyLock;

// Regex for single require: require module/path v1.2.3
static SINGLE_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^require\s+(\S+)\s+(v\d+\.\d+\.\d+[^\s]*)\s*(//.*)?$").unwrap()
});

// Regex for require block entry: module/path v1.2.3
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(v\d+\.\d+\.\d+[^\s]*)\s*(//.*)?$").unwrap());

/// Directive verbs a go.mod file may open a line with
const KNOWN_VERBS: &[&str] = &[
    "module",
    "go",
    "toolchain",
    "godebug",
    "require",
    "exclude",
    "replace",
    "retract",
];

/// Block being scanned while walking the file
#[derive(PartialEq)]
enum Block {
    None,
    Require,
    /// exclude/replace/retract blocks: entries are not update candidates
    Skipped,
}

/// Parses go.mod bytes into the list of required modules.
///
/// Requirements keep their manifest order. A module path appearing twice
/// keeps its first occurrence so downstream reports stay one-per-module.
pub fn parse_go_mod(bytes: &[u8]) -> Result<Vec<ModuleRequirement>, ManifestError> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| ManifestError::parse(0, format!("manifest is not valid UTF-8: {}", e)))?;

    let mut requirements: Vec<ModuleRequirement> = Vec::new();
    let mut block = Block::None;
    let mut line_no = 0;

    for (idx, line) in content.lines().enumerate() {
        line_no = idx + 1;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if block != Block::None {
            if trimmed == ")" {
                block = Block::None;
                continue;
            }
            if block == Block::Skipped {
                continue;
            }
            match BLOCK_ENTRY_RE.captures(trimmed) {
                Some(caps) => push_requirement(&mut requirements, &caps),
                None => {
                    return Err(ManifestError::parse(
                        line_no,
                        format!("invalid require entry '{}'", trimmed),
                    ))
                }
            }
            continue;
        }

        // Block starts
        if trimmed == "require (" || trimmed.starts_with("require (") {
            block = Block::Require;
            continue;
        }
        if ["exclude (", "replace (", "retract ("]
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        {
            block = Block::Skipped;
            continue;
        }

        // Single require statement
        if trimmed.starts_with("require ") {
            match SINGLE_REQUIRE_RE.captures(trimmed) {
                Some(caps) => push_requirement(&mut requirements, &caps),
                None => {
                    return Err(ManifestError::parse(
                        line_no,
                        format!("invalid require statement '{}'", trimmed),
                    ))
                }
            }
            continue;
        }

        // Other known directives carry no update candidates
        let verb = trimmed.split_whitespace().next().unwrap_or(trimmed);
        if KNOWN_VERBS.contains(&verb) {
            continue;
        }

        return Err(ManifestError::parse(
            line_no,
            format!("unknown directive '{}'", verb),
        ));
    }

    if block != Block::None {
        return Err(ManifestError::parse(line_no, "unclosed block"));
    }

    Ok(requirements)
}

fn push_requirement(requirements: &mut Vec<ModuleRequirement>, caps: &regex::Captures) {
    let path = &caps[1];
    let version = &caps[2];
    if requirements.iter().any(|r| r.path == path) {
        return;
    }

    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let mut req = ModuleRequirement::new(path, version);
    if comment.contains("indirect") {
        req = req.indirect();
    }
    requirements.push(req);
}
