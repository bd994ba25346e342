//! Patch a known field inside a generated file
//!
//! The platform subprojects are rewritten with plain regex substitution
//! rather than a structured XML/plist parser, but through one narrow
//! utility with an explicit contract: the pattern must match at least
//! once, so a file the SDK generated in an unexpected shape surfaces as
//! an error instead of silently staying unpatched.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Rewrite every match of `pattern` in the file with `replacement`
/// (capture-group references allowed). All other content is preserved
/// byte-exact. Zero matches is an error.
pub fn patch_field(path: &Path, pattern: &Regex, replacement: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    anyhow::ensure!(
        pattern.is_match(&content),
        "pattern '{pattern}' not found in {}",
        path.display()
    );

    let updated = pattern.replace_all(&content, replacement);
    std::fs::write(path, updated.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
