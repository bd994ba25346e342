//! Reveal the project directory in the OS file manager

use anyhow::{Context, Result};
use std::path::Path;

/// Open `dir` with the native file manager. Callers treat a failure as
/// informational, never fatal.
pub fn open_project_dir(dir: &Path) -> Result<()> {
    open::that(dir).with_context(|| format!("Failed to open directory: {}", dir.display()))
}
