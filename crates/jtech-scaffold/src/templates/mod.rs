//! Template location, copying and placeholder substitution
//!
//! This module provides:
//! - Resolution of the fixed `.template` root directory
//! - Recursive copying of the template tree into the project directory
//! - Literal `${jtech_base_*}$` token substitution across the copied tree

pub mod copier;
pub mod placeholder;

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub use copier::copy_template;
pub use placeholder::{replace_placeholders, SubstitutionReport};

/// Name of the template directory shipped next to the tool.
pub const TEMPLATE_DIR_NAME: &str = ".template";

/// Locate the template root.
///
/// An explicit override wins. Otherwise the `.template` directory is
/// expected next to the current working directory, with two packaging
/// layouts handled: running from inside `script/` looks one level up,
/// and running from inside `dist/` looks two levels up.
pub fn resolve_template_root(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        anyhow::ensure!(
            dir.is_dir(),
            "template directory not found: {}",
            dir.display()
        );
        return Ok(dir.to_path_buf());
    }

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let base = match cwd
        .file_name()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("script") => cwd.join(".."),
        Some("dist") => cwd.join("../.."),
        _ => cwd,
    };

    let root = base.join(TEMPLATE_DIR_NAME);
    anyhow::ensure!(
        root.is_dir(),
        "template directory not found: {}",
        root.display()
    );
    Ok(root)
}
