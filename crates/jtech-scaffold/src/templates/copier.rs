//! Recursive template copying

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy the whole template tree into the project directory, preserving
/// relative paths.
///
/// The destination may already exist; the template is merged into it and
/// colliding files are overwritten. Any copy failure is fatal to the run.
/// Returns the number of files copied.
pub async fn copy_template(template_root: &Path, project_dir: &Path) -> Result<usize> {
    anyhow::ensure!(
        template_root.is_dir(),
        "template directory not found: {}",
        template_root.display()
    );

    fs::create_dir_all(project_dir)
        .await
        .context("Failed to create project directory")?;

    let mut copied = 0usize;

    for entry in WalkDir::new(template_root) {
        let entry = entry.context("Failed to walk template directory")?;
        let relative = entry
            .path()
            .strip_prefix(template_root)
            .context("Template entry outside the template root")?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target_path = project_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
        } else {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .await
                .with_context(|| format!("Failed to copy file: {}", target_path.display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
