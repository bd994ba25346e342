//! Placeholder substitution across the copied project tree

use crate::config::ReplacementMap;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Outcome of a substitution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Files read and (where tokens matched) rewritten.
    pub processed: usize,
    /// Files skipped because they could not be read or written.
    pub skipped: usize,
}

/// Walk every regular file under `project_dir` and replace the placeholder
/// tokens literally.
///
/// Per-file failures (non-UTF-8 content, permissions) are reported and
/// skipped; the rest of the tree is still processed. A file is only
/// written back when its content was read successfully, and only when a
/// token actually matched.
pub async fn replace_placeholders(
    project_dir: &Path,
    replacements: &ReplacementMap,
) -> Result<SubstitutionReport> {
    anyhow::ensure!(
        project_dir.is_dir(),
        "project directory not found: {}",
        project_dir.display()
    );

    let mut report = SubstitutionReport::default();

    for entry in WalkDir::new(project_dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        match substitute_file(entry.path(), replacements).await {
            Ok(()) => report.processed += 1,
            Err(e) => {
                eprintln!(
                    "  {}",
                    format!("Skipping {}: {e:#}", entry.path().display()).yellow()
                );
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

async fn substitute_file(path: &Path, replacements: &ReplacementMap) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .context("Failed to read file as text")?;

    let updated = replacements.apply(&content);
    if updated != content {
        fs::write(path, updated)
            .await
            .context("Failed to write file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProjectConfig, ProjectInput};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn demo_map() -> ReplacementMap {
        let config = ProjectConfig::resolve(ProjectInput {
            project_name: "demo_app".to_string(),
            dev_url: "https://api.dev.example.com".to_string(),
            target_dir: PathBuf::from("/tmp/out"),
            ..Default::default()
        });
        ReplacementMap::from_config(&config)
    }

    #[tokio::test]
    async fn test_tokens_are_replaced_in_every_file() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let pubspec = tmp.path().join("pubspec.yaml");
        let nested = tmp.path().join("lib/config.dart");

        std::fs::write(
            &pubspec,
            "name: ${jtech_base_project_name}$\ndescription: ${jtech_base_description}$\n",
        )
        .unwrap();
        std::fs::create_dir_all(nested.parent().unwrap()).unwrap();
        std::fs::write(&nested, "const devUrl = '${jtech_base_dev_url}$';\n").unwrap();

        let report = replace_placeholders(tmp.path(), &demo_map()).await.unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped, 0);

        assert_eq!(
            std::fs::read_to_string(&pubspec).unwrap(),
            "name: demo_app\ndescription: \n"
        );
        assert_eq!(
            std::fs::read_to_string(&nested).unwrap(),
            "const devUrl = 'https://api.dev.example.com';\n"
        );
    }

    #[tokio::test]
    async fn test_unreadable_files_are_skipped_not_fatal() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        std::fs::write(tmp.path().join("ok.txt"), "${jtech_base_app_name}$").unwrap();
        // Invalid UTF-8: read_to_string fails, the file is left untouched.
        std::fs::write(tmp.path().join("logo.png"), [0xffu8, 0xfe, 0x00, 0x89]).unwrap();

        let report = replace_placeholders(tmp.path(), &demo_map()).await.unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.skipped, 1);

        assert_eq!(
            std::fs::read_to_string(tmp.path().join("ok.txt")).unwrap(),
            "demo_app"
        );
        assert_eq!(
            std::fs::read(tmp.path().join("logo.png")).unwrap(),
            vec![0xffu8, 0xfe, 0x00, 0x89]
        );
    }

    #[tokio::test]
    async fn test_token_free_files_are_left_byte_identical() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let plain = tmp.path().join("README.md");
        std::fs::write(&plain, "# no tokens here\n").unwrap();

        let report = replace_placeholders(tmp.path(), &demo_map()).await.unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(std::fs::read_to_string(&plain).unwrap(), "# no tokens here\n");
    }
}
