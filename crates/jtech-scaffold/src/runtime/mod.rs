//! Flutter/Dart SDK invocation

pub mod exec;

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use exec::{run_captured, run_streaming, CommandOutput};

/// Package added to every scaffolded project.
pub const BASE_PACKAGE: &str = "jtech_base";

/// Locator for the Flutter SDK binaries.
///
/// With no explicit bin directory the tools are resolved through `$PATH`,
/// matching how the SDK is normally installed.
#[derive(Debug, Clone, Default)]
pub struct FlutterSdk {
    bin_dir: Option<PathBuf>,
}

/// SDK availability probe result.
#[derive(Debug, Clone)]
pub struct SdkInfo {
    pub version: Option<String>,
    pub available: bool,
}

impl FlutterSdk {
    pub fn new(bin_dir: Option<PathBuf>) -> Self {
        Self { bin_dir }
    }

    fn program(&self, name: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    pub fn flutter_program(&self) -> PathBuf {
        self.program("flutter")
    }

    pub fn dart_program(&self) -> PathBuf {
        self.program("dart")
    }

    /// Run `flutter <args>` in `cwd`, streaming its output.
    pub async fn flutter(&self, args: &[&str], cwd: &Path) -> Result<bool> {
        exec::run_streaming(&self.flutter_program(), args, cwd).await
    }

    /// Run `dart <args>` in `cwd`, streaming its output.
    pub async fn dart(&self, args: &[&str], cwd: &Path) -> Result<bool> {
        exec::run_streaming(&self.dart_program(), args, cwd).await
    }

    /// Probe `flutter --version`. Advisory only: the caller decides what
    /// an unavailable SDK means.
    pub async fn check(&self) -> SdkInfo {
        match exec::run_captured(&self.flutter_program(), &["--version"], None).await {
            Ok(out) if out.success => SdkInfo {
                version: out.stdout.lines().next().map(|l| l.trim().to_string()),
                available: true,
            },
            _ => SdkInfo {
                version: None,
                available: false,
            },
        }
    }
}

/// Dependency setup batch: fetch packages, add the base package, run code
/// generation. The commands are chained with `&&` semantics, so a failure
/// skips the commands that depend on it; the aggregate result is reported
/// by the caller but is not fatal to the run.
pub async fn run_init_commands(sdk: &FlutterSdk, project_dir: &Path) -> bool {
    init_step(sdk.flutter(&["pub", "get"], project_dir).await)
        && init_step(sdk.flutter(&["pub", "add", BASE_PACKAGE], project_dir).await)
        && init_step(sdk.dart(&["run", "build_runner", "build"], project_dir).await)
}

/// A command that could not be spawned at all (SDK missing from `$PATH`)
/// counts the same as a non-zero exit: report it, skip the rest of the
/// batch, let the run continue.
fn init_step(result: Result<bool>) -> bool {
    match result {
        Ok(ok) => ok,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_programs_resolve_through_path() {
        let sdk = FlutterSdk::new(None);
        assert_eq!(sdk.flutter_program(), PathBuf::from("flutter"));
        assert_eq!(sdk.dart_program(), PathBuf::from("dart"));
    }

    #[test]
    fn test_bin_dir_prefixes_both_tools() {
        let sdk = FlutterSdk::new(Some(PathBuf::from("/opt/flutter/bin")));
        assert_eq!(sdk.flutter_program(), PathBuf::from("/opt/flutter/bin/flutter"));
        assert_eq!(sdk.dart_program(), PathBuf::from("/opt/flutter/bin/dart"));
    }

    #[tokio::test]
    async fn test_check_reports_a_missing_sdk_as_unavailable() {
        let sdk = FlutterSdk::new(Some(PathBuf::from("/nonexistent/bin")));
        let info = sdk.check().await;
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[tokio::test]
    async fn test_init_batch_with_a_missing_sdk_fails_without_an_error() {
        let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
        let sdk = FlutterSdk::new(Some(PathBuf::from("/nonexistent/bin")));
        // The spawn failure is reported and absorbed; the caller only sees
        // an unsuccessful batch and keeps going.
        assert!(!run_init_commands(&sdk, tmp.path()).await);
    }

    #[cfg(unix)]
    fn write_script(path: &Path, content: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, content).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_init_batch_short_circuits_after_a_failure() {
        let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let log = tmp.path().join("calls.log");

        // Fake SDK: every invocation is recorded, `flutter` always fails.
        write_script(
            &bin.join("flutter"),
            &format!("#!/bin/sh\necho \"flutter $@\" >> {}\nexit 1\n", log.display()),
        );
        write_script(
            &bin.join("dart"),
            &format!("#!/bin/sh\necho \"dart $@\" >> {}\nexit 0\n", log.display()),
        );

        let sdk = FlutterSdk::new(Some(bin));
        assert!(!run_init_commands(&sdk, tmp.path()).await);

        // Only the first command ran; the dependent ones were skipped.
        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.trim(), "flutter pub get");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_init_batch_succeeds_when_every_command_succeeds() {
        let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let log = tmp.path().join("calls.log");

        for tool in ["flutter", "dart"] {
            write_script(
                &bin.join(tool),
                &format!("#!/bin/sh\necho \"{tool} $@\" >> {}\nexit 0\n", log.display()),
            );
        }

        let sdk = FlutterSdk::new(Some(bin));
        assert!(run_init_commands(&sdk, tmp.path()).await);

        let calls = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(
            lines,
            vec![
                "flutter pub get",
                "flutter pub add jtech_base",
                "dart run build_runner build"
            ]
        );
    }
}
