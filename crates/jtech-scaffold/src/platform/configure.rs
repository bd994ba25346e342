//! Per-platform subproject creation and identifier rewriting

use super::{Platform, PlatformConfig, PlatformSelection};
use crate::platform::patch;
use crate::runtime::FlutterSdk;
use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ANDROID_PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"package="[^"]*""#).expect("package regex is valid"));

static BUNDLE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<key>CFBundleIdentifier</key>(\s*)<string>[^<]*</string>")
        .expect("bundle id regex is valid")
});

/// Configure every selected platform, independently: an error in one
/// platform is reported and leaves it partially configured, while the
/// others still proceed. Returns whether all platforms succeeded.
pub async fn configure_platforms(
    sdk: &FlutterSdk,
    project_dir: &Path,
    selection: &PlatformSelection,
) -> bool {
    if selection.is_empty() {
        println!("\nNo platforms selected, skipping platform configuration");
        return true;
    }

    let mut all_ok = true;
    for (platform, config) in selection.iter() {
        println!();
        println!(
            "{}",
            format!("Configuring {} platform...", platform.display_name()).cyan()
        );
        match configure_platform(sdk, project_dir, *platform, config).await {
            Ok(()) => println!(
                "{}",
                format!("{} platform configured", platform.display_name()).green()
            ),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Failed to configure {} platform: {e:#}", platform.display_name())
                        .red()
                );
                all_ok = false;
            }
        }
    }
    all_ok
}

async fn configure_platform(
    sdk: &FlutterSdk,
    project_dir: &Path,
    platform: Platform,
    config: &PlatformConfig,
) -> Result<()> {
    let subdir = project_dir.join(platform.tag());
    if !subdir.exists() {
        let args = create_args(platform, config);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let created = sdk
            .flutter(&args, project_dir)
            .await
            .context("Failed to run `flutter create`")?;
        anyhow::ensure!(created, "`flutter create` failed for {}", platform.tag());
    }

    // The create step honors `--org`, but only the rewrite guarantees the
    // exact identifier the user asked for.
    match platform {
        Platform::Android => {
            if let Some(package_name) = &config.org_id {
                patch::patch_field(
                    &project_dir.join("android/app/src/main/AndroidManifest.xml"),
                    &ANDROID_PACKAGE_RE,
                    &format!(r#"package="{package_name}""#),
                )?;
            }
        }
        Platform::Ios | Platform::Macos => {
            if let Some(bundle_id) = &config.org_id {
                let plist = match platform {
                    Platform::Ios => "ios/Runner/Info.plist",
                    _ => "macos/Runner/Info.plist",
                };
                patch::patch_field(
                    &project_dir.join(plist),
                    &BUNDLE_ID_RE,
                    &format!(
                        "<key>CFBundleIdentifier</key>${{1}}<string>{bundle_id}</string>"
                    ),
                )?;
            }
        }
        Platform::Web => {
            if let Some(renderer) = config.renderer {
                println!("  Web renderer: {}", renderer.as_str());
            }
        }
        Platform::Windows | Platform::Linux => {}
    }

    Ok(())
}

/// Argument list for `flutter create` scoped to one platform, run from
/// inside the project directory (hence the trailing `.`).
fn create_args(platform: Platform, config: &PlatformConfig) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        format!("--platforms={}", platform.tag()),
    ];

    if platform.has_org_id() {
        if let Some(org_id) = &config.org_id {
            args.push("--org".to_string());
            args.push(org_id.clone());
        }
    }

    if let Some(language) = config.language {
        match platform {
            Platform::Android => {
                args.push("--android-language".to_string());
                args.push(language.as_str().to_string());
            }
            Platform::Ios => {
                args.push("--ios-language".to_string());
                args.push(language.as_str().to_string());
            }
            _ => {}
        }
    }

    args.push(".".to_string());
    args
}
