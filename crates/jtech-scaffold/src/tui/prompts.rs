//! Input collection and workflow orchestration

use crate::config::{validate, ProjectConfig, ProjectInput, ReplacementMap};
use crate::opener;
use crate::platform::{
    configure_platforms, CreateLanguage, Platform, PlatformConfig, PlatformSelection, WebRenderer,
};
use crate::runtime::{self, FlutterSdk};
use crate::templates;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CLI arguments for the create flow.
///
/// Everything is optional at this level: the collector validates the
/// required trio itself so that a missing or malformed flag can fall back
/// to the interactive path instead of hard-exiting.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Flutter SDK bin directory; `None` resolves the tools via `$PATH`
    pub flutter_bin: Option<PathBuf>,

    /// Project name (letters, digits and underscores)
    pub project_name: Option<String>,

    /// Development API endpoint (IP or http(s) URL)
    pub dev_url: Option<String>,

    /// Directory to create the project under
    pub target_dir: Option<String>,

    /// Application display name; defaults to the project name
    pub app_name: Option<String>,

    /// Database name; defaults to the project name
    pub db_name: Option<String>,

    /// Production API endpoint; defaults to the development endpoint
    pub prod_url: Option<String>,

    /// Project description
    pub description: Option<String>,

    /// Platforms to create (tags: android, ios, web, windows, macos, linux)
    pub platforms: Option<Vec<String>>,

    /// Android package name (reverse-domain)
    pub android_package: Option<String>,

    /// Android source language: kotlin or java
    pub android_language: Option<String>,

    /// iOS bundle identifier (reverse-domain)
    pub ios_bundle_id: Option<String>,

    /// iOS source language: swift or objective-c
    pub ios_language: Option<String>,

    /// Web renderer: html or canvaskit
    pub web_renderer: Option<String>,

    /// macOS bundle identifier (reverse-domain)
    pub macos_bundle_id: Option<String>,

    /// Reveal the project directory when done (flag mode never prompts)
    pub open_when_finish: bool,

    /// Local template directory override (for development use)
    pub template_dir: Option<PathBuf>,
}

impl CreateArgs {
    /// Whether the user attempted flag-driven configuration at all.
    fn has_project_flags(&self) -> bool {
        self.project_name.is_some() || self.dev_url.is_some() || self.target_dir.is_some()
    }
}

/// Run the whole create flow.
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("jtech-create")?;

    let (config, flag_selection) = collect_input(&args)?;
    cliclack::log::info(format!(
        "Project directory: {}",
        config.project_dir.display()
    ))?;

    let sdk = FlutterSdk::new(config.flutter_bin.clone());
    let sdk_info = sdk.check().await;
    if sdk_info.available {
        cliclack::log::success(format!(
            "Flutter SDK detected ({})",
            sdk_info.version.as_deref().unwrap_or("unknown version")
        ))?;
    } else {
        cliclack::log::warning("Flutter SDK not detected; SDK commands below may fail")?;
    }

    let template_root = templates::resolve_template_root(args.template_dir.as_deref())?;

    // Copy the template tree. Failure here is fatal to the whole run.
    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Copying template to {}...",
        config.project_dir.display()
    ));
    match templates::copy_template(&template_root, &config.project_dir).await {
        Ok(copied) => spinner.stop(format!("Copied {copied} template files")),
        Err(e) => {
            spinner.stop("Template copy failed");
            return Err(e);
        }
    }

    // Substitute placeholders; per-file problems were already reported.
    let replacements = ReplacementMap::from_config(&config);
    let spinner = cliclack::spinner();
    spinner.start("Replacing placeholders...");
    let report = templates::replace_placeholders(&config.project_dir, &replacements).await?;
    spinner.stop(format!(
        "Processed {} files ({} skipped)",
        report.processed, report.skipped
    ));

    // Dependency setup. An error is reported but the run continues.
    cliclack::log::info("Running initialization commands")?;
    if runtime::run_init_commands(&sdk, &config.project_dir).await {
        cliclack::log::success("Project initialized")?;
    } else {
        cliclack::log::warning(
            "Initialization reported errors; check the output above",
        )?;
    }

    let selection = match flag_selection {
        Some(selection) => selection,
        None => prompt_platform_selection()?,
    };

    if configure_platforms(&sdk, &config.project_dir, &selection).await {
        cliclack::log::success("Platform configuration complete")?;
    } else {
        cliclack::log::warning(
            "Platform configuration reported errors; check the output above",
        )?;
    }

    let open_dir = match config.open_when_finish {
        Some(flag) => flag,
        None => cliclack::confirm("Open the project directory?")
            .initial_value(false)
            .interact()?,
    };
    if open_dir {
        match opener::open_project_dir(&config.project_dir) {
            Ok(()) => cliclack::log::info(format!(
                "Opened {}",
                config.project_dir.display()
            ))?,
            Err(e) => cliclack::log::warning(format!("{e:#}"))?,
        }
    }

    cliclack::outro("Project created!")?;
    Ok(())
}

/// Produce the project configuration and, when the flags carried one, the
/// platform selection.
///
/// The flag path is all-or-nothing: any missing or invalid value drops
/// every flag and re-collects everything interactively.
fn collect_input(args: &CreateArgs) -> Result<(ProjectConfig, Option<PlatformSelection>)> {
    if args.has_project_flags() {
        match config_from_flags(args) {
            Ok(collected) => return Ok(collected),
            Err(e) => cliclack::log::warning(format!(
                "Ignoring command-line flags ({e:#}); switching to interactive mode"
            ))?,
        }
    }
    Ok((prompt_project_config()?, None))
}

fn config_from_flags(args: &CreateArgs) -> Result<(ProjectConfig, Option<PlatformSelection>)> {
    let project_name = args
        .project_name
        .as_deref()
        .context("--project-name is required")?;
    validate::project_name(project_name)?;

    let dev_url = args.dev_url.as_deref().context("--dev-url is required")?;
    validate::api_url(dev_url)?;

    let target = args
        .target_dir
        .as_deref()
        .context("--target-dir is required")?;
    let target_dir = validate::target_dir(target)?;

    if let Some(db_name) = &args.db_name {
        validate::db_name(db_name)?;
    }
    if let Some(prod_url) = &args.prod_url {
        validate::api_url(prod_url)?;
    }

    let selection = platforms_from_flags(args)?;

    let config = ProjectConfig::resolve(ProjectInput {
        project_name: project_name.to_string(),
        app_name: args.app_name.clone(),
        db_name: args.db_name.clone(),
        dev_url: dev_url.to_string(),
        prod_url: args.prod_url.clone(),
        description: args.description.clone(),
        target_dir,
        flutter_bin: args.flutter_bin.clone(),
        open_when_finish: Some(args.open_when_finish),
    });

    Ok((config, selection))
}

fn platforms_from_flags(args: &CreateArgs) -> Result<Option<PlatformSelection>> {
    let Some(tags) = &args.platforms else {
        return Ok(None);
    };

    let mut selection = PlatformSelection::new();
    for tag in tags {
        let platform =
            Platform::from_tag(tag).with_context(|| format!("unknown platform '{tag}'"))?;
        let mut config = PlatformConfig::default();

        match platform {
            Platform::Android => {
                if let Some(package_name) = &args.android_package {
                    validate::org_id(package_name)?;
                    config.org_id = Some(package_name.clone());
                }
                if let Some(language) = &args.android_language {
                    config.language = Some(
                        CreateLanguage::parse_android(language)
                            .with_context(|| format!("invalid --android-language '{language}'"))?,
                    );
                }
            }
            Platform::Ios => {
                if let Some(bundle_id) = &args.ios_bundle_id {
                    validate::org_id(bundle_id)?;
                    config.org_id = Some(bundle_id.clone());
                }
                if let Some(language) = &args.ios_language {
                    config.language = Some(
                        CreateLanguage::parse_ios(language)
                            .with_context(|| format!("invalid --ios-language '{language}'"))?,
                    );
                }
            }
            Platform::Macos => {
                if let Some(bundle_id) = &args.macos_bundle_id {
                    validate::org_id(bundle_id)?;
                    config.org_id = Some(bundle_id.clone());
                }
            }
            Platform::Web => {
                if let Some(renderer) = &args.web_renderer {
                    config.renderer = Some(
                        WebRenderer::parse(renderer)
                            .with_context(|| format!("invalid --web-renderer '{renderer}'"))?,
                    );
                }
            }
            Platform::Windows | Platform::Linux => {}
        }

        selection.insert(platform, config);
    }

    anyhow::ensure!(
        !selection.is_empty(),
        "--platforms must name at least one platform"
    );
    Ok(Some(selection))
}

fn prompt_project_config() -> Result<ProjectConfig> {
    let project_name: String = cliclack::input("Project name (letters, digits and underscores)")
        .validate(|s: &String| {
            validate::project_name(s).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact()?;

    let app_name: String = cliclack::input("App name")
        .placeholder(&project_name)
        .default_input(&project_name)
        .interact()?;

    let db_name: String = cliclack::input("Database name")
        .default_input(&project_name)
        .validate(|s: &String| validate::db_name(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact()?;

    let dev_url: String = cliclack::input("Development API endpoint (IP or http(s):// URL)")
        .validate(|s: &String| validate::api_url(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact()?;

    let prod_url: String = cliclack::input("Production API endpoint")
        .default_input(&dev_url)
        .validate(|s: &String| validate::api_url(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact()?;

    let description: String = cliclack::input("Project description")
        .required(false)
        .interact()?;

    // The directory is created as part of validation, so a failed creation
    // reports the OS error and asks again.
    let target_dir = loop {
        let input: String = cliclack::input("Target directory").interact()?;
        match validate::target_dir(&input) {
            Ok(path) => break path,
            Err(e) => cliclack::log::error(e.to_string())?,
        }
    };

    Ok(ProjectConfig::resolve(ProjectInput {
        project_name,
        app_name: Some(app_name),
        db_name: Some(db_name),
        dev_url,
        prod_url: Some(prod_url),
        description: Some(description),
        target_dir,
        flutter_bin: None,
        open_when_finish: None,
    }))
}

fn prompt_platform_selection() -> Result<PlatformSelection> {
    println!();
    println!("Select the platforms to create:");
    for (index, platform) in Platform::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, platform.display_name());
    }

    let platforms = loop {
        let choices: String =
            cliclack::input("Platform numbers (e.g. 1 2 3, or 'all' for every platform)")
                .interact()?;
        let (valid, invalid) = parse_platform_choices(&choices);
        for token in &invalid {
            cliclack::log::warning(format!("Invalid choice: {token}"))?;
        }
        if !valid.is_empty() {
            break valid;
        }
    };

    let mut selection = PlatformSelection::new();
    for platform in platforms {
        let mut config = PlatformConfig::default();
        match platform {
            Platform::Android => {
                cliclack::log::info(format!("Configure the {platform} platform"))?;
                config.org_id = Some(prompt_org_id("Package name (e.g. com.example.app)")?);
            }
            Platform::Ios | Platform::Macos => {
                cliclack::log::info(format!("Configure the {platform} platform"))?;
                config.org_id = Some(prompt_org_id("Bundle ID (e.g. com.example.app)")?);
            }
            Platform::Web => {
                let renderer: WebRenderer = cliclack::select("Web renderer")
                    .item(WebRenderer::Html, "html", "default")
                    .item(WebRenderer::CanvasKit, "canvaskit", "")
                    .interact()?;
                config.renderer = Some(renderer);
            }
            Platform::Windows | Platform::Linux => {}
        }
        selection.insert(platform, config);
    }

    Ok(selection)
}

fn prompt_org_id(label: &str) -> Result<String> {
    let value: String = cliclack::input(label)
        .validate(|s: &String| validate::org_id(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact()?;
    Ok(value)
}

/// Parse the platform menu answer: `all`, or whitespace-separated menu
/// numbers. Unknown tokens are collected for per-token reporting;
/// duplicates keep their first position.
fn parse_platform_choices(input: &str) -> (Vec<Platform>, Vec<String>) {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return (Platform::ALL.to_vec(), Vec::new());
    }

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for token in trimmed.split_whitespace() {
        match token.parse::<usize>().ok().and_then(Platform::from_menu_index) {
            Some(platform) if !valid.contains(&platform) => valid.push(platform),
            Some(_) => {}
            None => invalid.push(token.to_string()),
        }
    }
    (valid, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_all_selects_every_platform() {
        let (valid, invalid) = parse_platform_choices(" ALL ");
        assert_eq!(valid, Platform::ALL.to_vec());
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_parse_digit_list_with_invalid_tokens() {
        let (valid, invalid) = parse_platform_choices("1 3 9 x 2");
        assert_eq!(valid, vec![Platform::Android, Platform::Web, Platform::Ios]);
        assert_eq!(invalid, vec!["9".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_parse_deduplicates_choices() {
        let (valid, invalid) = parse_platform_choices("2 2 2");
        assert_eq!(valid, vec![Platform::Ios]);
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_parse_empty_input_selects_nothing() {
        let (valid, invalid) = parse_platform_choices("   ");
        assert!(valid.is_empty());
        assert!(invalid.is_empty());
    }

    fn flag_args(target_dir: &str) -> CreateArgs {
        CreateArgs {
            project_name: Some("demo_app".to_string()),
            dev_url: Some("https://api.dev.example.com".to_string()),
            target_dir: Some(target_dir.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_build_a_config_with_defaults() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let args = flag_args(tmp.path().to_str().unwrap());

        let (config, selection) = config_from_flags(&args).unwrap();
        assert_eq!(config.app_name, "demo_app");
        assert_eq!(config.db_name, "demo_app");
        assert_eq!(config.prod_url, "https://api.dev.example.com");
        assert_eq!(config.project_dir, tmp.path().join("demo_app"));
        assert_eq!(config.open_when_finish, Some(false));
        assert!(selection.is_none());
    }

    #[test]
    fn test_missing_required_flag_fails_the_flag_path() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut args = flag_args(tmp.path().to_str().unwrap());
        args.dev_url = None;

        let err = config_from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--dev-url"));
    }

    #[test]
    fn test_invalid_flag_value_fails_the_flag_path() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut args = flag_args(tmp.path().to_str().unwrap());
        args.prod_url = Some("example.com".to_string());

        assert!(config_from_flags(&args).is_err());
    }

    #[test]
    fn test_platform_flags_build_a_selection() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut args = flag_args(tmp.path().to_str().unwrap());
        args.platforms = Some(vec!["android".to_string(), "web".to_string(), "linux".to_string()]);
        args.android_package = Some("com.demo.app".to_string());
        args.android_language = Some("kotlin".to_string());
        args.web_renderer = Some("canvaskit".to_string());

        let (_, selection) = config_from_flags(&args).unwrap();
        let selection = selection.unwrap();
        assert_eq!(selection.len(), 3);

        let entries: Vec<_> = selection.iter().collect();
        assert_eq!(entries[0].0, Platform::Android);
        assert_eq!(entries[0].1.org_id.as_deref(), Some("com.demo.app"));
        assert_eq!(entries[0].1.language, Some(CreateLanguage::Kotlin));
        assert_eq!(entries[1].1.renderer, Some(WebRenderer::CanvasKit));
        assert_eq!(entries[2].1, PlatformConfig::default());
    }

    #[test]
    fn test_platform_without_identifier_flag_keeps_an_empty_config() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut args = flag_args(tmp.path().to_str().unwrap());
        args.platforms = Some(vec!["ios".to_string()]);

        let (_, selection) = config_from_flags(&args).unwrap();
        let selection = selection.unwrap();
        assert_eq!(selection.iter().next().unwrap().1, PlatformConfig::default());
    }

    #[test]
    fn test_unknown_platform_tag_fails_the_flag_path() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut args = flag_args(tmp.path().to_str().unwrap());
        args.platforms = Some(vec!["solaris".to_string()]);

        assert!(config_from_flags(&args).is_err());
    }
}
