//! jtech-create - Scaffold Flutter projects from the jtech_base template

use anyhow::Result;
use clap::Parser;
use jtech_scaffold::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jtech-create")]
#[command(about = "Scaffold a Flutter project from the jtech_base template")]
#[command(version)]
pub struct Args {
    /// Flutter SDK bin directory (uses $PATH when omitted)
    #[arg(long = "flutter-bin")]
    pub flutter_bin: Option<PathBuf>,

    /// Project name (letters, digits and underscores)
    #[arg(long = "project-name")]
    pub project_name: Option<String>,

    /// Development API endpoint (IP or http(s):// URL)
    #[arg(long = "dev-url")]
    pub dev_url: Option<String>,

    /// Directory to create the project under (created when missing)
    #[arg(long = "target-dir")]
    pub target_dir: Option<String>,

    /// Application display name (defaults to the project name)
    #[arg(long = "app-name")]
    pub app_name: Option<String>,

    /// Database name (defaults to the project name)
    #[arg(long = "db-name")]
    pub db_name: Option<String>,

    /// Production API endpoint (defaults to the development endpoint)
    #[arg(long = "prod-url")]
    pub prod_url: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Platforms to create (comma-separated: android,ios,web,windows,macos,linux)
    #[arg(long, value_delimiter = ',')]
    pub platforms: Option<Vec<String>>,

    /// Android package name (e.g. com.example.app)
    #[arg(long = "android-package")]
    pub android_package: Option<String>,

    /// Android source language: kotlin or java
    #[arg(long = "android-language")]
    pub android_language: Option<String>,

    /// iOS bundle identifier (e.g. com.example.app)
    #[arg(long = "ios-bundle-id")]
    pub ios_bundle_id: Option<String>,

    /// iOS source language: swift or objective-c
    #[arg(long = "ios-language")]
    pub ios_language: Option<String>,

    /// Web renderer: html or canvaskit
    #[arg(long = "web-renderer")]
    pub web_renderer: Option<String>,

    /// macOS bundle identifier (e.g. com.example.app)
    #[arg(long = "macos-bundle-id")]
    pub macos_bundle_id: Option<String>,

    /// Reveal the project directory when finished
    #[arg(long)]
    pub open: bool,

    /// Local template directory override (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            flutter_bin: args.flutter_bin,
            project_name: args.project_name,
            dev_url: args.dev_url,
            target_dir: args.target_dir,
            app_name: args.app_name,
            db_name: args.db_name,
            prod_url: args.prod_url,
            description: args.description,
            platforms: args.platforms,
            android_package: args.android_package,
            android_language: args.android_language,
            ios_bundle_id: args.ios_bundle_id,
            ios_language: args.ios_language,
            web_renderer: args.web_renderer,
            macos_bundle_id: args.macos_bundle_id,
            open_when_finish: args.open,
            template_dir: args.template_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = jtech_scaffold::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
