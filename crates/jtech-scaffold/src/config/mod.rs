//! Project configuration and the placeholder replacement map

pub mod validate;

use std::path::PathBuf;

pub use validate::ValidationError;

/// Placeholder tokens embedded in the template files.
///
/// Each marker is replaced literally (no regex) by the matching
/// [`ProjectConfig`] value during substitution.
pub const TOKEN_PROJECT_NAME: &str = "${jtech_base_project_name}$";
pub const TOKEN_APP_NAME: &str = "${jtech_base_app_name}$";
pub const TOKEN_DB_NAME: &str = "${jtech_base_db_name}$";
pub const TOKEN_DEV_URL: &str = "${jtech_base_dev_url}$";
pub const TOKEN_PROD_URL: &str = "${jtech_base_prod_url}$";
pub const TOKEN_DESCRIPTION: &str = "${jtech_base_description}$";

/// Raw values gathered from flags or prompts, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    pub project_name: String,
    pub app_name: Option<String>,
    pub db_name: Option<String>,
    pub dev_url: String,
    pub prod_url: Option<String>,
    pub description: Option<String>,
    pub target_dir: PathBuf,
    pub flutter_bin: Option<PathBuf>,
    /// `Some` when the flag path decided; `None` means "ask at the end".
    pub open_when_finish: Option<bool>,
}

/// Fully resolved project configuration.
///
/// Built exactly once by the input collector and passed by reference to
/// every downstream step; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Identifier-safe project name (`^[A-Za-z0-9_]+$`).
    pub project_name: String,
    /// Display name of the application; defaults to the project name.
    pub app_name: String,
    /// Identifier-safe database name; defaults to the project name.
    pub db_name: String,
    /// Development API endpoint (IP literal or http(s) URL).
    pub dev_url: String,
    /// Production API endpoint; defaults to the development endpoint.
    pub prod_url: String,
    /// Free-form description; defaults to the empty string.
    pub description: String,
    /// Directory the project is created under (already exists at this point).
    pub target_dir: PathBuf,
    /// `target_dir/project_name`.
    pub project_dir: PathBuf,
    /// Optional Flutter SDK bin directory; `None` means use `$PATH`.
    pub flutter_bin: Option<PathBuf>,
    /// Whether to reveal the project directory when done.
    pub open_when_finish: Option<bool>,
}

impl ProjectConfig {
    /// Apply the documented defaults: app name and db name fall back to the
    /// project name, the production URL falls back to the development URL,
    /// and the description falls back to empty.
    pub fn resolve(input: ProjectInput) -> Self {
        let project_dir = input.target_dir.join(&input.project_name);
        let app_name = input
            .app_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| input.project_name.clone());
        let db_name = input
            .db_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| input.project_name.clone());
        let prod_url = input
            .prod_url
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| input.dev_url.clone());

        Self {
            project_name: input.project_name,
            app_name,
            db_name,
            dev_url: input.dev_url,
            prod_url,
            description: input.description.unwrap_or_default(),
            target_dir: input.target_dir,
            project_dir,
            flutter_bin: input.flutter_bin,
            open_when_finish: input.open_when_finish,
        }
    }
}

/// The six token -> value pairs consumed by the substitution engine.
///
/// Built once from a resolved [`ProjectConfig`], never persisted.
#[derive(Debug, Clone)]
pub struct ReplacementMap {
    entries: Vec<(&'static str, String)>,
}

impl ReplacementMap {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            entries: vec![
                (TOKEN_PROJECT_NAME, config.project_name.clone()),
                (TOKEN_APP_NAME, config.app_name.clone()),
                (TOKEN_DB_NAME, config.db_name.clone()),
                (TOKEN_DEV_URL, config.dev_url.clone()),
                (TOKEN_PROD_URL, config.prod_url.clone()),
                (TOKEN_DESCRIPTION, config.description.clone()),
            ],
        }
    }

    /// Replace every occurrence of every token in `content`.
    ///
    /// Tokens are distinct literal markers, so the replacement order does
    /// not matter as long as no value contains a token itself.
    pub fn apply(&self, content: &str) -> String {
        self.entries
            .iter()
            .fold(content.to_string(), |acc, (token, value)| {
                acc.replace(token, value)
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
