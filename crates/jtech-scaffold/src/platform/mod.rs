//! Target platforms and their configuration records

pub mod configure;
pub mod patch;

use std::fmt;

pub use configure::configure_platforms;
pub use patch::patch_field;

/// Supported target platforms, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Web,
    Windows,
    Macos,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Android,
        Platform::Ios,
        Platform::Web,
        Platform::Windows,
        Platform::Macos,
        Platform::Linux,
    ];

    /// Lowercase token used for flags, `flutter create --platforms=` and
    /// the subdirectory name.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
            Platform::Web => "Web",
            Platform::Windows => "Windows",
            Platform::Macos => "macOS",
            Platform::Linux => "Linux",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Platform> {
        Platform::ALL
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(tag.trim()))
    }

    /// 1-based index into the interactive menu.
    pub fn from_menu_index(index: usize) -> Option<Platform> {
        (1..=Platform::ALL.len())
            .contains(&index)
            .then(|| Platform::ALL[index - 1])
    }

    /// Whether the platform carries a reverse-domain identifier (Android
    /// package name, iOS/macOS bundle id).
    pub fn has_org_id(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios | Platform::Macos)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Web renderer choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebRenderer {
    Html,
    CanvasKit,
}

impl WebRenderer {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebRenderer::Html => "html",
            WebRenderer::CanvasKit => "canvaskit",
        }
    }

    pub fn parse(value: &str) -> Option<WebRenderer> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Some(WebRenderer::Html),
            "canvaskit" => Some(WebRenderer::CanvasKit),
            _ => None,
        }
    }
}

/// Source language forwarded to `flutter create` for fresh subprojects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateLanguage {
    Kotlin,
    Java,
    Swift,
    ObjectiveC,
}

impl CreateLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreateLanguage::Kotlin => "kotlin",
            CreateLanguage::Java => "java",
            CreateLanguage::Swift => "swift",
            CreateLanguage::ObjectiveC => "objc",
        }
    }

    pub fn parse_android(value: &str) -> Option<CreateLanguage> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kotlin" => Some(CreateLanguage::Kotlin),
            "java" => Some(CreateLanguage::Java),
            _ => None,
        }
    }

    pub fn parse_ios(value: &str) -> Option<CreateLanguage> {
        match value.trim().to_ascii_lowercase().as_str() {
            "swift" => Some(CreateLanguage::Swift),
            "objective-c" | "objc" => Some(CreateLanguage::ObjectiveC),
            _ => None,
        }
    }
}

/// Per-platform configuration record.
///
/// All fields are optional: a platform selected without extra input keeps
/// an empty record and only gets its subproject created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Reverse-domain identifier: package name (Android) or bundle id
    /// (iOS/macOS).
    pub org_id: Option<String>,
    /// Renderer choice, Web only. Informational: printed, never written.
    pub renderer: Option<WebRenderer>,
    /// Language forwarded to `flutter create`, Android/iOS only.
    pub language: Option<CreateLanguage>,
}

/// Ordered platform -> config mapping; iteration order is selection order.
#[derive(Debug, Clone, Default)]
pub struct PlatformSelection {
    entries: Vec<(Platform, PlatformConfig)>,
}

impl PlatformSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a platform's configuration, keeping first-selection
    /// order for platforms named twice.
    pub fn insert(&mut self, platform: Platform, config: PlatformConfig) {
        match self.entries.iter_mut().find(|(p, _)| *p == platform) {
            Some((_, existing)) => *existing = config,
            None => self.entries.push((platform, config)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Platform, PlatformConfig)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
