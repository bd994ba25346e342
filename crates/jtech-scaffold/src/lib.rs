//! jtech-scaffold - Shared library for the jtech_base project scaffolder
//!
//! This library holds everything the `jtech-create` binary does apart from
//! argument parsing: it copies the fixed `.template` tree into a new project
//! directory, substitutes the `${jtech_base_*}$` placeholder tokens, drives
//! the Flutter/Dart CLI for dependency setup and code generation, and
//! creates/configures the per-platform subprojects.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - template copying, placeholder
//!   substitution, SDK command execution, platform configuration
//! - **Layer 2: CLI/TUI Interface** - cliclack-based input collection and
//!   workflow orchestration (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module

pub mod config;
pub mod opener;
pub mod platform;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ProjectConfig, ProjectInput, ReplacementMap};
pub use platform::{Platform, PlatformConfig, PlatformSelection, WebRenderer};
pub use runtime::FlutterSdk;
pub use templates::{copy_template, replace_placeholders};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
