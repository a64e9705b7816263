//! Configuration consumed by the bootstrapper.
//!
//! The host hands over a flat key/value [`Settings`] store. Typed values are
//! resolved once into a [`BootstrapConfig`] and passed explicitly to each
//! component; nothing reads configuration from ambient state.

pub mod keys;
mod settings;

pub use settings::Settings;

use regex::Regex;

use crate::error::{Error, Result};

/// How the root key is turned into the module key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Use the root key as-is.
    #[default]
    Safe,
    /// Deprecated: truncate the root key before its first `:`.
    Unsafe,
}

/// Settings used by [`ArtifactLocator`](crate::artifact::ArtifactLocator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Directory that overrides every discovered output path.
    pub output_path: Option<String>,
    /// Deprecated build configuration filter (e.g. `Debug`).
    pub build_configuration: Option<String>,
    /// Deprecated build platform filter (e.g. `AnyCPU`).
    pub build_platform: Option<String>,
}

impl LocatorConfig {
    /// Resolve the locator settings, honoring legacy keys.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            output_path: settings
                .get_with_fallback(keys::OUTPUT_PATH)
                .map(str::to_string),
            build_configuration: settings.get(keys::BUILD_CONFIGURATION).map(str::to_string),
            build_platform: settings.get(keys::BUILD_PLATFORM).map(str::to_string),
        }
    }
}

/// Typed view of every key the bootstrapper reads.
#[derive(Debug, Clone, Default)]
pub struct BootstrapConfig {
    pub skip: bool,
    pub solution: Option<String>,
    pub skipped_projects: Vec<String>,
    pub test_project_pattern: Option<String>,
    pub key_strategy: KeyStrategy,
    /// Whether the generic module discovery key is also set.
    pub modules_configured: bool,
    pub locator: LocatorConfig,
}

impl BootstrapConfig {
    /// Resolve all typed values.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            skip: settings.get_bool(keys::SKIP),
            solution: settings
                .get_with_fallback(keys::SOLUTION)
                .map(str::to_string),
            skipped_projects: settings
                .get(keys::SKIPPED_PROJECTS)
                .map(split_list)
                .unwrap_or_default(),
            test_project_pattern: settings
                .get(keys::TEST_PROJECT_PATTERN)
                .map(str::to_string),
            key_strategy: match settings.get(keys::PROJECT_KEY_STRATEGY) {
                Some("unsafe") => KeyStrategy::Unsafe,
                _ => KeyStrategy::Safe,
            },
            modules_configured: settings.has_key(keys::MODULES),
            locator: LocatorConfig::from_settings(settings),
        }
    }

    /// Whether an escaped project name is listed in the skip list.
    pub fn is_skipped(&self, escaped_name: &str) -> bool {
        self.skipped_projects.iter().any(|p| p == escaped_name)
    }

    /// Compile the test project pattern so that it must match whole names.
    ///
    /// Fails with [`Error::Configuration`] when the pattern is not a valid
    /// regular expression.
    pub fn test_project_regex(&self) -> Result<Option<Regex>> {
        self.test_project_pattern
            .as_deref()
            .map(compile_whole_match)
            .transpose()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn compile_whole_match(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        tracing::error!(
            "The syntax of the regular expression of the \"{}\" property is invalid: {}",
            keys::TEST_PROJECT_PATTERN,
            pattern
        );
        Error::Configuration {
            key: keys::TEST_PROJECT_PATTERN,
            message: e.to_string(),
        }
    })
}
