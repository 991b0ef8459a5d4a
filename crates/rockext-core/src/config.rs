//! Settings loading with precedence
//!
//! Settings are resolved from the following sources (low to high):
//! 1. Built-in defaults
//! 2. Global settings file (~/.rockext/config.yaml)
//! 3. Environment variables (ROCKEXT_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::merge::MergePolicy;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Settings file name inside the settings directory
pub const SETTINGS_FILE: &str = "config.yaml";

/// Enables experimental extensions when truthy
pub const ENV_ENABLE_EXPERIMENTAL: &str = "ROCKEXT_ENABLE_EXPERIMENTAL_EXTENSIONS";

/// Comma-separated list of additional accumulative properties
pub const ENV_ACCUMULATIVE_PROPERTIES: &str = "ROCKEXT_ACCUMULATIVE_PROPERTIES";

/// Resolved engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Allow extensions that are marked experimental for the target base
    pub enable_experimental: bool,

    /// Property names whose string values are concatenated on merge
    pub accumulative_properties: Vec<String>,
}

impl Settings {
    /// Build the merge policy described by these settings
    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy::with_accumulative(self.accumulative_properties.iter().cloned())
    }

    fn overlay(mut self, overlay: Settings) -> Settings {
        self.enable_experimental |= overlay.enable_experimental;
        for name in overlay.accumulative_properties {
            if !self.accumulative_properties.contains(&name) {
                self.accumulative_properties.push(name);
            }
        }
        self
    }
}

/// Settings hierarchy loader
pub struct SettingsLoader {
    /// Directory holding the settings file
    config_dir: Utf8PathBuf,
}

impl SettingsLoader {
    /// Create a loader for the standard settings directory (~/.rockext)
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: Self::default_config_dir()?,
        })
    }

    /// Create a loader with a custom settings directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn default_config_dir() -> Result<Utf8PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;
        Ok(home.join(".rockext"))
    }

    /// Load settings with hierarchical precedence
    pub fn load(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        let path = self.settings_path();
        if path.exists() {
            debug!("Loading settings from {}", path);
            let file_settings = Self::load_yaml_file(&path)?;
            settings = settings.overlay(file_settings);
        }

        Self::apply_env_overrides(settings)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<Settings> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(mut settings: Settings) -> Result<Settings> {
        if let Ok(val) = env::var(ENV_ENABLE_EXPERIMENTAL) {
            settings.enable_experimental = parse_flag(&val).ok_or_else(|| {
                Error::invalid_config(format!("{} must be a boolean flag", ENV_ENABLE_EXPERIMENTAL))
            })?;
        }

        if let Ok(val) = env::var(ENV_ACCUMULATIVE_PROPERTIES) {
            let extra = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            settings = settings.overlay(Settings {
                enable_experimental: false,
                accumulative_properties: extra,
            });
        }

        Ok(settings)
    }

    /// Path of the settings file
    pub fn settings_path(&self) -> Utf8PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
