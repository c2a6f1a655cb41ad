//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/navtree/navtree.toml`
//! 3. Local config: `<descriptor_dir>/.navtree.toml`
//! 4. Environment variables: `NAVTREE_*` prefix
//!
//! Settings only supply defaults; values in a site descriptor always win.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for navtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URI for sites whose descriptor has none
    pub base_uri: Option<String>,
    /// Priority for sites whose descriptor has none
    pub priority: i32,
    /// Show resolved URIs when printing trees
    pub show_uris: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_uri: None,
            priority: 1,
            show_uris: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_uri: Option<String>,
    pub priority: Option<i32>,
    pub show_uris: Option<bool>,
}

/// Get the XDG config directory for navtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "navtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("navtree.toml"))
}

/// Get the path to the local config file next to site descriptors.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".navtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_uri: overlay.base_uri.clone().or_else(|| self.base_uri.clone()),
            priority: overlay.priority.unwrap_or(self.priority),
            show_uris: overlay.show_uris.unwrap_or(self.show_uris),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.navtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local_dir)
    }

    /// Same as [`load`](Self::load) with an explicit global config file.
    pub fn load_layers(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply NAVTREE_* environment variables as explicit overrides.
    ///
    /// `NAVTREE_BASE_URI`, `NAVTREE_PRIORITY` and `NAVTREE_SHOW_URIS` replace
    /// whatever the file layers produced.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NAVTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_uri") {
            settings.base_uri = Some(val);
        }
        if let Ok(val) = config.get_int("priority") {
            settings.priority = i32::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("NAVTREE_PRIORITY out of range: {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("show_uris") {
            settings.show_uris = val;
        }

        Ok(settings)
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_overlay_when_merging_then_specified_values_win() {
        let base = Settings::default();
        let overlay = RawSettings {
            base_uri: Some("/portal/classic".into()),
            priority: None,
            show_uris: Some(true),
        };

        let merged = base.merge_with(&overlay);
        assert_eq!(merged.base_uri.as_deref(), Some("/portal/classic"));
        assert_eq!(merged.priority, 1);
        assert!(merged.show_uris);
    }

    #[test]
    fn given_settings_when_rendering_toml_then_contains_fields() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("priority = 1"));
        assert!(rendered.contains("show_uris = false"));
    }
}
