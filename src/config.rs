//! Configuration management for termkit.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl ToolkitConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.termkit.toml in project root)
        if let Some(root) = project_root {
            let project_config = root.join(".termkit.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/termkit/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "termkit", "termkit") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (TERMKIT__*)
        builder = builder.add_source(
            Environment::with_prefix("TERMKIT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration with default settings only
    pub fn load_defaults() -> Self {
        Self::default()
    }
}

/// Frame dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Compositor frame width in character cells
    #[serde(default = "default_width")]
    pub width: usize,
    /// Outer margin applied on both sides of every line
    #[serde(default = "default_margin")]
    pub margin: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            margin: default_margin(),
        }
    }
}

fn default_width() -> usize {
    76
}

fn default_margin() -> usize {
    2
}

/// Keyboard behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Enable vim-style letter keys (j/k/h/l) alongside the arrow keys
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            vim_navigation: default_vim_navigation(),
        }
    }
}

fn default_vim_navigation() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolkitConfig::default();
        assert_eq!(config.display.width, 76);
        assert_eq!(config.display.margin, 2);
        assert!(config.input.vim_navigation);
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".termkit.toml"),
            "[display]\nwidth = 40\n",
        )
        .unwrap();

        let config = ToolkitConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.display.width, 40);
        // Untouched keys keep their defaults.
        assert_eq!(config.display.margin, 2);
    }
}
