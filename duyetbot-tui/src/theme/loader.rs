use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ThemeManager;

/// Contents of `theme.toml`: the last theme picked in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub theme: String,
}

pub struct ThemeLoader {
    config_path: PathBuf,
}

impl ThemeLoader {
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duyetbot")
            .join("theme.toml")
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// `Ok(None)` when no theme has been saved yet.
    pub fn load(&self) -> Result<Option<ThemeConfig>> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read theme config from {:?}", self.config_path))?;

        toml::from_str(&contents)
            .map(Some)
            .with_context(|| format!("Failed to parse theme config from {:?}", self.config_path))
    }

    pub fn save_theme_name(&self, theme_name: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let config = ThemeConfig {
            theme: theme_name.to_string(),
        };
        let contents =
            toml::to_string_pretty(&config).context("Failed to serialize theme config")?;

        fs::write(&self.config_path, contents)
            .with_context(|| format!("Failed to write theme config to {:?}", self.config_path))
    }

    /// Picks the saved theme, else `configured`, else the first built-in.
    pub fn initialize_theme_manager(&self, configured: &str) -> ThemeManager {
        let mut manager = ThemeManager::new();
        let saved = match self.load() {
            Ok(saved) => saved.map(|c| c.theme),
            Err(e) => {
                tracing::warn!("{:#}", e);
                None
            }
        };
        let theme_name = saved.as_deref().unwrap_or(configured);

        if !manager.set_theme_by_name(theme_name) {
            tracing::warn!(
                "Theme '{}' not found, using default '{}'",
                theme_name,
                manager.current_theme_name()
            );
        }

        manager
    }
}

impl Default for ThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}
