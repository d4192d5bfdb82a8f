use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::panels::Tab;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub logging: LoggingConfig,
    pub tui: TuiConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,

    /// Empty means `<cache_dir>/duyetbot/duyetbot.log`.
    #[serde(default)]
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TuiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_true")]
    pub mouse_enabled: bool,

    #[serde(default = "default_initial_tab")]
    pub initial_tab: String,
}

/// Delays and periods of every simulated timer in the demo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_reply_min")]
    pub chat_reply_min_ms: u64,

    #[serde(default = "default_reply_max")]
    pub chat_reply_max_ms: u64,

    #[serde(default = "default_five_secs")]
    pub status_refresh_secs: u64,

    #[serde(default = "default_five_secs")]
    pub carousel_interval_secs: u64,

    #[serde(default = "default_banner_secs")]
    pub feedback_banner_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

fn default_theme() -> String {
    "Tokyo Night".to_string()
}

fn default_true() -> bool {
    true
}

fn default_initial_tab() -> String {
    Tab::Playground.id().to_string()
}

fn default_reply_min() -> u64 {
    1000
}

fn default_reply_max() -> u64 {
    2000
}

fn default_five_secs() -> u64 {
    5
}

fn default_banner_secs() -> u64 {
    3
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: String::new(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme(),
            mouse_enabled: true,
            initial_tab: default_initial_tab(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chat_reply_min_ms: default_reply_min(),
            chat_reply_max_ms: default_reply_max(),
            status_refresh_secs: default_five_secs(),
            carousel_interval_secs: default_five_secs(),
            feedback_banner_secs: default_banner_secs(),
        }
    }
}

impl TimingConfig {
    pub fn chat_reply_range_ms(&self) -> RangeInclusive<u64> {
        self.chat_reply_min_ms..=self.chat_reply_max_ms
    }

    pub fn status_refresh(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_secs(self.carousel_interval_secs)
    }

    pub fn feedback_banner(&self) -> Duration {
        Duration::from_secs(self.feedback_banner_secs)
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// The configured start tab; falls back to the playground if unparseable.
    pub fn initial_tab(&self) -> Tab {
        self.initial_tab.parse().unwrap_or(Tab::Playground)
    }
}

impl DemoConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("DUYETBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut demo_config: DemoConfig = config.try_deserialize()?;

        if let Ok(level) = std::env::var("DUYETBOT_LOG_LEVEL") {
            demo_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            demo_config.logging.level = level;
        }

        demo_config.validate()?;
        Ok(demo_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let timing = &self.timing;

        if timing.chat_reply_min_ms > timing.chat_reply_max_ms {
            return Err(ConfigLoadError::InvalidValue {
                key: "timing.chat_reply_min_ms".to_string(),
                message: "Cannot be greater than chat_reply_max_ms".to_string(),
            });
        }

        for (key, value) in [
            ("timing.status_refresh_secs", timing.status_refresh_secs),
            ("timing.carousel_interval_secs", timing.carousel_interval_secs),
            ("timing.feedback_banner_secs", timing.feedback_banner_secs),
            ("tui.tick_rate_ms", self.tui.tick_rate_ms),
        ] {
            if value == 0 {
                return Err(ConfigLoadError::InvalidValue {
                    key: key.to_string(),
                    message: "Must be greater than 0".to_string(),
                });
            }
        }

        if self.tui.initial_tab.parse::<Tab>().is_err() {
            return Err(ConfigLoadError::InvalidValue {
                key: "tui.initial_tab".to_string(),
                message: format!(
                    "Unknown tab '{}'. Must be one of: {:?}",
                    self.tui.initial_tab,
                    Tab::all().iter().map(|t| t.id()).collect::<Vec<_>>()
                ),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Resolved log file location.
    pub fn log_file_path(&self) -> PathBuf {
        if !self.logging.file_path.is_empty() {
            return PathBuf::from(&self.logging.file_path);
        }
        get_cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duyetbot.log")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("duyetbot.toml"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".duyetbot").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
        paths.push(cwd.join(".env.local"));
    }
    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join(".env"));
    }

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("duyetbot"))
}

pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("duyetbot"))
}

pub fn ensure_config_dir() -> Result<PathBuf, std::io::Error> {
    ensure_dir(get_config_dir(), "config")
}

pub fn ensure_cache_dir() -> Result<PathBuf, std::io::Error> {
    ensure_dir(get_cache_dir(), "cache")
}

fn ensure_dir(dir: Option<PathBuf>, kind: &str) -> Result<PathBuf, std::io::Error> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Could not determine {} directory", kind),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}
