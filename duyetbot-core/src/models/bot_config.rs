//! The bot configuration record edited on the Config tab, and the preview
//! document derived from it.
//!
//! Numeric fields are stored in step units (tenths of a degree, blocks of
//! 512 tokens) so every value the preview reports is an exact slider stop.

use serde::{Deserialize, Serialize};

use crate::catalog::RUNTIME;

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 2.0;
pub const TEMPERATURE_STEP: f64 = 0.1;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

pub const MAX_TOKENS_MIN: u32 = 512;
pub const MAX_TOKENS_MAX: u32 = 8192;
pub const MAX_TOKENS_STEP: u32 = 512;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const TEMPERATURE_TENTHS_MAX: i32 = 20;
const DEFAULT_TEMPERATURE_TENTHS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "zai/glm-4.7")]
    Glm47,
    #[serde(rename = "zai/glm-4.7-flash")]
    Glm47Flash,
    #[serde(rename = "zai/glm-4.7-reasoning")]
    Glm47Reasoning,
}

impl ModelId {
    pub fn all() -> &'static [ModelId] {
        &[ModelId::Glm47, ModelId::Glm47Flash, ModelId::Glm47Reasoning]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Glm47 => "zai/glm-4.7",
            ModelId::Glm47Flash => "zai/glm-4.7-flash",
            ModelId::Glm47Reasoning => "zai/glm-4.7-reasoning",
        }
    }

    pub fn next(&self) -> ModelId {
        let models = ModelId::all();
        let idx = models.iter().position(|m| m == self).unwrap_or(0);
        models[(idx + 1) % models.len()]
    }

    pub fn prev(&self) -> ModelId {
        let models = ModelId::all();
        let idx = models.iter().position(|m| m == self).unwrap_or(0);
        models[(idx + models.len() - 1) % models.len()]
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::all()[0]
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub model: ModelId,
    temperature_tenths: u8,
    max_tokens: u32,
    pub streaming: bool,
    pub thinking: bool,
    pub agent_routing: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            temperature_tenths: DEFAULT_TEMPERATURE_TENTHS,
            max_tokens: DEFAULT_MAX_TOKENS,
            streaming: true,
            thinking: false,
            agent_routing: true,
        }
    }
}

impl BotConfig {
    pub fn temperature(&self) -> f64 {
        f64::from(self.temperature_tenths) / 10.0
    }

    /// Snaps to the nearest 0.1 and clamps to [0.0, 2.0]. Non-finite input is ignored.
    pub fn set_temperature(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let tenths = (value * 10.0).round().clamp(0.0, f64::from(TEMPERATURE_TENTHS_MAX));
        self.temperature_tenths = tenths as u8;
    }

    pub fn step_temperature(&mut self, steps: i32) {
        let tenths = (i32::from(self.temperature_tenths) + steps).clamp(0, TEMPERATURE_TENTHS_MAX);
        self.temperature_tenths = tenths as u8;
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Snaps to the nearest multiple of 512 and clamps to [512, 8192].
    pub fn set_max_tokens(&mut self, value: u32) {
        let snapped = value.saturating_add(MAX_TOKENS_STEP / 2) / MAX_TOKENS_STEP * MAX_TOKENS_STEP;
        self.max_tokens = snapped.clamp(MAX_TOKENS_MIN, MAX_TOKENS_MAX);
    }

    pub fn step_max_tokens(&mut self, steps: i32) {
        let current = i64::from(self.max_tokens);
        let next = current + i64::from(steps) * i64::from(MAX_TOKENS_STEP);
        let clamped = next.clamp(i64::from(MAX_TOKENS_MIN), i64::from(MAX_TOKENS_MAX));
        self.max_tokens = clamped as u32;
    }

    /// Slider position in [0, 1], used for rendering.
    pub fn temperature_ratio(&self) -> f64 {
        f64::from(self.temperature_tenths) / f64::from(TEMPERATURE_TENTHS_MAX)
    }

    pub fn max_tokens_ratio(&self) -> f64 {
        f64::from(self.max_tokens - MAX_TOKENS_MIN) / f64::from(MAX_TOKENS_MAX - MAX_TOKENS_MIN)
    }

    pub fn reset(&mut self) {
        *self = BotConfig::default();
    }

    pub fn preview(&self) -> ConfigPreviewDocument {
        ConfigPreviewDocument {
            agent: "main",
            model: self.model,
            parameters: Parameters {
                temperature: self.temperature(),
                max_tokens: self.max_tokens,
            },
            capabilities: Capabilities {
                streaming: self.streaming,
                thinking: self.thinking,
                agent_routing: self.agent_routing,
            },
            runtime: RUNTIME,
        }
    }

    pub fn preview_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.preview())
    }

    pub fn command_line(&self) -> String {
        format!(
            "agent=main | model={} | temp={} | tokens={}",
            self.model,
            self.temperature(),
            self.max_tokens
        )
    }
}

/// Serialized preview; field order is the order shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPreviewDocument {
    pub agent: &'static str,
    pub model: ModelId,
    pub parameters: Parameters,
    pub capabilities: Capabilities,
    pub runtime: RuntimeInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub streaming: bool,
    pub thinking: bool,
    pub agent_routing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub host: &'static str,
    pub node: &'static str,
    pub shell: &'static str,
    #[serde(skip)]
    pub channel: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.model, ModelId::Glm47);
        assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens(), DEFAULT_MAX_TOKENS);
        assert!(config.streaming);
        assert!(!config.thinking);
        assert!(config.agent_routing);
    }

    #[test]
    fn test_model_cycle() {
        assert_eq!(ModelId::Glm47.next(), ModelId::Glm47Flash);
        assert_eq!(ModelId::Glm47Reasoning.next(), ModelId::Glm47);
        assert_eq!(ModelId::Glm47.prev(), ModelId::Glm47Reasoning);
    }

    #[test]
    fn test_temperature_snaps_and_clamps() {
        let mut config = BotConfig::default();

        config.set_temperature(1.3);
        assert_eq!(config.temperature(), 1.3);

        config.set_temperature(1.26);
        assert_eq!(config.temperature(), 1.3);

        config.set_temperature(5.0);
        assert_eq!(config.temperature(), TEMPERATURE_MAX);

        config.set_temperature(-1.0);
        assert_eq!(config.temperature(), TEMPERATURE_MIN);

        config.set_temperature(f64::NAN);
        assert_eq!(config.temperature(), TEMPERATURE_MIN);
    }

    #[test]
    fn test_temperature_steps_are_exact() {
        let mut config = BotConfig::default();
        config.step_temperature(6);
        assert_eq!(config.temperature(), 1.3);

        config.step_temperature(100);
        assert_eq!(config.temperature(), 2.0);

        config.step_temperature(-100);
        assert_eq!(config.temperature(), 0.0);
    }

    #[test]
    fn test_max_tokens_bounds() {
        let mut config = BotConfig::default();

        config.set_max_tokens(1000);
        assert_eq!(config.max_tokens(), 1024);

        config.set_max_tokens(0);
        assert_eq!(config.max_tokens(), MAX_TOKENS_MIN);

        config.set_max_tokens(u32::MAX);
        assert_eq!(config.max_tokens(), MAX_TOKENS_MAX);

        config.step_max_tokens(-1);
        assert_eq!(config.max_tokens(), 8192 - 512);

        config.step_max_tokens(-100);
        assert_eq!(config.max_tokens(), MAX_TOKENS_MIN);
    }

    #[test]
    fn test_preview_json_layout() {
        let config = BotConfig::default();
        let json = config.preview_json().unwrap();

        let agent = json.find("\"agent\"").unwrap();
        let model = json.find("\"model\"").unwrap();
        let params = json.find("\"parameters\"").unwrap();
        let caps = json.find("\"capabilities\"").unwrap();
        let runtime = json.find("\"runtime\"").unwrap();
        assert!(agent < model && model < params && params < caps && caps < runtime);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"], "zai/glm-4.7");
        assert_eq!(value["parameters"]["max_tokens"], 4096);
        assert_eq!(value["capabilities"]["agent_routing"], true);
        assert_eq!(value["runtime"]["host"], "openclaw");
        assert!(value["runtime"].get("channel").is_none());
    }

    #[test]
    fn test_command_line() {
        let mut config = BotConfig::default();
        assert_eq!(
            config.command_line(),
            "agent=main | model=zai/glm-4.7 | temp=0.7 | tokens=4096"
        );

        config.model = ModelId::Glm47Flash;
        config.set_temperature(1.0);
        config.set_max_tokens(512);
        assert_eq!(
            config.command_line(),
            "agent=main | model=zai/glm-4.7-flash | temp=1 | tokens=512"
        );
    }

    #[test]
    fn test_ratios() {
        let mut config = BotConfig::default();
        config.set_temperature(2.0);
        config.set_max_tokens(512);
        assert_eq!(config.temperature_ratio(), 1.0);
        assert_eq!(config.max_tokens_ratio(), 0.0);
    }
}
