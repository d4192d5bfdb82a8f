use tracing::debug;

use crate::error::DemoResult;
use crate::models::{BotConfig, ConfigPreviewDocument};

/// One editable row of the config form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Model,
    Temperature,
    MaxTokens,
    Streaming,
    Thinking,
    AgentRouting,
}

impl ConfigField {
    pub fn all() -> &'static [ConfigField] {
        &[
            ConfigField::Model,
            ConfigField::Temperature,
            ConfigField::MaxTokens,
            ConfigField::Streaming,
            ConfigField::Thinking,
            ConfigField::AgentRouting,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::Model => "Model",
            ConfigField::Temperature => "Temperature",
            ConfigField::MaxTokens => "Max Tokens",
            ConfigField::Streaming => "Streaming",
            ConfigField::Thinking => "Thinking Mode",
            ConfigField::AgentRouting => "Agent Routing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfigField::Model => "Language model used for replies",
            ConfigField::Temperature => "Lower is more focused, higher is more creative",
            ConfigField::MaxTokens => "Upper bound on reply length",
            ConfigField::Streaming => "Stream responses in real-time",
            ConfigField::Thinking => "Show reasoning process",
            ConfigField::AgentRouting => "Auto-route to specialized agents",
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            ConfigField::Streaming | ConfigField::Thinking | ConfigField::AgentRouting
        )
    }

    pub fn index(&self) -> usize {
        ConfigField::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> ConfigField {
        let all = ConfigField::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> ConfigField {
        let all = ConfigField::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPanel {
    config: BotConfig,
    focus: ConfigField,
}

impl Default for ConfigPanel {
    fn default() -> Self {
        Self {
            config: BotConfig::default(),
            focus: ConfigField::Model,
        }
    }
}

impl ConfigPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BotConfig {
        &mut self.config
    }

    pub fn focus(&self) -> ConfigField {
        self.focus
    }

    pub fn set_focus(&mut self, field: ConfigField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Steps the focused field by `delta`: cycles the model, moves a slider,
    /// or sets a toggle (positive on, negative off).
    pub fn adjust(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        match self.focus {
            ConfigField::Model => {
                self.config.model = if delta > 0 {
                    self.config.model.next()
                } else {
                    self.config.model.prev()
                };
            }
            ConfigField::Temperature => self.config.step_temperature(delta),
            ConfigField::MaxTokens => self.config.step_max_tokens(delta),
            ConfigField::Streaming => self.config.streaming = delta > 0,
            ConfigField::Thinking => self.config.thinking = delta > 0,
            ConfigField::AgentRouting => self.config.agent_routing = delta > 0,
        }
        debug!(field = ?self.focus, command = %self.config.command_line(), "Config changed");
    }

    /// Flips a toggle or advances the model; sliders are left alone.
    pub fn activate(&mut self) {
        match self.focus {
            ConfigField::Model => self.config.model = self.config.model.next(),
            ConfigField::Streaming => self.config.streaming = !self.config.streaming,
            ConfigField::Thinking => self.config.thinking = !self.config.thinking,
            ConfigField::AgentRouting => self.config.agent_routing = !self.config.agent_routing,
            ConfigField::Temperature | ConfigField::MaxTokens => {}
        }
    }

    pub fn reset(&mut self) {
        self.config.reset();
        debug!("Config reset to defaults");
    }

    pub fn preview(&self) -> ConfigPreviewDocument {
        self.config.preview()
    }

    pub fn preview_json(&self) -> DemoResult<String> {
        Ok(self.config.preview_json()?)
    }

    pub fn command_line(&self) -> String {
        self.config.command_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelId;

    #[test]
    fn test_focus_wraps() {
        let mut panel = ConfigPanel::new();
        panel.focus_prev();
        assert_eq!(panel.focus(), ConfigField::AgentRouting);
        panel.focus_next();
        assert_eq!(panel.focus(), ConfigField::Model);
    }

    #[test]
    fn test_temperature_preview_is_exact() {
        let mut panel = ConfigPanel::new();
        panel.config_mut().set_temperature(1.3);

        let json: serde_json::Value = serde_json::from_str(&panel.preview_json().unwrap()).unwrap();
        assert_eq!(json["parameters"]["temperature"].as_f64(), Some(1.3));
        assert!(panel.command_line().contains("temp=1.3"));
    }

    #[test]
    fn test_adjust_each_field() {
        let mut panel = ConfigPanel::new();

        panel.adjust(1);
        assert_eq!(panel.config().model, ModelId::Glm47Flash);

        panel.set_focus(ConfigField::Temperature);
        panel.adjust(-2);
        assert_eq!(panel.config().temperature(), 0.5);

        panel.set_focus(ConfigField::MaxTokens);
        panel.adjust(1);
        assert_eq!(panel.config().max_tokens(), 4608);

        panel.set_focus(ConfigField::Thinking);
        panel.adjust(1);
        assert!(panel.config().thinking);
        panel.activate();
        assert!(!panel.config().thinking);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut panel = ConfigPanel::new();
        panel.config_mut().model = ModelId::Glm47Reasoning;
        panel.config_mut().set_temperature(2.0);
        panel.config_mut().set_max_tokens(512);
        panel.config_mut().streaming = false;
        panel.config_mut().thinking = true;
        panel.config_mut().agent_routing = false;

        panel.reset();
        assert_eq!(panel.config(), &BotConfig::default());
    }

    #[test]
    fn test_activate_ignores_sliders() {
        let mut panel = ConfigPanel::new();
        panel.set_focus(ConfigField::MaxTokens);
        panel.activate();
        assert_eq!(panel.config(), &BotConfig::default());
    }
}
