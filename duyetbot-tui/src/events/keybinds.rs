use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use duyetbot_core::Tab;
use serde::{Deserialize, Serialize};

use super::handler::Action;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub code: SerializableKeyCode,
    #[serde(default)]
    pub modifiers: SerializableKeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code: SerializableKeyCode(code),
            modifiers: SerializableKeyModifiers::default(),
        }
    }

    pub fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code: SerializableKeyCode(code),
            modifiers: SerializableKeyModifiers(KeyModifiers::CONTROL),
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.0.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.0.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        parts.push(key_label(self.code.0));
        parts.join("+")
    }
}

/// Key code stored as `Char(x)`, `Enter`, `F5`, ... in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializableKeyCode(pub KeyCode);

impl Serialize for SerializableKeyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self.0 {
            KeyCode::Char(c) => format!("Char({})", c),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for SerializableKeyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_key_code(&s)
            .map(SerializableKeyCode)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid key code '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializableKeyModifiers(pub KeyModifiers);

impl Default for SerializableKeyModifiers {
    fn default() -> Self {
        Self(KeyModifiers::NONE)
    }
}

impl Serialize for SerializableKeyModifiers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut parts = Vec::new();
        if self.0.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.0.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if parts.is_empty() {
            parts.push("None");
        }
        serializer.serialize_str(&parts.join("+"))
    }
}

impl<'de> Deserialize<'de> for SerializableKeyModifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SerializableKeyModifiers(parse_modifiers(&s)))
    }
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix("Char(").and_then(|rest| rest.strip_suffix(')')) {
        let mut chars = inner.chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeyCode::Char(c));
    }
    if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
        return Some(KeyCode::F(n));
    }
    match s {
        "Tab" => Some(KeyCode::Tab),
        "BackTab" => Some(KeyCode::BackTab),
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "Backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

fn parse_modifiers(s: &str) -> KeyModifiers {
    s.split('+')
        .fold(KeyModifiers::NONE, |acc, part| match part.trim() {
            "Ctrl" | "Control" => acc | KeyModifiers::CONTROL,
            "Alt" => acc | KeyModifiers::ALT,
            _ => acc,
        })
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    }
}

/// User-editable key table, stored at `<config_dir>/duyetbot/keybinds.toml`.
/// Missing entries fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindConfig {
    pub quit: Vec<KeyBinding>,
    pub next_tab: Vec<KeyBinding>,
    pub prev_tab: Vec<KeyBinding>,
    pub tab_playground: Vec<KeyBinding>,
    pub tab_status: Vec<KeyBinding>,
    pub tab_features: Vec<KeyBinding>,
    pub tab_config: Vec<KeyBinding>,
    pub tab_feedback: Vec<KeyBinding>,
    pub up: Vec<KeyBinding>,
    pub down: Vec<KeyBinding>,
    pub left: Vec<KeyBinding>,
    pub right: Vec<KeyBinding>,
    pub select: Vec<KeyBinding>,
    pub toggle: Vec<KeyBinding>,
    pub back: Vec<KeyBinding>,
    pub close_detail: Vec<KeyBinding>,
    pub start_editing: Vec<KeyBinding>,
    pub reset: Vec<KeyBinding>,
    pub toggle_auto_refresh: Vec<KeyBinding>,
    pub previous_slide: Vec<KeyBinding>,
    pub next_slide: Vec<KeyBinding>,
    pub toggle_theme: Vec<KeyBinding>,
    pub help: Vec<KeyBinding>,
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            quit: vec![
                KeyBinding::char('q'),
                KeyBinding::with_ctrl(KeyCode::Char('c')),
            ],
            next_tab: vec![KeyBinding::new(KeyCode::Tab)],
            prev_tab: vec![KeyBinding::new(KeyCode::BackTab)],
            tab_playground: vec![KeyBinding::char('1')],
            tab_status: vec![KeyBinding::char('2')],
            tab_features: vec![KeyBinding::char('3')],
            tab_config: vec![KeyBinding::char('4')],
            tab_feedback: vec![KeyBinding::char('5')],
            up: vec![KeyBinding::char('k'), KeyBinding::new(KeyCode::Up)],
            down: vec![KeyBinding::char('j'), KeyBinding::new(KeyCode::Down)],
            left: vec![KeyBinding::char('h'), KeyBinding::new(KeyCode::Left)],
            right: vec![KeyBinding::char('l'), KeyBinding::new(KeyCode::Right)],
            select: vec![KeyBinding::new(KeyCode::Enter)],
            toggle: vec![KeyBinding::char(' ')],
            back: vec![KeyBinding::new(KeyCode::Esc)],
            close_detail: vec![KeyBinding::char('x')],
            start_editing: vec![KeyBinding::char('i')],
            reset: vec![KeyBinding::char('r')],
            toggle_auto_refresh: vec![KeyBinding::char('p')],
            previous_slide: vec![KeyBinding::char('[')],
            next_slide: vec![KeyBinding::char(']')],
            toggle_theme: vec![KeyBinding::char('t')],
            help: vec![KeyBinding::char('?')],
        }
    }
}

impl KeybindConfig {
    /// Every entry with the action it triggers and its help text, in help order.
    pub fn entries(&self) -> Vec<(&[KeyBinding], Action, &'static str)> {
        vec![
            (&self.quit[..], Action::Quit, "Quit"),
            (&self.next_tab[..], Action::NextTab, "Next tab"),
            (&self.prev_tab[..], Action::PrevTab, "Previous tab"),
            (
                &self.tab_playground[..],
                Action::GoToTab(Tab::Playground),
                "Chat Playground",
            ),
            (&self.tab_status[..], Action::GoToTab(Tab::Status), "System Status"),
            (&self.tab_features[..], Action::GoToTab(Tab::Features), "Features"),
            (&self.tab_config[..], Action::GoToTab(Tab::Config), "Config"),
            (&self.tab_feedback[..], Action::GoToTab(Tab::Feedback), "Feedback"),
            (&self.up[..], Action::Up, "Move up"),
            (&self.down[..], Action::Down, "Move down"),
            (&self.left[..], Action::Left, "Decrease / previous"),
            (&self.right[..], Action::Right, "Increase / next"),
            (&self.select[..], Action::Select, "Select / activate"),
            (&self.toggle[..], Action::Toggle, "Toggle"),
            (&self.back[..], Action::Back, "Back / close"),
            (&self.close_detail[..], Action::CloseDetail, "Close detail"),
            (&self.start_editing[..], Action::StartEditing, "Start typing"),
            (&self.reset[..], Action::Reset, "Reset config"),
            (
                &self.toggle_auto_refresh[..],
                Action::ToggleAutoRefresh,
                "Pause / resume status refresh",
            ),
            (&self.previous_slide[..], Action::PreviousSlide, "Previous testimonial"),
            (&self.next_slide[..], Action::NextSlide, "Next testimonial"),
            (&self.toggle_theme[..], Action::ToggleTheme, "Cycle theme"),
            (&self.help[..], Action::Help, "Show/hide help"),
        ]
    }
}

pub struct Keybinds {
    config: KeybindConfig,
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self::new()
    }
}

impl Keybinds {
    pub fn new() -> Self {
        Self::from_config(KeybindConfig::default())
    }

    pub fn from_config(config: KeybindConfig) -> Self {
        let mut keybinds = Self {
            config,
            bindings: HashMap::new(),
        };
        keybinds.rebuild_bindings();
        keybinds
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keybinds from {:?}", path))?;
        let config: KeybindConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse keybinds from {:?}", path))?;
        Ok(Self::from_config(config))
    }

    pub fn load_or_default() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from_file(&config_path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load keybinds config: {:#}. Using defaults.", e);
                Self::new()
            })
        } else {
            Self::new()
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duyetbot")
            .join("keybinds.toml")
    }

    fn rebuild_bindings(&mut self) {
        let mut bindings = HashMap::new();
        for (keys, action, _) in self.config.entries() {
            for kb in keys {
                bindings.insert((kb.code.0, kb.modifiers.0), action.clone());
            }
        }
        self.bindings = bindings;
    }

    pub fn get(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<&Action> {
        self.bindings.get(&(code, modifiers))
    }

    pub fn config(&self) -> &KeybindConfig {
        &self.config
    }

    /// Display string for the keys bound to `action`, e.g. `k / ↑`.
    pub fn keys_for(&self, action: &Action) -> String {
        self.config
            .entries()
            .into_iter()
            .filter(|(_, a, _)| a == action)
            .flat_map(|(keys, _, _)| keys.iter().map(KeyBinding::display))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// (keys, description) pairs for the help modal.
    pub fn help_rows(&self) -> Vec<(String, &'static str)> {
        self.config
            .entries()
            .into_iter()
            .map(|(keys, _, desc)| {
                let keys = keys
                    .iter()
                    .map(KeyBinding::display)
                    .collect::<Vec<_>>()
                    .join(" / ");
                (keys, desc)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_keybinds() {
        let keybinds = Keybinds::new();

        assert_eq!(
            keybinds.get(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(&Action::Quit)
        );
        assert_eq!(
            keybinds.get(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(&Action::Quit)
        );
        assert_eq!(
            keybinds.get(KeyCode::Char('3'), KeyModifiers::NONE),
            Some(&Action::GoToTab(Tab::Features))
        );
        assert_eq!(keybinds.get(KeyCode::Char('z'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_keybinding_serialization() {
        let serialized = toml::to_string(&KeyBinding::char('q')).unwrap();
        assert!(serialized.contains("Char(q)"));

        let serialized_ctrl = toml::to_string(&KeyBinding::with_ctrl(KeyCode::Char('c'))).unwrap();
        assert!(serialized_ctrl.contains("Ctrl"));
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("keybinds.toml");

        let mut config = KeybindConfig::default();
        config.quit = vec![KeyBinding::char('Q')];
        Keybinds::from_config(config.clone()).save_to_file(&path).unwrap();

        let loaded = Keybinds::load_from_file(&path).unwrap();
        assert_eq!(loaded.config(), &config);
        assert_eq!(
            loaded.get(KeyCode::Char('Q'), KeyModifiers::NONE),
            Some(&Action::Quit)
        );
        assert_eq!(loaded.get(KeyCode::Char('q'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keybinds.toml");
        std::fs::write(&path, "help = [{ code = \"F1\" }]\n").unwrap();

        let loaded = Keybinds::load_from_file(&path).unwrap();
        assert_eq!(
            loaded.get(KeyCode::F(1), KeyModifiers::NONE),
            Some(&Action::Help)
        );
        assert_eq!(
            loaded.get(KeyCode::Tab, KeyModifiers::NONE),
            Some(&Action::NextTab)
        );
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keybinds.toml");
        std::fs::write(&path, "quit = [{ code = \"Banana\" }]\n").unwrap();

        assert!(Keybinds::load_from_file(&path).is_err());
    }

    #[test]
    fn test_parse_key_code() {
        assert_eq!(parse_key_code("Char(q)"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key_code("Char( )"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key_code("Char(ab)"), None);
        assert_eq!(parse_key_code("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key_code("F12"), Some(KeyCode::F(12)));
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(parse_modifiers("None"), KeyModifiers::NONE);
        assert_eq!(
            parse_modifiers("Ctrl+Alt"),
            KeyModifiers::CONTROL | KeyModifiers::ALT
        );
    }

    #[test]
    fn test_keys_for() {
        let keybinds = Keybinds::new();
        assert_eq!(keybinds.keys_for(&Action::Up), "k / ↑");
        assert_eq!(keybinds.keys_for(&Action::Toggle), "Space");
        assert_eq!(keybinds.keys_for(&Action::Quit), "q / Ctrl+c");
        assert!(keybinds
            .help_rows()
            .iter()
            .any(|(_, desc)| *desc == "Cycle theme"));
    }
}
