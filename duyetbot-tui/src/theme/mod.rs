mod loader;
mod palettes;
mod styles;

pub use loader::{ThemeConfig, ThemeLoader};
pub use palettes::{hex_to_color, ColorPalette, BUILTIN_PALETTES, DUYET_LIGHT, NORD, TOKYO_NIGHT};
pub use styles::ThemedStyles;

use ratatui::style::Color;

pub trait Theme: Send + Sync {
    fn name(&self) -> &'static str;

    fn background(&self) -> Color;
    fn foreground(&self) -> Color;
    fn foreground_dim(&self) -> Color;

    fn surface(&self) -> Color;
    fn border(&self) -> Color;
    fn selection(&self) -> Color;

    fn accent(&self) -> Color;
    fn accent_secondary(&self) -> Color;

    fn success(&self) -> Color;
    fn warning(&self) -> Color;
    fn error(&self) -> Color;
    fn info(&self) -> Color;
}

pub struct ThemeManager {
    themes: Vec<Box<dyn Theme>>,
    current_index: usize,
}

impl ThemeManager {
    pub fn new() -> Self {
        let themes = BUILTIN_PALETTES
            .iter()
            .map(|palette| Box::new(*palette) as Box<dyn Theme>)
            .collect();

        Self {
            themes,
            current_index: 0,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.themes[self.current_index].as_ref()
    }

    pub fn cycle_theme(&mut self) {
        self.current_index = (self.current_index + 1) % self.themes.len();
    }

    /// Case-insensitive lookup. Returns false and keeps the current theme
    /// when no theme has that name.
    pub fn set_theme_by_name(&mut self, name: &str) -> bool {
        let wanted = name.trim();
        match self
            .themes
            .iter()
            .position(|t| t.name().eq_ignore_ascii_case(wanted))
        {
            Some(index) => {
                self.current_index = index;
                true
            }
            None => false,
        }
    }

    pub fn available_themes(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.name()).collect()
    }

    pub fn current_theme_name(&self) -> &'static str {
        self.current_theme().name()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut manager = ThemeManager::new();
        let count = manager.available_themes().len();
        let first = manager.current_theme_name();
        for _ in 0..count {
            manager.cycle_theme();
        }
        assert_eq!(manager.current_theme_name(), first);
    }

    #[test]
    fn test_set_theme_by_name() {
        let mut manager = ThemeManager::new();
        assert!(manager.set_theme_by_name("duyet light"));
        assert_eq!(manager.current_theme_name(), "Duyet Light");
        assert_eq!(manager.current_theme().accent(), Color::Rgb(0x25, 0x63, 0xeb));

        assert!(!manager.set_theme_by_name("Solarized"));
        assert_eq!(manager.current_theme_name(), "Duyet Light");
    }
}
