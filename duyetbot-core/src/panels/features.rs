use crate::catalog::{AGENT_PROFILES, FEATURES, USAGE_TIPS};
use crate::models::{AgentProfile, FeatureRow};

/// Capability matrix with a keyboard cursor and an optional detail row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePanel {
    cursor: usize,
    selected: Option<usize>,
}

impl FeaturePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &'static [FeatureRow] {
        FEATURES
    }

    pub fn profiles(&self) -> &'static [AgentProfile] {
        AGENT_PROFILES
    }

    pub fn tips(&self) -> &'static [&'static str] {
        USAGE_TIPS
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&'static FeatureRow> {
        self.selected.and_then(|i| FEATURES.get(i))
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < FEATURES.len() {
            self.cursor += 1;
        }
    }

    /// Opens the detail view for row `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= FEATURES.len() {
            return false;
        }
        self.cursor = index;
        self.selected = Some(index);
        true
    }

    pub fn select_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }
}
