use serde::Serialize;

/// Feature coverage of one agent profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    Yes,
    Partial,
    No,
}

impl SupportKind {
    pub fn label(&self) -> &'static str {
        match self {
            SupportKind::Yes => "Yes",
            SupportKind::Partial => "Partial",
            SupportKind::No => "No",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SupportKind::Yes => "✓",
            SupportKind::Partial => "◐",
            SupportKind::No => "✗",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub name: &'static str,
    pub main: SupportKind,
    pub complex: SupportKind,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}
