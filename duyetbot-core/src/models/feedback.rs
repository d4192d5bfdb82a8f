use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    #[default]
    General,
    Feature,
    Bug,
    Suggestion,
    Other,
}

impl FeedbackCategory {
    pub fn all() -> &'static [FeedbackCategory] {
        &[
            FeedbackCategory::General,
            FeedbackCategory::Feature,
            FeedbackCategory::Bug,
            FeedbackCategory::Suggestion,
            FeedbackCategory::Other,
        ]
    }

    pub fn value(&self) -> &'static str {
        match self {
            FeedbackCategory::General => "general",
            FeedbackCategory::Feature => "feature",
            FeedbackCategory::Bug => "bug",
            FeedbackCategory::Suggestion => "suggestion",
            FeedbackCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackCategory::General => "General Feedback",
            FeedbackCategory::Feature => "Feature Request",
            FeedbackCategory::Bug => "Bug Report",
            FeedbackCategory::Suggestion => "Suggestion",
            FeedbackCategory::Other => "Other",
        }
    }

    pub fn next(&self) -> FeedbackCategory {
        let all = FeedbackCategory::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> FeedbackCategory {
        let all = FeedbackCategory::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Steps by `delta`, saturating at the bounds.
    pub fn step(&self, delta: i32) -> Rating {
        let next = (i32::from(self.0) + delta).clamp(i32::from(Self::MIN), i32::from(Self::MAX));
        Rating(next as u8)
    }

    pub fn stars(&self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackDraft {
    pub name: String,
    pub email: String,
    pub rating: Rating,
    pub category: FeedbackCategory,
    pub message: String,
}

impl FeedbackDraft {
    /// Checks the required fields in form order, then the email shape.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.name.trim().is_empty() {
            return Err(FeedbackError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(FeedbackError::MissingField("email"));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FeedbackError::InvalidEmail(self.email.trim().to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(FeedbackError::MissingField("message"));
        }
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
