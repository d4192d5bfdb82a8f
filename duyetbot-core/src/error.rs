//! Error types for the duyetbot core library.
//!
//! The demo has very few failure paths: loading configuration and
//! validating/delivering feedback. Everything else (timer races, stale
//! events) is prevented structurally and never surfaces as an error.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E2001-E2099 | Config | Configuration file, environment and validation errors |
//! | E4001-E4099 | Feedback | Feedback form validation and delivery errors |
//! | E9001-E9099 | General | IO and serialization errors |

use thiserror::Error;

use crate::config::ConfigLoadError;

/// A feedback form constraint that was not met.
///
/// These mirror the required/email constraints a browser form would enforce
/// natively, and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Please fill out the {0} field")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

#[derive(Debug, Error)]
pub enum DemoError {
    // ========================================================================
    // Configuration Errors (E2001-E2099)
    // ========================================================================
    /// Configuration could not be loaded or failed validation
    #[error("[E2001] Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    // ========================================================================
    // Feedback Errors (E4001-E4099)
    // ========================================================================
    /// The feedback draft failed a form constraint
    #[error("[E4001] Invalid feedback: {0}")]
    InvalidFeedback(#[from] FeedbackError),

    /// The feedback sink refused the draft
    #[error("[E4002] Feedback delivery failed: {0}")]
    FeedbackDelivery(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    #[error("[E9001] IO error: {0}")]
    Io(String),

    #[error("[E9002] Serialization error: {0}")]
    Serialization(String),
}

pub type DemoResult<T> = Result<T, DemoError>;

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        DemoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        DemoError::Serialization(err.to_string())
    }
}

impl DemoError {
    /// Returns an error code suitable for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DemoError::Config(_) => "E2001",
            DemoError::InvalidFeedback(_) => "E4001",
            DemoError::FeedbackDelivery(_) => "E4002",
            DemoError::Io(_) => "E9001",
            DemoError::Serialization(_) => "E9002",
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, DemoError::Config(_))
    }

    /// True when the user can fix the problem by editing the form.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, DemoError::InvalidFeedback(_))
    }

    /// Short text for the status line, without the error code prefix.
    pub fn user_message(&self) -> String {
        match self {
            DemoError::InvalidFeedback(inner) => inner.to_string(),
            DemoError::FeedbackDelivery(msg) => format!("Could not send feedback: {}", msg),
            other => other.to_string(),
        }
    }

    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            DemoError::Config(_) => Some(
                "Check duyetbot.toml and DUYETBOT_* environment variables, or remove them to use defaults.",
            ),
            DemoError::InvalidFeedback(_) => Some("Fill in the highlighted field and submit again."),
            _ => None,
        }
    }
}
