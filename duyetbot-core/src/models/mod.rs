mod bot_config;
mod chat;
mod feature;
mod feedback;
mod service;
mod testimonial;

pub use bot_config::{
    BotConfig, Capabilities, ConfigPreviewDocument, ModelId, Parameters, RuntimeInfo,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, MAX_TOKENS_MAX, MAX_TOKENS_MIN, MAX_TOKENS_STEP,
    TEMPERATURE_MAX, TEMPERATURE_MIN, TEMPERATURE_STEP,
};
pub use chat::{ChatMessage, Sender};
pub use feature::{AgentProfile, FeatureRow, SupportKind};
pub use feedback::{FeedbackCategory, FeedbackDraft, Rating};
pub use service::{ServiceSpec, ServiceStatus, StatusKind};
pub use testimonial::Testimonial;
