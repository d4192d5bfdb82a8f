//! Core of the duyetbot interactive demo.
//!
//! Everything here is terminal-agnostic: the static demo catalog, the data
//! model, one state machine per panel, and the timer scheduler that ties
//! simulated delays to the lifetime of the panel that requested them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod panels;
pub mod scheduler;

pub use config::{
    ensure_cache_dir, ensure_config_dir, get_cache_dir, get_config_dir, ConfigLoadError,
    DemoConfig, LoggingConfig, TimingConfig, TuiConfig,
};
pub use error::{DemoError, DemoResult, FeedbackError};
pub use models::{
    AgentProfile, BotConfig, ChatMessage, FeatureRow, FeedbackCategory, FeedbackDraft, ModelId,
    Rating, Sender, ServiceSpec, ServiceStatus, StatusKind, SupportKind, Testimonial,
};
pub use panels::{
    ChatPanel, ConfigField, ConfigPanel, FeaturePanel, FeedbackField, FeedbackPanel, FeedbackSink,
    Panel, Shell, StatusPanel, Tab, TestimonialCarousel, TracingFeedbackSink, UnknownTab,
};
pub use scheduler::{Scheduler, ScopeId, TimerEvent, TimerKey, TimerScope};
