use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{DemoError, DemoResult};
use crate::models::{FeedbackDraft, Rating};
use crate::scheduler::{TimerEvent, TimerKey, TimerScope};

/// Where a valid feedback submission is delivered.
pub trait FeedbackSink: Send + Sync {
    fn submit(&self, draft: &FeedbackDraft) -> DemoResult<()>;
}

/// Default sink: records the submission as a structured log event and
/// keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedbackSink;

impl FeedbackSink for TracingFeedbackSink {
    fn submit(&self, draft: &FeedbackDraft) -> DemoResult<()> {
        info!(
            name = %draft.name,
            email = %draft.email,
            category = %draft.category,
            rating = draft.rating.value(),
            message_len = draft.message.chars().count(),
            "Feedback submitted"
        );
        Ok(())
    }
}

/// Focusable form controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackField {
    Name,
    Email,
    Category,
    Rating,
    Message,
    Submit,
}

impl FeedbackField {
    pub fn all() -> &'static [FeedbackField] {
        &[
            FeedbackField::Name,
            FeedbackField::Email,
            FeedbackField::Category,
            FeedbackField::Rating,
            FeedbackField::Message,
            FeedbackField::Submit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackField::Name => "Name",
            FeedbackField::Email => "Email",
            FeedbackField::Category => "Category",
            FeedbackField::Rating => "Rating",
            FeedbackField::Message => "Message",
            FeedbackField::Submit => "Submit Feedback",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FeedbackField::Name => "Your name",
            FeedbackField::Email => "your@email.com",
            FeedbackField::Message => "Tell us what you think...",
            _ => "",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FeedbackField::Name | FeedbackField::Email | FeedbackField::Message
        )
    }

    pub fn index(&self) -> usize {
        FeedbackField::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> FeedbackField {
        let all = FeedbackField::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> FeedbackField {
        let all = FeedbackField::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

pub struct FeedbackPanel {
    draft: FeedbackDraft,
    focus: FeedbackField,
    submitted: bool,
    banner: Duration,
    sink: Arc<dyn FeedbackSink>,
    timers: TimerScope,
}

impl FeedbackPanel {
    pub fn new(timers: TimerScope, sink: Arc<dyn FeedbackSink>, banner: Duration) -> Self {
        Self {
            draft: FeedbackDraft::default(),
            focus: FeedbackField::Name,
            submitted: false,
            banner,
            sink,
            timers,
        }
    }

    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    pub fn focus(&self) -> FeedbackField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FeedbackField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// True while the thank-you banner is shown instead of the form.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FeedbackField::Name => Some(&mut self.draft.name),
            FeedbackField::Email => Some(&mut self.draft.email),
            FeedbackField::Message => Some(&mut self.draft.message),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.text_field_mut() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.text_field_mut() {
            field.pop();
        }
    }

    /// Steps the focused choice control. Text fields are unaffected.
    pub fn adjust(&mut self, delta: i32) {
        match self.focus {
            FeedbackField::Category if delta > 0 => {
                self.draft.category = self.draft.category.next();
            }
            FeedbackField::Category if delta < 0 => {
                self.draft.category = self.draft.category.prev();
            }
            FeedbackField::Rating => self.draft.rating = self.draft.rating.step(delta),
            _ => {}
        }
    }

    pub fn set_rating(&mut self, stars: u8) -> bool {
        match Rating::new(stars) {
            Some(rating) => {
                self.draft.rating = rating;
                true
            }
            None => false,
        }
    }

    /// Validates the draft and hands it to the sink. On success the draft is
    /// cleared and the thank-you banner is shown until its timer fires. On
    /// failure the form is left untouched.
    pub fn submit(&mut self) -> DemoResult<()> {
        self.draft.validate()?;
        self.sink
            .submit(&self.draft)
            .map_err(|e| match e {
                DemoError::FeedbackDelivery(_) => e,
                other => DemoError::FeedbackDelivery(other.to_string()),
            })?;

        self.draft = FeedbackDraft::default();
        self.focus = FeedbackField::Name;
        self.submitted = true;
        self.timers.once(TimerKey::FeedbackBanner, self.banner);
        debug!("Feedback banner shown");
        Ok(())
    }

    pub fn handle_timer(&mut self, event: &TimerEvent) -> bool {
        if event.key != TimerKey::FeedbackBanner || !self.timers.accept(event) {
            return false;
        }
        self.submitted = false;
        true
    }
}

impl std::fmt::Debug for FeedbackPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackPanel")
            .field("draft", &self.draft)
            .field("focus", &self.focus)
            .field("submitted", &self.submitted)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}
