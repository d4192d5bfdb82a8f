use std::ops::RangeInclusive;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::{CANNED_REPLIES, GREETING, QUICK_QUESTIONS};
use crate::models::ChatMessage;
use crate::scheduler::{TimerEvent, TimerKey, TimerScope};

/// Chooses one canned reply uniformly at random.
pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CANNED_REPLIES[rng.gen_range(0..CANNED_REPLIES.len())]
}

/// The simulated chat: a message log, an input line, and one pending reply
/// timer per submitted message.
#[derive(Debug)]
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    input: String,
    quick_cursor: usize,
    next_reply: u64,
    reply_delay_ms: RangeInclusive<u64>,
    rng: StdRng,
    timers: TimerScope,
}

impl ChatPanel {
    pub fn new(timers: TimerScope, reply_delay_ms: RangeInclusive<u64>, now: DateTime<Utc>) -> Self {
        Self::with_rng(timers, reply_delay_ms, StdRng::from_entropy(), now)
    }

    pub fn with_rng(
        timers: TimerScope,
        reply_delay_ms: RangeInclusive<u64>,
        rng: StdRng,
        now: DateTime<Utc>,
    ) -> Self {
        let (min, max) = (*reply_delay_ms.start(), *reply_delay_ms.end());
        Self {
            messages: vec![ChatMessage::bot(GREETING, now)],
            input: String::new(),
            quick_cursor: 0,
            next_reply: 1,
            reply_delay_ms: min.min(max)..=max.max(min),
            rng,
            timers,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while at least one bot reply is still pending.
    pub fn is_typing(&self) -> bool {
        self.timers.pending() > 0
    }

    pub fn pending_replies(&self) -> usize {
        self.timers.pending()
    }

    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Appends `text` as a user message and schedules the bot reply.
    /// Whitespace-only text is ignored and schedules nothing.
    pub fn submit(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.messages.push(ChatMessage::user(text, now));
        self.input.clear();

        let reply = self.next_reply;
        self.next_reply += 1;
        let delay = Duration::from_millis(self.rng.gen_range(self.reply_delay_ms.clone()));
        self.timers.once(TimerKey::ChatReply(reply), delay);
        debug!(reply, delay_ms = delay.as_millis() as u64, "Scheduled bot reply");
        true
    }

    /// Submits the current input line. The input is kept when it was rejected.
    pub fn submit_input(&mut self, now: DateTime<Utc>) -> bool {
        let text = std::mem::take(&mut self.input);
        let sent = self.submit(&text, now);
        if !sent {
            self.input = text;
        }
        sent
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn quick_questions(&self) -> &'static [&'static str] {
        QUICK_QUESTIONS
    }

    pub fn quick_cursor(&self) -> usize {
        self.quick_cursor
    }

    pub fn next_quick_question(&mut self) {
        self.quick_cursor = (self.quick_cursor + 1) % QUICK_QUESTIONS.len();
    }

    pub fn prev_quick_question(&mut self) {
        self.quick_cursor = (self.quick_cursor + QUICK_QUESTIONS.len() - 1) % QUICK_QUESTIONS.len();
    }

    /// Copies a quick question into the input line.
    pub fn use_quick_question(&mut self, index: usize) -> bool {
        match QUICK_QUESTIONS.get(index) {
            Some(question) => {
                self.quick_cursor = index;
                self.input = (*question).to_string();
                true
            }
            None => false,
        }
    }

    pub fn handle_timer(&mut self, event: &TimerEvent, now: DateTime<Utc>) -> bool {
        if !matches!(event.key, TimerKey::ChatReply(_)) || !self.timers.accept(event) {
            return false;
        }
        let reply = pick_reply(&mut self.rng);
        self.messages.push(ChatMessage::bot(reply, now));
        debug!(pending = self.timers.pending(), "Bot replied");
        true
    }
}
