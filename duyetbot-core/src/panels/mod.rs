//! Panel state machines and the shell that mounts exactly one of them.

mod chat;
mod config_preview;
mod feedback;
mod features;
mod status;
mod testimonials;

pub use chat::{pick_reply, ChatPanel};
pub use config_preview::{ConfigField, ConfigPanel};
pub use feedback::{FeedbackField, FeedbackPanel, FeedbackSink, TracingFeedbackSink};
pub use features::FeaturePanel;
pub use status::StatusPanel;
pub use testimonials::TestimonialCarousel;

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::config::TimingConfig;
use crate::scheduler::{Scheduler, TimerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Playground,
    Status,
    Features,
    Config,
    Feedback,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Playground,
            Tab::Status,
            Tab::Features,
            Tab::Config,
            Tab::Feedback,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Playground => "playground",
            Tab::Status => "status",
            Tab::Features => "features",
            Tab::Config => "config",
            Tab::Feedback => "feedback",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Playground => "Chat Playground",
            Tab::Status => "System Status",
            Tab::Features => "Features",
            Tab::Config => "Config",
            Tab::Feedback => "Feedback",
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::all().get(index).copied()
    }

    pub fn next(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + 1) % tabs.len()]
    }

    pub fn prev(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + tabs.len() - 1) % tabs.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Tab::all()
            .iter()
            .copied()
            .find(|t| t.id() == needle)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// The mounted panel. Dropping it drops its timer scopes, which aborts any
/// pending timers.
#[derive(Debug)]
pub enum Panel {
    Playground(ChatPanel),
    Status(StatusPanel),
    Features(FeaturePanel),
    Config(ConfigPanel),
    Feedback {
        form: FeedbackPanel,
        carousel: TestimonialCarousel,
    },
}

impl Panel {
    pub fn tab(&self) -> Tab {
        match self {
            Panel::Playground(_) => Tab::Playground,
            Panel::Status(_) => Tab::Status,
            Panel::Features(_) => Tab::Features,
            Panel::Config(_) => Tab::Config,
            Panel::Feedback { .. } => Tab::Feedback,
        }
    }
}

/// Owns the active tab and its mounted panel.
pub struct Shell {
    scheduler: Scheduler,
    timing: TimingConfig,
    sink: Arc<dyn FeedbackSink>,
    panel: Panel,
}

impl Shell {
    pub fn new(
        scheduler: Scheduler,
        timing: TimingConfig,
        sink: Arc<dyn FeedbackSink>,
        initial: Tab,
        now: DateTime<Utc>,
    ) -> Self {
        let panel = mount(&scheduler, &timing, &sink, initial, now);
        Self {
            scheduler,
            timing,
            sink,
            panel,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.panel.tab()
    }

    /// Switches to `tab`, mounting a fresh panel. Selecting the active tab
    /// does nothing and returns false.
    pub fn select(&mut self, tab: Tab, now: DateTime<Utc>) -> bool {
        if tab == self.active_tab() {
            return false;
        }
        debug!(from = %self.active_tab(), to = %tab, "Switching tab");
        self.panel = mount(&self.scheduler, &self.timing, &self.sink, tab, now);
        true
    }

    pub fn next_tab(&mut self, now: DateTime<Utc>) {
        let tab = self.active_tab().next();
        self.select(tab, now);
    }

    pub fn prev_tab(&mut self, now: DateTime<Utc>) {
        let tab = self.active_tab().prev();
        self.select(tab, now);
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Routes a fired timer to the mounted panel. Returns true if it changed state.
    pub fn handle_timer(&mut self, event: &TimerEvent, now: DateTime<Utc>) -> bool {
        match &mut self.panel {
            Panel::Playground(chat) => chat.handle_timer(event, now),
            Panel::Status(status) => status.handle_timer(event, now),
            Panel::Feedback { form, carousel } => {
                form.handle_timer(event) || carousel.handle_timer(event)
            }
            Panel::Features(_) | Panel::Config(_) => false,
        }
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("timing", &self.timing)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}

fn mount(
    scheduler: &Scheduler,
    timing: &TimingConfig,
    sink: &Arc<dyn FeedbackSink>,
    tab: Tab,
    now: DateTime<Utc>,
) -> Panel {
    match tab {
        Tab::Playground => Panel::Playground(ChatPanel::new(
            scheduler.scope(),
            timing.chat_reply_range_ms(),
            now,
        )),
        Tab::Status => Panel::Status(StatusPanel::new(
            scheduler.scope(),
            timing.status_refresh(),
            now,
        )),
        Tab::Features => Panel::Features(FeaturePanel::new()),
        Tab::Config => Panel::Config(ConfigPanel::new()),
        Tab::Feedback => Panel::Feedback {
            form: FeedbackPanel::new(scheduler.scope(), Arc::clone(sink), timing.feedback_banner()),
            carousel: TestimonialCarousel::new(scheduler.scope(), timing.carousel_interval()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time;

    fn shell(initial: Tab) -> (Shell, tokio::sync::mpsc::UnboundedReceiver<TimerEvent>) {
        let (scheduler, rx) = Scheduler::new();
        let shell = Shell::new(
            scheduler,
            TimingConfig::default(),
            Arc::new(TracingFeedbackSink),
            initial,
            Utc::now(),
        );
        (shell, rx)
    }

    #[test]
    fn test_tab_parse_and_cycle() {
        assert_eq!("status".parse::<Tab>(), Ok(Tab::Status));
        assert_eq!(" Feedback ".parse::<Tab>(), Ok(Tab::Feedback));
        assert_eq!(
            "settings".parse::<Tab>(),
            Err(UnknownTab("settings".to_string()))
        );

        assert_eq!(Tab::Feedback.next(), Tab::Playground);
        assert_eq!(Tab::Playground.prev(), Tab::Feedback);
        assert_eq!(Tab::from_index(3), Some(Tab::Config));
        assert_eq!(Tab::from_index(5), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_one_panel_mounted() {
        let (mut shell, _rx) = shell(Tab::Playground);
        assert_eq!(shell.active_tab(), Tab::Playground);

        for &tab in Tab::all() {
            shell.select(tab, Utc::now());
            assert_eq!(shell.active_tab(), tab);
            assert_eq!(shell.panel().tab(), tab);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselecting_active_tab_keeps_state() {
        let (mut shell, _rx) = shell(Tab::Features);
        if let Panel::Features(features) = shell.panel_mut() {
            features.select(2);
        }
        assert!(!shell.select(Tab::Features, Utc::now()));
        match shell.panel() {
            Panel::Features(features) => assert_eq!(features.selected(), Some(2)),
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_tabs_discards_pending_reply() {
        let (mut shell, mut rx) = shell(Tab::Playground);
        if let Panel::Playground(chat) = shell.panel_mut() {
            assert!(chat.submit("hello", Utc::now()));
        }

        shell.select(Tab::Config, Utc::now());
        shell.select(Tab::Playground, Utc::now());

        time::sleep(Duration::from_secs(3)).await;
        while let Ok(event) = rx.try_recv() {
            assert!(!shell.handle_timer(&event, Utc::now()));
        }
        match shell.panel() {
            Panel::Playground(chat) => {
                assert_eq!(chat.messages().len(), 1);
                assert!(!chat.is_typing());
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_feedback_tab_routes_carousel_timer() {
        let (mut shell, mut rx) = shell(Tab::Feedback);
        let event = rx.recv().await.unwrap();
        assert!(shell.handle_timer(&event, Utc::now()));
        match shell.panel() {
            Panel::Feedback { carousel, .. } => assert_eq!(carousel.index(), 1),
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_and_prev_tab_wrap() {
        let (mut shell, _rx) = shell(Tab::Feedback);
        shell.next_tab(Utc::now());
        assert_eq!(shell.active_tab(), Tab::Playground);
        shell.prev_tab(Utc::now());
        assert_eq!(shell.active_tab(), Tab::Feedback);
    }
}
