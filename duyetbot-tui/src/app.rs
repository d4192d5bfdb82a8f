use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream};
use duyetbot_core::{
    catalog::MAIN_SITE_URL, ChatPanel, ConfigPanel, DemoConfig, FeaturePanel, FeedbackField,
    FeedbackPanel, FeedbackSink, Panel, Scheduler, Shell, StatusPanel, Tab, TestimonialCarousel,
    TimerEvent, TracingFeedbackSink,
};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::events::{Action, EventHandler, HoverTarget, InputMode, Keybinds, ScrollDirection};
use crate::theme::{Theme, ThemeLoader, ThemeManager};
use crate::ui::layout::MainLayout;

/// What a panel asks of the app after handling an action.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outcome {
    input_mode: Option<InputMode>,
    status: Option<String>,
}

impl Outcome {
    fn editing() -> Self {
        Self {
            input_mode: Some(InputMode::Editing),
            status: None,
        }
    }

    fn status(message: impl Into<String>) -> Self {
        Self {
            input_mode: None,
            status: Some(message.into()),
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub shell: Shell,
    pub theme_manager: ThemeManager,
    pub theme_loader: ThemeLoader,
    pub event_handler: EventHandler,
    pub status_message: Option<String>,
    pub show_help_modal: bool,
    pub help_scroll: u16,
    pub tick_rate: Duration,
    timer_rx: UnboundedReceiver<TimerEvent>,
}

impl App {
    /// Builds the app from user files: keybinds, saved theme and the default
    /// feedback sink. Must be called inside a tokio runtime.
    pub fn new(config: &DemoConfig) -> Self {
        Self::with_parts(
            config,
            Keybinds::load_or_default(),
            ThemeLoader::new(),
            Arc::new(TracingFeedbackSink),
        )
    }

    pub fn with_parts(
        config: &DemoConfig,
        keybinds: Keybinds,
        theme_loader: ThemeLoader,
        sink: Arc<dyn FeedbackSink>,
    ) -> Self {
        let (scheduler, timer_rx) = Scheduler::new();
        let theme_manager = theme_loader.initialize_theme_manager(&config.tui.theme);
        let theme_name = theme_manager.current_theme_name();
        let shell = Shell::new(
            scheduler,
            config.timing.clone(),
            sink,
            config.tui.initial_tab(),
            Utc::now(),
        );

        Self {
            should_quit: false,
            shell,
            theme_manager,
            theme_loader,
            event_handler: EventHandler::with_keybinds(keybinds),
            status_message: Some(format!(
                "Welcome to duyetbot! Theme: {}. Press '?' for help.",
                theme_name
            )),
            show_help_modal: false,
            help_scroll: 0,
            tick_rate: config.tui.tick_rate(),
            timer_rx,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.theme_manager.current_theme()
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            tab = %self.shell.active_tab(),
            theme = self.theme_manager.current_theme_name(),
            "TUI started"
        );

        while !self.should_quit {
            self.draw(terminal)?;

            tokio::select! {
                Some(timer) = self.timer_rx.recv() => {
                    self.handle_timer(&timer);
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => self.should_quit = true,
                },
                _ = ticker.tick() => {}
            }
        }

        info!("TUI stopped");
        Ok(())
    }

    /// Renders one frame and refreshes the mouse targets from it.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut regions = None;
        terminal
            .draw(|frame| regions = Some(MainLayout::render(frame, self)))
            .context("Failed to draw frame")?;

        if let Some(regions) = regions {
            self.event_handler.set_clickable_regions(regions.clickable);
            self.event_handler.set_hover_regions(regions.hover);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Some(action) = self.event_handler.handle_event(event) {
            self.execute_action(action);
        }
    }

    pub fn handle_timer(&mut self, event: &TimerEvent) -> bool {
        self.shell.handle_timer(event, Utc::now())
    }

    /// Waits for the next timer and applies it. Returns false if the event
    /// was stale or the channel closed.
    pub async fn process_next_timer(&mut self) -> bool {
        match self.timer_rx.recv().await {
            Some(event) => self.handle_timer(&event),
            None => false,
        }
    }

    /// Applies every timer event already queued without waiting. Returns how
    /// many were accepted by the mounted panel.
    pub fn drain_timers(&mut self) -> usize {
        let mut accepted = 0;
        while let Ok(event) = self.timer_rx.try_recv() {
            if self.handle_timer(&event) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn execute_action(&mut self, action: Action) {
        if self.show_help_modal {
            self.handle_help_action(action);
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.switch_tab(self.shell.active_tab().next()),
            Action::PrevTab => self.switch_tab(self.shell.active_tab().prev()),
            Action::GoToTab(tab) => self.switch_tab(tab),
            Action::Help => {
                self.show_help_modal = true;
                self.help_scroll = 0;
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::ShowLink => {
                self.status_message = Some(format!("Back to main: {}", MAIN_SITE_URL));
            }
            Action::PointerMoved { over } => self.handle_hover(over),
            Action::MouseScroll { direction } => {
                let step = match direction {
                    ScrollDirection::Up => Action::Up,
                    ScrollDirection::Down => Action::Down,
                };
                self.dispatch_to_panel(step);
            }
            Action::Resize { width, height } => debug!(width, height, "Terminal resized"),
            Action::MouseClick { .. } | Action::None => {}
            other => self.dispatch_to_panel(other),
        }
    }

    fn handle_help_action(&mut self, action: Action) {
        match action {
            Action::Help | Action::Back | Action::StopEditing => self.show_help_modal = false,
            Action::Quit => self.should_quit = true,
            Action::Up
            | Action::MouseScroll {
                direction: ScrollDirection::Up,
            } => self.help_scroll = self.help_scroll.saturating_sub(1),
            Action::Down
            | Action::MouseScroll {
                direction: ScrollDirection::Down,
            } => self.help_scroll = self.help_scroll.saturating_add(1),
            Action::ToggleTheme => self.toggle_theme(),
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.shell.select(tab, Utc::now()) {
            self.event_handler.set_input_mode(InputMode::Normal);
            self.status_message = None;
        }
    }

    fn toggle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_theme_name();
        match self.theme_loader.save_theme_name(name) {
            Ok(()) => self.status_message = Some(format!("Theme: {}", name)),
            Err(e) => {
                warn!("Failed to save theme: {:#}", e);
                self.status_message = Some(format!("Theme: {} (not saved)", name));
            }
        }
    }

    fn handle_hover(&mut self, over: Option<HoverTarget>) {
        if let Panel::Feedback { carousel, .. } = self.shell.panel_mut() {
            carousel.set_hovered(over == Some(HoverTarget::Carousel));
        }
    }

    fn dispatch_to_panel(&mut self, action: Action) {
        let now = Utc::now();
        let mode = self.event_handler.input_mode();

        let outcome = match self.shell.panel_mut() {
            Panel::Playground(chat) => playground_action(chat, action, mode, now),
            Panel::Status(status) => status_action(status, action, now),
            Panel::Features(features) => features_action(features, action),
            Panel::Config(config) => config_action(config, action),
            Panel::Feedback { form, carousel } => feedback_action(form, carousel, action),
        };

        if let Some(input_mode) = outcome.input_mode {
            self.event_handler.set_input_mode(input_mode);
        }
        if let Some(status) = outcome.status {
            self.status_message = Some(status);
        }
    }
}

fn playground_action(
    chat: &mut ChatPanel,
    action: Action,
    mode: InputMode,
    now: DateTime<Utc>,
) -> Outcome {
    match action {
        Action::StartEditing => return Outcome::editing(),
        Action::InsertChar(c) => chat.insert_char(c),
        Action::DeleteChar => chat.backspace(),
        Action::Submit => {
            if chat.submit_input(now) {
                debug!(pending = chat.pending_replies(), "Chat message sent");
            }
        }
        Action::UseQuickQuestion(index) => {
            if chat.use_quick_question(index) {
                return Outcome::editing();
            }
        }
        Action::Select if mode == InputMode::Normal => {
            let index = chat.quick_cursor();
            if chat.use_quick_question(index) {
                return Outcome::editing();
            }
        }
        Action::Left | Action::Up if mode == InputMode::Normal => chat.prev_quick_question(),
        Action::Right | Action::Down if mode == InputMode::Normal => chat.next_quick_question(),
        Action::Reset => chat.clear_input(),
        _ => {}
    }
    Outcome::default()
}

fn status_action(status: &mut StatusPanel, action: Action, now: DateTime<Utc>) -> Outcome {
    match action {
        Action::Toggle | Action::ToggleAutoRefresh | Action::Select => {
            status.toggle_auto_refresh();
            if status.auto_refresh() {
                Outcome::status("Auto-refresh resumed")
            } else {
                Outcome::status("Auto-refresh paused")
            }
        }
        Action::Reset => {
            status.refresh(now);
            Outcome::status("Status refreshed")
        }
        _ => Outcome::default(),
    }
}

fn features_action(features: &mut FeaturePanel, action: Action) -> Outcome {
    match action {
        Action::Up => features.move_up(),
        Action::Down => features.move_down(),
        Action::Select | Action::Toggle => features.select_cursor(),
        Action::SelectFeature(index) => {
            features.select(index);
        }
        Action::Back | Action::CloseDetail => features.close(),
        _ => {}
    }
    Outcome::default()
}

fn config_action(config: &mut ConfigPanel, action: Action) -> Outcome {
    match action {
        Action::Up => config.focus_prev(),
        Action::Down => config.focus_next(),
        Action::Left => config.adjust(-1),
        Action::Right => config.adjust(1),
        Action::Select | Action::Toggle => config.activate(),
        Action::FocusConfigField(field) => {
            config.set_focus(field);
            if field.is_toggle() {
                config.activate();
            }
        }
        Action::Reset => {
            config.reset();
            return Outcome::status("Configuration reset to defaults");
        }
        _ => {}
    }
    Outcome::default()
}

fn feedback_action(
    form: &mut FeedbackPanel,
    carousel: &mut TestimonialCarousel,
    action: Action,
) -> Outcome {
    match action {
        Action::PreviousSlide => carousel.previous(),
        Action::NextSlide => carousel.next(),
        Action::GoToSlide(index) => {
            carousel.go_to(index);
        }
        // The thank-you banner replaces the form until it times out.
        _ if form.is_submitted() => {}
        Action::Up => form.focus_prev(),
        Action::Down => form.focus_next(),
        Action::Left => form.adjust(-1),
        Action::Right => form.adjust(1),
        Action::InsertChar(c) => form.insert_char(c),
        Action::DeleteChar => form.backspace(),
        Action::SetRating(stars) => {
            if form.set_rating(stars) {
                form.set_focus(FeedbackField::Rating);
            }
        }
        Action::FocusFeedbackField(field) => {
            form.set_focus(field);
            if field.is_text() {
                return Outcome::editing();
            }
        }
        Action::StartEditing => {
            if !form.focus().is_text() {
                form.set_focus(FeedbackField::Name);
            }
            return Outcome::editing();
        }
        Action::Select | Action::Toggle => match form.focus() {
            FeedbackField::Submit => return submit_feedback(form),
            FeedbackField::Category => form.adjust(1),
            field if field.is_text() => return Outcome::editing(),
            _ => {}
        },
        Action::Submit => return submit_feedback(form),
        _ => {}
    }
    Outcome::default()
}

fn submit_feedback(form: &mut FeedbackPanel) -> Outcome {
    match form.submit() {
        Ok(()) => Outcome {
            input_mode: Some(InputMode::Normal),
            status: Some("Thanks! Your feedback has been sent.".to_string()),
        },
        Err(e) => {
            warn!(code = e.error_code(), "Feedback rejected: {}", e);
            Outcome::status(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duyetbot_core::{DemoResult, FeedbackDraft};
    use ratatui::backend::TestBackend;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSink {
        received: Mutex<Vec<FeedbackDraft>>,
    }

    impl FeedbackSink for RecordingSink {
        fn submit(&self, draft: &FeedbackDraft) -> DemoResult<()> {
            self.received.lock().unwrap().push(draft.clone());
            Ok(())
        }
    }

    fn app_with(config: &DemoConfig, dir: &TempDir, sink: Arc<dyn FeedbackSink>) -> App {
        App::with_parts(
            config,
            Keybinds::new(),
            ThemeLoader::with_path(dir.path().join("theme.toml")),
            sink,
        )
    }

    fn test_app(dir: &TempDir) -> App {
        app_with(&DemoConfig::default(), dir, Arc::new(TracingFeedbackSink))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.execute_action(Action::InsertChar(c));
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        assert!(!app.should_quit);
        assert_eq!(app.shell.active_tab(), Tab::Playground);
        assert_eq!(app.theme_manager.current_theme_name(), "Tokyo Night");
        assert_eq!(app.tick_rate, Duration::from_millis(250));
        assert!(app.status_message.as_deref().unwrap().contains("Press '?' for help"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_initial_tab_and_theme() {
        let dir = TempDir::new().unwrap();
        let mut config = DemoConfig::default();
        config.tui.initial_tab = "config".to_string();
        config.tui.theme = "Nord".to_string();
        let app = app_with(&config, &dir, Arc::new(TracingFeedbackSink));

        assert_eq!(app.shell.active_tab(), Tab::Config);
        assert_eq!(app.theme_manager.current_theme_name(), "Nord");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_navigation_resets_input_mode() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::StartEditing);
        assert_eq!(app.event_handler.input_mode(), InputMode::Editing);

        app.execute_action(Action::NextTab);
        assert_eq!(app.shell.active_tab(), Tab::Status);
        assert_eq!(app.event_handler.input_mode(), InputMode::Normal);

        app.execute_action(Action::PrevTab);
        app.execute_action(Action::PrevTab);
        assert_eq!(app.shell.active_tab(), Tab::Feedback);

        app.execute_action(Action::GoToTab(Tab::Features));
        assert_eq!(app.shell.active_tab(), Tab::Features);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_typing_and_reply() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::StartEditing);
        type_text(&mut app, "hi");
        app.execute_action(Action::DeleteChar);
        type_text(&mut app, "ello");
        app.execute_action(Action::Submit);

        match app.shell.panel() {
            Panel::Playground(chat) => {
                assert_eq!(chat.messages().last().unwrap().text, "hello");
                assert!(chat.is_typing());
                assert_eq!(chat.input(), "");
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }

        assert!(app.process_next_timer().await);
        match app.shell.panel() {
            Panel::Playground(chat) => {
                assert_eq!(chat.messages().len(), 3);
                assert!(!chat.is_typing());
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_question_fills_input() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::Right);
        app.execute_action(Action::Select);
        assert_eq!(app.event_handler.input_mode(), InputMode::Editing);
        match app.shell.panel() {
            Panel::Playground(chat) => assert_eq!(chat.input(), "How do you work?"),
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_toggle() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.execute_action(Action::GoToTab(Tab::Status));

        app.execute_action(Action::ToggleAutoRefresh);
        assert_eq!(app.status_message.as_deref(), Some("Auto-refresh paused"));
        match app.shell.panel() {
            Panel::Status(status) => assert!(!status.auto_refresh()),
            other => panic!("unexpected panel {:?}", other.tab()),
        }

        app.execute_action(Action::Toggle);
        assert_eq!(app.status_message.as_deref(), Some("Auto-refresh resumed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_feature_detail_open_and_close() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.execute_action(Action::GoToTab(Tab::Features));

        app.execute_action(Action::Down);
        app.execute_action(Action::Select);
        match app.shell.panel() {
            Panel::Features(features) => assert_eq!(features.selected(), Some(1)),
            other => panic!("unexpected panel {:?}", other.tab()),
        }

        app.execute_action(Action::CloseDetail);
        match app.shell.panel() {
            Panel::Features(features) => assert_eq!(features.selected(), None),
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_config_adjust_and_reset() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.execute_action(Action::GoToTab(Tab::Config));

        app.execute_action(Action::Down);
        for _ in 0..6 {
            app.execute_action(Action::Right);
        }
        app.execute_action(Action::FocusConfigField(duyetbot_core::ConfigField::Thinking));
        match app.shell.panel() {
            Panel::Config(config) => {
                assert_eq!(config.config().temperature(), 1.3);
                assert!(config.config().thinking);
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }

        app.execute_action(Action::Reset);
        match app.shell.panel() {
            Panel::Config(config) => {
                assert_eq!(config.config(), &duyetbot_core::BotConfig::default())
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_feedback_submit_flow() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(RecordingSink::default());
        let mut config = DemoConfig::default();
        config.tui.initial_tab = "feedback".to_string();
        let mut app = app_with(&config, &dir, sink.clone());

        app.execute_action(Action::Submit);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Please fill out the name field")
        );

        app.execute_action(Action::StartEditing);
        type_text(&mut app, "Alex");
        app.execute_action(Action::Down);
        type_text(&mut app, "alex@example.com");
        app.execute_action(Action::FocusFeedbackField(FeedbackField::Message));
        type_text(&mut app, "Nice");
        app.execute_action(Action::SetRating(4));
        app.execute_action(Action::Submit);

        assert_eq!(sink.received.lock().unwrap().len(), 1);
        assert_eq!(sink.received.lock().unwrap()[0].rating.value(), 4);
        assert_eq!(app.event_handler.input_mode(), InputMode::Normal);
        match app.shell.panel() {
            Panel::Feedback { form, .. } => assert!(form.is_submitted()),
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_pauses_carousel() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.execute_action(Action::GoToTab(Tab::Feedback));

        app.execute_action(Action::PointerMoved {
            over: Some(HoverTarget::Carousel),
        });
        match app.shell.panel() {
            Panel::Feedback { carousel, .. } => assert!(carousel.is_paused()),
            other => panic!("unexpected panel {:?}", other.tab()),
        }

        app.execute_action(Action::PointerMoved { over: None });
        app.execute_action(Action::NextSlide);
        match app.shell.panel() {
            Panel::Feedback { carousel, .. } => {
                assert!(!carousel.is_paused());
                assert_eq!(carousel.index(), 1);
            }
            other => panic!("unexpected panel {:?}", other.tab()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_modal_captures_actions() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::Help);
        assert!(app.show_help_modal);

        app.execute_action(Action::NextTab);
        assert_eq!(app.shell.active_tab(), Tab::Playground);
        app.execute_action(Action::Down);
        assert_eq!(app.help_scroll, 1);

        app.execute_action(Action::Back);
        assert!(!app.show_help_modal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_theme_persists() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::ToggleTheme);
        let name = app.theme_manager.current_theme_name();
        assert_ne!(name, "Tokyo Night");

        let saved = app.theme_loader.load().unwrap().unwrap();
        assert_eq!(saved.theme, name);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_every_tab() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();

        let expected = [
            (Tab::Playground, "Interactive Chat Demo"),
            (Tab::Status, "System Status Dashboard"),
            (Tab::Features, "Feature Comparison"),
            (Tab::Config, "Configuration Preview"),
            (Tab::Feedback, "What People Say"),
        ];
        for (tab, heading) in expected {
            app.execute_action(Action::GoToTab(tab));
            app.draw(&mut terminal).unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains(heading), "{tab} should render '{heading}'");
            assert!(text.contains("Back to main"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_registers_tab_regions() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();

        app.draw(&mut terminal).unwrap();
        let region = app
            .event_handler
            .clickable_regions()
            .iter()
            .find(|r| r.action == Action::GoToTab(Tab::Config))
            .cloned()
            .unwrap();

        app.handle_event(Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: region.area.x,
            row: region.area.y,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }));
        assert_eq!(app.shell.active_tab(), Tab::Config);
    }
}
