use duyetbot_core::Panel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::App;
use crate::events::{Action, ClickableRegion, HoverRegion, HoverTarget};
use crate::ui::views::{ConfigView, FeaturesView, FeedbackView, PlaygroundView, StatusView};
use crate::ui::widgets::{Footer, Header, HelpModal};

/// Mouse targets collected while drawing a frame.
#[derive(Debug, Default)]
pub struct Regions {
    pub clickable: Vec<ClickableRegion>,
    pub hover: Vec<HoverRegion>,
}

impl Regions {
    pub fn click(&mut self, area: Rect, action: Action, label: impl Into<String>) {
        if area.width > 0 && area.height > 0 {
            self.clickable.push(ClickableRegion::new(area, action, label));
        }
    }

    pub fn hover(&mut self, area: Rect, target: HoverTarget) {
        if area.width > 0 && area.height > 0 {
            self.hover.push(HoverRegion { area, target });
        }
    }
}

pub struct MainLayout;

impl MainLayout {
    pub fn render(frame: &mut Frame, app: &App) -> Regions {
        let theme = app.current_theme();
        let size = frame.area();
        let mut regions = Regions::default();

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(theme.background())
                    .fg(theme.foreground()),
            ),
            size,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(2),
            ])
            .split(size);

        Header::render(frame, chunks[0], app, &mut regions);

        let content_area = chunks[1].inner(Margin::new(1, 0));

        match app.shell.panel() {
            Panel::Playground(chat) => {
                PlaygroundView::render(frame, content_area, app, chat, &mut regions)
            }
            Panel::Status(status) => {
                StatusView::render(frame, content_area, app, status, &mut regions)
            }
            Panel::Features(features) => {
                FeaturesView::render(frame, content_area, app, features, &mut regions)
            }
            Panel::Config(config) => {
                ConfigView::render(frame, content_area, app, config, &mut regions)
            }
            Panel::Feedback { form, carousel } => {
                FeedbackView::render(frame, content_area, app, form, carousel, &mut regions)
            }
        }

        Footer::render(frame, chunks[2], app);

        if app.show_help_modal {
            // The modal covers the panels, so their targets are dropped.
            regions = Regions::default();
            HelpModal::render(frame, size, app.event_handler.keybinds(), theme, app.help_scroll);
        }

        regions
    }

    pub fn create_two_column_layout(area: Rect, left_percent: u16) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(left_percent),
                Constraint::Percentage(100 - left_percent),
            ])
            .split(area)
            .to_vec()
    }

    /// Title and subtitle lines above a panel, returning the remaining area.
    pub fn split_heading(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        (chunks[0], chunks[1])
    }
}
