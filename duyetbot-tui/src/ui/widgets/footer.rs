use duyetbot_core::Tab;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::events::{Action, InputMode, Keybinds};
use crate::theme::ThemedStyles;

pub const CREDIT: &str = "Built with Rust and ratatui";

pub struct Footer;

impl Footer {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let styles = ThemedStyles::new(app.current_theme());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[0]);

        let hint_spans: Vec<Span> = Self::hints(
            app.shell.active_tab(),
            app.event_handler.input_mode(),
            app.event_handler.keybinds(),
        )
        .into_iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key}"), styles.keybind()),
                Span::styled(format!(":{desc} "), styles.dimmed()),
            ]
        })
        .collect();
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans)).style(styles.surface()),
            columns[0],
        );

        let status = app.status_message.as_deref().unwrap_or("Ready");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("{status} "), styles.dimmed())))
                .alignment(Alignment::Right)
                .style(styles.surface()),
            columns[1],
        );

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CREDIT, styles.dimmed())))
                .alignment(Alignment::Center)
                .style(styles.base()),
            rows[1],
        );
    }

    /// Key hints for the active tab, using the configured bindings.
    pub fn hints(tab: Tab, mode: InputMode, keybinds: &Keybinds) -> Vec<(String, &'static str)> {
        if mode == InputMode::Editing {
            let submit = match tab {
                Tab::Playground => "Send",
                _ => "Submit",
            };
            return vec![
                ("Esc".to_string(), "Stop typing"),
                ("Enter".to_string(), submit),
                ("Tab".to_string(), "Next field"),
            ];
        }

        let key = |action: Action| keybinds.keys_for(&action);
        let mut hints = match tab {
            Tab::Playground => vec![
                (key(Action::StartEditing), "Type"),
                (key(Action::Right), "Question"),
                (key(Action::Select), "Use"),
            ],
            Tab::Status => vec![
                (key(Action::ToggleAutoRefresh), "Pause/Resume"),
                (key(Action::Reset), "Refresh now"),
            ],
            Tab::Features => vec![
                (key(Action::Down), "Move"),
                (key(Action::Select), "Details"),
                (key(Action::CloseDetail), "Close"),
            ],
            Tab::Config => vec![
                (key(Action::Down), "Field"),
                (key(Action::Right), "Adjust"),
                (key(Action::Toggle), "Toggle"),
                (key(Action::Reset), "Reset"),
            ],
            Tab::Feedback => vec![
                (key(Action::Down), "Field"),
                (key(Action::StartEditing), "Type"),
                (key(Action::NextSlide), "Testimonial"),
            ],
        };
        hints.push((key(Action::NextTab), "Tab"));
        hints.push((key(Action::Help), "Help"));
        hints.push((key(Action::Quit), "Quit"));
        hints
    }
}
