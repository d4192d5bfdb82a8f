use duyetbot_core::{
    catalog::RUNTIME,
    models::{MAX_TOKENS_MAX, MAX_TOKENS_MIN},
    BotConfig, ConfigField, ConfigPanel,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::events::Action;
use crate::theme::ThemedStyles;
use crate::ui::layout::{MainLayout, Regions};

use super::{panel_block, render_heading};

const RESET_LABEL: &str = " Reset to Defaults ";

pub struct ConfigView;

impl ConfigView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        panel: &ConfigPanel,
        regions: &mut Regions,
    ) {
        let styles = ThemedStyles::new(app.current_theme());

        let (heading, body) = MainLayout::split_heading(area);
        render_heading(
            frame,
            heading,
            "Configuration Preview",
            "Interactive preview of bot configuration settings",
            &styles,
        );

        let columns = MainLayout::create_two_column_layout(body, 50);
        Self::render_settings(frame, columns[0], panel, &styles, regions);
        Self::render_preview(frame, columns[1], panel, &styles);
    }

    fn render_settings(
        frame: &mut Frame,
        area: Rect,
        panel: &ConfigPanel,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let block = panel_block("Settings", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(3); ConfigField::all().len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let config = panel.config();
        for (row, field) in rows.iter().zip(ConfigField::all()) {
            Self::render_field(frame, *row, *field, config, panel.focus() == *field, styles);
            regions.click(*row, Action::FocusConfigField(*field), field.label());
        }

        let reset_row = rows[ConfigField::all().len()];
        let reset_area = Rect::new(
            reset_row.x,
            reset_row.y,
            RESET_LABEL.len() as u16,
            reset_row.height,
        )
        .intersection(reset_row);
        frame.render_widget(
            Paragraph::new(Span::styled(RESET_LABEL, styles.button())),
            reset_area,
        );
        regions.click(reset_area, Action::Reset, "Reset to Defaults");
    }

    fn render_field(
        frame: &mut Frame,
        area: Rect,
        field: ConfigField,
        config: &BotConfig,
        focused: bool,
        styles: &ThemedStyles,
    ) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let (marker, label_style) = if focused {
            ("▸ ", styles.accent_bold())
        } else {
            ("  ", styles.input())
        };
        let value = field_value(field, config);
        let value_style = match field {
            ConfigField::Streaming | ConfigField::Thinking | ConfigField::AgentRouting => {
                if value.starts_with("[x]") {
                    styles.success()
                } else {
                    styles.dimmed()
                }
            }
            _ => styles.accent(),
        };
        let title = Line::from(vec![
            Span::styled(marker, styles.accent()),
            Span::styled(format!("{:<15}", field.label()), label_style),
            Span::styled(value, value_style),
        ]);
        let title_style = if focused {
            styles.selection()
        } else {
            styles.surface()
        };
        frame.render_widget(Paragraph::new(title).style(title_style), lines[0]);

        let detail_area = Rect {
            x: lines[1].x.saturating_add(2),
            ..lines[1]
        }
        .intersection(lines[1]);
        match field {
            ConfigField::Temperature | ConfigField::MaxTokens => {
                let ratio = if field == ConfigField::Temperature {
                    config.temperature_ratio()
                } else {
                    config.max_tokens_ratio()
                };
                let gauge = LineGauge::default()
                    .filled_style(styles.gauge())
                    .unfilled_style(styles.dimmed())
                    .label("")
                    .ratio(ratio.clamp(0.0, 1.0));
                frame.render_widget(gauge, detail_area);
                let scale_area = Rect {
                    x: lines[2].x.saturating_add(2),
                    ..lines[2]
                }
                .intersection(lines[2]);
                frame.render_widget(
                    Paragraph::new(Span::styled(scale_legend(field), styles.dimmed())),
                    scale_area,
                );
            }
            _ => {
                frame.render_widget(
                    Paragraph::new(Span::styled(field.description(), styles.dimmed())),
                    detail_area,
                );
            }
        }
    }

    fn render_preview(frame: &mut Frame, area: Rect, panel: &ConfigPanel, styles: &ThemedStyles) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(4),
            ])
            .split(area);

        let block = panel_block("Config Preview", styles);
        let json = match panel.preview_json() {
            Ok(json) => json,
            Err(e) => e.user_message(),
        };
        let lines: Vec<Line> = json
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), styles.code())))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

        let command = Paragraph::new(Span::styled(panel.command_line(), styles.info()))
            .wrap(Wrap { trim: true })
            .block(panel_block("Usage Command", styles));
        frame.render_widget(command, chunks[1]);

        let environment = vec![
            Line::from(vec![
                Span::styled("Host: ", styles.dimmed()),
                Span::styled(format!("{:<12}", RUNTIME.host), styles.input()),
                Span::styled("Node: ", styles.dimmed()),
                Span::styled(RUNTIME.node, styles.input()),
            ]),
            Line::from(vec![
                Span::styled("Shell: ", styles.dimmed()),
                Span::styled(format!("{:<11}", RUNTIME.shell), styles.input()),
                Span::styled("Channel: ", styles.dimmed()),
                Span::styled(RUNTIME.channel, styles.input()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(environment).block(panel_block("Environment", styles)),
            chunks[2],
        );
    }
}

/// Display text for a field's current value.
pub fn field_value(field: ConfigField, config: &BotConfig) -> String {
    let checkbox = |on: bool| {
        let text = if on { "[x] On" } else { "[ ] Off" };
        text.to_string()
    };
    match field {
        ConfigField::Model => format!("◀ {} ▶", config.model),
        ConfigField::Temperature => format!("{:.1}", config.temperature()),
        ConfigField::MaxTokens => config.max_tokens().to_string(),
        ConfigField::Streaming => checkbox(config.streaming),
        ConfigField::Thinking => checkbox(config.thinking),
        ConfigField::AgentRouting => checkbox(config.agent_routing),
    }
}

fn scale_legend(field: ConfigField) -> String {
    match field {
        ConfigField::Temperature => {
            "Precise (0.0)    Balanced (1.0)    Creative (2.0)".to_string()
        }
        _ => format!(
            "{:<16}{:<16}{}",
            MAX_TOKENS_MIN,
            (MAX_TOKENS_MIN + MAX_TOKENS_MAX) / 2,
            MAX_TOKENS_MAX
        ),
    }
}
