use chrono::{DateTime, Local, Utc};
use duyetbot_core::{ServiceStatus, StatusKind, StatusPanel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::events::Action;
use crate::theme::ThemedStyles;
use crate::ui::layout::{MainLayout, Regions};

use super::{panel_block, render_heading};

pub struct StatusView;

impl StatusView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        status: &StatusPanel,
        regions: &mut Regions,
    ) {
        let styles = ThemedStyles::new(app.current_theme());

        let (heading, body) = MainLayout::split_heading(area);
        render_heading(
            frame,
            heading,
            "System Status Dashboard",
            "Real-time health monitoring for all services",
            &styles,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(body);

        Self::render_overview(frame, chunks[0], status, &styles, regions);
        Self::render_services(frame, chunks[1], status.services(), &styles);
        Self::render_legend(frame, chunks[2], &styles);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Last updated: ", styles.dimmed()),
            Span::styled(clock(status.last_updated()), styles.input()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn render_overview(
        frame: &mut Frame,
        area: Rect,
        status: &StatusPanel,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        let (badge, badge_style) = if status.is_live() {
            ("● Live", styles.success())
        } else {
            ("○ Paused", styles.warning())
        };
        let figures = [
            (
                "Services Online",
                format!("{}/{}", status.online_count(), status.total()),
                styles.accent_bold(),
            ),
            (
                "Overall Uptime",
                format!("{:.1}%", status.mean_uptime()),
                styles.accent_bold(),
            ),
            (
                "Monitoring",
                status.monitoring_label().to_string(),
                styles.accent_bold(),
            ),
            ("Status", badge.to_string(), badge_style),
        ];

        for (card, (label, value, style)) in cards.iter().zip(figures) {
            let block = panel_block(label, styles);
            let inner = block.inner(*card);
            frame.render_widget(block, *card);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(value, style))).alignment(Alignment::Center),
                inner,
            );
        }
        regions.click(cards[3], Action::ToggleAutoRefresh, "Toggle auto-refresh");
    }

    fn render_services(
        frame: &mut Frame,
        area: Rect,
        services: &[ServiceStatus],
        styles: &ThemedStyles,
    ) {
        let rows = services.len().div_ceil(2).max(1);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(area);

        for (row_area, pair) in row_areas.iter().zip(services.chunks(2)) {
            let columns = MainLayout::create_two_column_layout(*row_area, 50);
            for (column, service) in columns.iter().zip(pair) {
                Self::render_service_card(frame, *column, service, styles);
            }
        }
    }

    fn render_service_card(
        frame: &mut Frame,
        area: Rect,
        service: &ServiceStatus,
        styles: &ThemedStyles,
    ) {
        let block = panel_block(service.name, styles).border_style(styles.status(service.status));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                format!("● {}", service.status.label()),
                styles.status(service.status),
            )),
            Line::from(vec![
                Span::styled("Uptime      ", styles.dimmed()),
                Span::styled(service.uptime_label(), styles.input()),
            ]),
            Line::from(vec![
                Span::styled("Last Check  ", styles.dimmed()),
                Span::styled(clock(service.last_checked_at), styles.input()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_legend(frame: &mut Frame, area: Rect, styles: &ThemedStyles) {
        let block = panel_block("Status Legend", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let spans: Vec<Span> = StatusKind::all()
            .iter()
            .flat_map(|kind| {
                vec![
                    Span::styled("● ", styles.status(*kind)),
                    Span::styled(
                        format!("{} - {}   ", kind.label(), kind.description()),
                        styles.dimmed(),
                    ),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            inner,
        );
    }
}

fn clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
