use duyetbot_core::{FeaturePanel, FeatureRow, SupportKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::App;
use crate::events::Action;
use crate::theme::ThemedStyles;
use crate::ui::layout::{MainLayout, Regions};

use super::{panel_block, render_heading};

const CLOSE_LABEL: &str = "[x] Close";

pub struct FeaturesView;

impl FeaturesView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        features: &FeaturePanel,
        regions: &mut Regions,
    ) {
        let styles = ThemedStyles::new(app.current_theme());

        let (heading, body) = MainLayout::split_heading(area);
        render_heading(
            frame,
            heading,
            "Feature Comparison",
            "Compare capabilities between main and specialized agents",
            &styles,
        );

        let detail_height = if features.selected_row().is_some() { 6 } else { 0 };
        let tips_height = features.tips().len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(detail_height),
                Constraint::Length(tips_height),
            ])
            .split(body);

        Self::render_profiles(frame, chunks[0], features, &styles);
        Self::render_table(frame, chunks[1], features, &styles, regions);
        if let Some(row) = features.selected_row() {
            Self::render_detail(frame, chunks[2], row, &styles, regions);
        }
        Self::render_tips(frame, chunks[3], features.tips(), &styles);
    }

    fn render_profiles(frame: &mut Frame, area: Rect, features: &FeaturePanel, styles: &ThemedStyles) {
        let columns = MainLayout::create_two_column_layout(area, 50);
        for (column, profile) in columns.iter().zip(features.profiles()) {
            let block = panel_block(profile.name, styles).border_style(styles.accent());
            let inner = block.inner(*column);
            frame.render_widget(block, *column);
            frame.render_widget(
                Paragraph::new(Span::styled(profile.description, styles.input()))
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }

    fn render_table(
        frame: &mut Frame,
        area: Rect,
        features: &FeaturePanel,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let block = panel_block("Capabilities", styles);
        let inner = block.inner(area);

        let header = Row::new(vec!["Feature", "Main Agent", "Complex Agent"])
            .style(styles.table_header());
        let rows: Vec<Row> = features
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let marker = if features.selected() == Some(index) {
                    "▸ "
                } else {
                    "  "
                };
                Row::new(vec![
                    Cell::from(format!("{}{}", marker, row.name)),
                    support_cell(row.main, styles),
                    support_cell(row.complex, styles),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(styles.table_row_selected());

        let mut state = TableState::default().with_selected(Some(features.cursor()));
        frame.render_stateful_widget(table, area, &mut state);

        // Rows scroll once the table overflows; clicks are only mapped while
        // every row is visible.
        if (inner.height as usize) > features.rows().len() {
            for (index, row) in features.rows().iter().enumerate() {
                let y = inner.y + 1 + index as u16;
                regions.click(
                    Rect::new(inner.x, y, inner.width, 1),
                    Action::SelectFeature(index),
                    row.name,
                );
            }
        }
    }

    fn render_detail(
        frame: &mut Frame,
        area: Rect,
        row: &FeatureRow,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let block = panel_block(row.name, styles).border_style(styles.border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(row.description, styles.input())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Main Agent:    ", styles.dimmed()),
                Span::styled(support_text(row.main), styles.support(row.main)),
            ]),
            Line::from(vec![
                Span::styled("Complex Agent: ", styles.dimmed()),
                Span::styled(support_text(row.complex), styles.support(row.complex)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let close_width = CLOSE_LABEL.len() as u16;
        let close_area = Rect::new(
            inner.right().saturating_sub(close_width),
            inner.y,
            close_width,
            1,
        )
        .intersection(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(CLOSE_LABEL, styles.accent())).alignment(Alignment::Right),
            close_area,
        );
        regions.click(close_area, Action::CloseDetail, "Close");
    }

    fn render_tips(frame: &mut Frame, area: Rect, tips: &[&str], styles: &ThemedStyles) {
        let block = panel_block("Usage Tips", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = tips
            .iter()
            .map(|tip| {
                Line::from(vec![
                    Span::styled("• ", styles.accent()),
                    Span::styled(*tip, styles.input()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn support_text(support: SupportKind) -> String {
    format!("{} {}", support.icon(), support.label())
}

fn support_cell(support: SupportKind, styles: &ThemedStyles) -> Cell<'static> {
    Cell::from(Span::styled(support_text(support), styles.support(support)))
}
