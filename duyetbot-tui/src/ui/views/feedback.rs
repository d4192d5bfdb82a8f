use duyetbot_core::{FeedbackField, FeedbackPanel, Rating, TestimonialCarousel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::events::{Action, HoverTarget, InputMode};
use crate::theme::ThemedStyles;
use crate::ui::layout::{MainLayout, Regions};

use super::{panel_block, wrap_text};

const PREV_LABEL: &str = "[←]";
const NEXT_LABEL: &str = "[→]";

pub struct FeedbackView;

impl FeedbackView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        form: &FeedbackPanel,
        carousel: &TestimonialCarousel,
        regions: &mut Regions,
    ) {
        let styles = ThemedStyles::new(app.current_theme());
        let editing = app.event_handler.input_mode() == InputMode::Editing;

        let columns = MainLayout::create_two_column_layout(area, 50);
        if form.is_submitted() {
            Self::render_thanks(frame, columns[0], &styles);
        } else {
            Self::render_form(frame, columns[0], form, editing, &styles, regions);
        }
        Self::render_carousel(frame, columns[1], carousel, &styles, regions);
    }

    fn render_thanks(frame: &mut Frame, area: Rect, styles: &ThemedStyles) {
        let block = panel_block("Feedback", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let top = inner.height.saturating_sub(5) / 2;
        let mut lines = vec![Line::from(""); top as usize];
        lines.extend([
            Line::from(Span::styled("Done", styles.success().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled("Thank You!", styles.title())),
            Line::from(""),
            Line::from(Span::styled(
                "Your feedback has been recorded. We appreciate your input!",
                styles.dimmed(),
            )),
        ]);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }

    fn render_form(
        frame: &mut Frame,
        area: Rect,
        form: &FeedbackPanel,
        editing: bool,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let block = panel_block("Share Your Feedback", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Help us improve duyetbot by sharing your thoughts",
                styles.dimmed(),
            )),
            rows[0],
        );

        let draft = form.draft();
        let fields = [
            (FeedbackField::Name, rows[1]),
            (FeedbackField::Email, rows[2]),
            (FeedbackField::Category, rows[3]),
            (FeedbackField::Rating, rows[4]),
            (FeedbackField::Message, rows[5]),
        ];

        for (field, rect) in fields {
            let focused = form.focus() == field;
            let title = match field {
                FeedbackField::Name | FeedbackField::Email | FeedbackField::Message => {
                    format!(" {} * ", field.label())
                }
                _ => format!(" {} ", field.label()),
            };
            let field_block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if focused {
                    styles.border_focused()
                } else {
                    styles.border()
                });
            let field_inner = field_block.inner(rect);
            frame.render_widget(field_block, rect);
            regions.click(rect, Action::FocusFeedbackField(field), field.label());

            match field {
                FeedbackField::Name | FeedbackField::Email | FeedbackField::Message => {
                    let value = match field {
                        FeedbackField::Name => &draft.name,
                        FeedbackField::Email => &draft.email,
                        _ => &draft.message,
                    };
                    Self::render_text_value(
                        frame,
                        field_inner,
                        value,
                        field.placeholder(),
                        focused && editing,
                        styles,
                    );
                }
                FeedbackField::Category => {
                    let line = Line::from(vec![
                        Span::styled("◀ ", styles.accent()),
                        Span::styled(draft.category.label(), styles.input()),
                        Span::styled(" ▶", styles.accent()),
                    ]);
                    frame.render_widget(Paragraph::new(line), field_inner);
                }
                FeedbackField::Rating => {
                    Self::render_stars(frame, field_inner, draft.rating, styles, regions);
                }
                FeedbackField::Submit => {}
            }
        }

        let submit_focused = form.focus() == FeedbackField::Submit;
        let label = format!(" {} ", FeedbackField::Submit.label());
        let submit_area =
            Rect::new(rows[6].x, rows[6].y, label.len() as u16, rows[6].height).intersection(rows[6]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                if submit_focused {
                    styles.button_focused()
                } else {
                    styles.button()
                },
            )),
            submit_area,
        );
        regions.click(submit_area, Action::Submit, "Submit Feedback");
    }

    fn render_text_value(
        frame: &mut Frame,
        area: Rect,
        value: &str,
        placeholder: &str,
        with_cursor: bool,
        styles: &ThemedStyles,
    ) {
        if value.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(placeholder.to_string(), styles.input_placeholder())),
                area,
            );
            if with_cursor && !area.is_empty() {
                frame.set_cursor_position((area.x, area.y));
            }
            return;
        }

        let width = area.width.max(1) as usize;
        let lines = wrap_text(value, width);
        let skip = lines.len().saturating_sub(area.height.max(1) as usize);
        let visible: Vec<Line> = lines
            .iter()
            .skip(skip)
            .map(|l| Line::from(Span::styled(l.clone(), styles.input())))
            .collect();

        if with_cursor && !area.is_empty() {
            let last_width = visible
                .last()
                .map(|l| l.width() as u16)
                .unwrap_or(0)
                .min(area.width.saturating_sub(1));
            let row = (visible.len() as u16).saturating_sub(1);
            frame.set_cursor_position((area.x + last_width, area.y + row));
        }
        frame.render_widget(Paragraph::new(visible), area);
    }

    fn render_stars(
        frame: &mut Frame,
        area: Rect,
        rating: Rating,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let mut spans = Vec::new();
        for (slot, value) in (Rating::MIN..=Rating::MAX).enumerate() {
            let filled = value <= rating.value();
            let star = if filled { "★" } else { "☆" };
            spans.push(Span::styled(star, styles.star(filled)));
            spans.push(Span::raw(" "));

            let x = area.x + slot as u16 * 2;
            if x < area.right() {
                regions.click(
                    Rect::new(x, area.y, 1, 1).intersection(area),
                    Action::SetRating(value),
                    format!("{} stars", value),
                );
            }
        }
        spans.push(Span::styled(
            format!(" {}/{}", rating.value(), Rating::MAX),
            styles.dimmed(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_carousel(
        frame: &mut Frame,
        area: Rect,
        carousel: &TestimonialCarousel,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(4), Constraint::Length(4)])
            .split(area);

        let block = panel_block("What People Say", styles);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        regions.hover(chunks[0], HoverTarget::Carousel);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let nav_width = (PREV_LABEL.chars().count() + NEXT_LABEL.chars().count() + 1) as u16;
        let nav_x = rows[0].right().saturating_sub(nav_width);
        let prev_area = Rect::new(nav_x, rows[0].y, 3, 1).intersection(rows[0]);
        let next_area = Rect::new(nav_x.saturating_add(4), rows[0].y, 3, 1).intersection(rows[0]);
        let paused = if carousel.is_paused() { "Paused" } else { "" };
        frame.render_widget(
            Paragraph::new(Span::styled(paused, styles.dimmed())),
            rows[0],
        );
        frame.render_widget(Paragraph::new(Span::styled(PREV_LABEL, styles.accent())), prev_area);
        frame.render_widget(Paragraph::new(Span::styled(NEXT_LABEL, styles.accent())), next_area);
        regions.click(prev_area, Action::PreviousSlide, "Previous testimonial");
        regions.click(next_area, Action::NextSlide, "Next testimonial");

        if let Some(testimonial) = carousel.current() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "★".repeat(usize::from(testimonial.rating)),
                styles.star(true),
            ))];
            lines.push(Line::from(""));
            lines.extend(
                wrap_text(&format!("\"{}\"", testimonial.content), rows[1].width.max(1) as usize)
                    .into_iter()
                    .map(|l| {
                        Line::from(Span::styled(
                            l,
                            styles.input().add_modifier(Modifier::ITALIC),
                        ))
                    }),
            );
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                testimonial.name,
                styles.input().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(testimonial.role, styles.dimmed())));
            frame.render_widget(Paragraph::new(lines), rows[1]);
        }

        let dots_width = (carousel.count() * 2) as u16;
        let dots_x = rows[2].x + rows[2].width.saturating_sub(dots_width) / 2;
        let mut dots = Vec::new();
        for index in 0..carousel.count() {
            let style = if index == carousel.index() {
                styles.accent_bold()
            } else {
                styles.dimmed()
            };
            let symbol = if index == carousel.index() { "●" } else { "○" };
            dots.push(Span::styled(symbol, style));
            dots.push(Span::raw(" "));
            regions.click(
                Rect::new(dots_x.saturating_add(index as u16 * 2), rows[2].y, 1, 1)
                    .intersection(rows[2]),
                Action::GoToSlide(index),
                format!("Testimonial {}", index + 1),
            );
        }
        frame.render_widget(
            Paragraph::new(Line::from(dots)),
            Rect::new(dots_x, rows[2].y, dots_width, rows[2].height).intersection(rows[2]),
        );

        let stats = MainLayout::create_two_column_layout(chunks[1], 50);
        let figures = [
            (format!("{:.1}", carousel.average_rating()), "Average Rating"),
            (carousel.count().to_string(), "Testimonials"),
        ];
        for (rect, (value, label)) in stats.iter().zip(figures) {
            let block = panel_block("", styles);
            let card_inner = block.inner(*rect);
            frame.render_widget(block, *rect);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(value, styles.accent_bold())),
                    Line::from(Span::styled(label, styles.dimmed())),
                ])
                .alignment(Alignment::Center),
                card_inner,
            );
        }

        let share = Paragraph::new(vec![
            Line::from(Span::styled("Share Your Experience", styles.accent_bold())),
            Line::from(Span::styled(
                "Have you used duyetbot? Add your testimonial!",
                styles.input(),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles.accent()),
        );
        frame.render_widget(share, chunks[2]);
    }
}
