use chrono::Local;
use duyetbot_core::{catalog::CHAT_NOTE, ChatMessage, ChatPanel, Sender};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::events::{Action, InputMode};
use crate::theme::ThemedStyles;
use crate::ui::layout::{MainLayout, Regions};

use super::{panel_block, render_heading, wrap_text};

pub const INPUT_PLACEHOLDER: &str = "Type your message...";
pub const TYPING_LABEL: &str = "Typing...";
const SEND_LABEL: &str = " Send ";

pub struct PlaygroundView;

impl PlaygroundView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        chat: &ChatPanel,
        regions: &mut Regions,
    ) {
        let styles = ThemedStyles::new(app.current_theme());
        let editing = app.event_handler.input_mode() == InputMode::Editing;

        let (heading, body) = MainLayout::split_heading(area);
        render_heading(
            frame,
            heading,
            "Interactive Chat Demo",
            "Experience how duyetbot responds to queries",
            &styles,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(body);

        Self::render_messages(frame, chunks[0], chat, &styles);
        Self::render_quick_questions(frame, chunks[1], chat, editing, &styles, regions);
        Self::render_input(frame, chunks[2], chat, editing, &styles, regions);

        let note = Paragraph::new(Line::from(vec![
            Span::styled("Note: ", styles.accent_bold()),
            Span::styled(CHAT_NOTE, styles.dimmed()),
        ]))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP).border_style(styles.border()));
        frame.render_widget(note, chunks[3]);
    }

    fn render_messages(frame: &mut Frame, area: Rect, chat: &ChatPanel, styles: &ThemedStyles) {
        let block = panel_block("Chat", styles);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = Self::message_lines(chat.messages(), chat.is_typing(), inner.width, styles);
        let skip = lines.len().saturating_sub(inner.height as usize);
        let skip = u16::try_from(skip).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), inner);
    }

    /// Bubble lines for the conversation, oldest first.
    pub fn message_lines(
        messages: &[ChatMessage],
        typing: bool,
        width: u16,
        styles: &ThemedStyles,
    ) -> Vec<Line<'static>> {
        let bubble_width = (width as usize * 3 / 4).max(10);
        let mut lines = Vec::new();

        for message in messages {
            let (style, alignment) = match message.sender {
                Sender::User => (styles.user_bubble(), Alignment::Right),
                Sender::Bot => (styles.bot_bubble(), Alignment::Left),
            };
            for text in wrap_text(&message.text, bubble_width.saturating_sub(2)) {
                lines.push(
                    Line::from(Span::styled(format!(" {} ", text), style)).alignment(alignment),
                );
            }
            let stamp = message
                .created_at
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string();
            lines.push(Line::from(Span::styled(stamp, styles.dimmed())).alignment(alignment));
            lines.push(Line::from(""));
        }

        if typing {
            lines.push(Line::from(Span::styled(
                format!(" {} ", TYPING_LABEL),
                styles.bot_bubble(),
            )));
        }
        lines
    }

    fn render_quick_questions(
        frame: &mut Frame,
        area: Rect,
        chat: &ChatPanel,
        editing: bool,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let right = area.x.saturating_add(area.width);
        let label = " Try: ";
        let mut spans = vec![Span::styled(label, styles.dimmed())];
        let mut x = area.x.saturating_add(label.len() as u16);

        for (index, question) in chat.quick_questions().iter().enumerate() {
            let text = format!("[{}]", question);
            let style = if !editing && index == chat.quick_cursor() {
                styles.selection()
            } else {
                styles.accent()
            };
            let width = Span::raw(text.as_str()).width() as u16;
            if x < right {
                let clipped = width.min(right - x);
                regions.click(
                    Rect::new(x, area.y, clipped, 1).intersection(area),
                    Action::UseQuickQuestion(index),
                    *question,
                );
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width + 1);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_input(
        frame: &mut Frame,
        area: Rect,
        chat: &ChatPanel,
        editing: bool,
        styles: &ThemedStyles,
        regions: &mut Regions,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(SEND_LABEL.len() as u16 + 2),
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if editing {
                styles.border_focused()
            } else {
                styles.border()
            });
        let inner = block.inner(columns[0]);

        let text = if chat.input().is_empty() {
            Span::styled(INPUT_PLACEHOLDER, styles.input_placeholder())
        } else {
            Span::styled(chat.input().to_string(), styles.input())
        };
        let input_width = Span::raw(chat.input()).width() as u16;
        let scroll = input_width.saturating_sub(inner.width.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(Line::from(text)).block(block).scroll((0, scroll)),
            columns[0],
        );
        regions.click(columns[0], Action::StartEditing, "Message input");

        if editing && !inner.is_empty() {
            let cursor_x = inner.x + input_width.saturating_sub(scroll);
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }

        // Disabled while a reply is pending; Enter still sends.
        let enabled = chat.can_send() && !chat.is_typing();
        let send_style = if enabled {
            styles.button()
        } else {
            styles.button_disabled()
        };
        // Centered inside the button column; shrinks to nothing on short terminals.
        let send_area = Rect::new(
            columns[1].x.saturating_add(1),
            columns[1].y.saturating_add(1),
            columns[1].width.saturating_sub(2),
            1,
        )
        .intersection(columns[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(SEND_LABEL, send_style)).alignment(Alignment::Center),
            send_area,
        );
        if enabled {
            regions.click(send_area, Action::Submit, "Send");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TOKYO_NIGHT;
    use chrono::Utc;

    #[test]
    fn test_message_lines_align_by_sender() {
        let styles = ThemedStyles::new(&TOKYO_NIGHT);
        let now = Utc::now();
        let messages = vec![ChatMessage::bot("Hello", now), ChatMessage::user("Hi there", now)];

        let lines = PlaygroundView::message_lines(&messages, true, 40, &styles);

        assert_eq!(lines[0].to_string(), " Hello ");
        assert_eq!(lines[0].alignment, Some(Alignment::Left));
        assert_eq!(lines[3].to_string(), " Hi there ");
        assert_eq!(lines[3].alignment, Some(Alignment::Right));
        assert_eq!(lines.last().map(|l| l.to_string()), Some(" Typing... ".to_string()));
    }

    #[test]
    fn test_long_messages_wrap() {
        let styles = ThemedStyles::new(&TOKYO_NIGHT);
        let messages = vec![ChatMessage::user("one two three four five six", Utc::now())];

        let lines = PlaygroundView::message_lines(&messages, false, 16, &styles);
        // 12-column bubble: three text lines, a timestamp and a spacer.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].to_string(), " one two ");
    }
}
