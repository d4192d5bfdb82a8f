mod config;
mod features;
mod feedback;
mod playground;
mod status;

pub use config::ConfigView;
pub use features::FeaturesView;
pub use feedback::FeedbackView;
pub use playground::PlaygroundView;
pub use status::StatusView;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemedStyles;

/// Centered title and subtitle shown at the top of every panel.
pub(crate) fn render_heading(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    styles: &ThemedStyles,
) {
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(title.to_string(), styles.title())),
        Line::from(Span::styled(subtitle.to_string(), styles.dimmed())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, area);
}

pub(crate) fn panel_block<'a>(title: &'a str, styles: &ThemedStyles) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(styles.border())
        .style(styles.surface())
}

/// Greedy word wrap on whitespace. Words longer than `width` are split.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(chars.drain(..width).collect());
        }
        if chars.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { chars.len() } else { chars.len() + 1 };
        if current_len + needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars.iter());
        current_len += chars.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("What can you do today", 10),
            vec!["What can", "you do", "today"]
        );
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("anything", 0).is_empty());
    }
}
