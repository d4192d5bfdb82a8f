use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::Keybinds;
use crate::theme::{Theme, ThemedStyles};

const WIDTH_PERCENT: u16 = 70;
const HEIGHT_PERCENT: u16 = 80;

pub struct HelpModal;

impl HelpModal {
    pub fn calculate_area(screen: Rect) -> Rect {
        let width = (screen.width as u32 * WIDTH_PERCENT as u32 / 100) as u16;
        let height = (screen.height as u32 * HEIGHT_PERCENT as u32 / 100) as u16;

        let width = width.max(20).min(screen.width.saturating_sub(4));
        let height = height.max(10).min(screen.height.saturating_sub(2));

        let x = screen.x + screen.width.saturating_sub(width) / 2;
        let y = screen.y + screen.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }

    pub fn lines(keybinds: &Keybinds, theme: &dyn Theme) -> Vec<Line<'static>> {
        let styles = ThemedStyles::new(theme);
        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                styles
                    .secondary()
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))
        };
        let row = |keys: String, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<16}"), styles.keybind()),
                Span::styled(desc, styles.input()),
            ])
        };

        let mut lines = vec![Line::from(""), section("Keys"), Line::from("")];
        lines.extend(
            keybinds
                .help_rows()
                .into_iter()
                .map(|(keys, desc)| row(keys, desc)),
        );
        lines.extend([
            Line::from(""),
            section("While typing"),
            Line::from(""),
            row("Enter".to_string(), "Send message / submit form"),
            row("Tab / ↓".to_string(), "Next field"),
            row("Shift+Tab / ↑".to_string(), "Previous field"),
            row("Esc".to_string(), "Stop typing"),
            Line::from(""),
            section("Mouse"),
            Line::from(""),
            row("Click".to_string(), "Tabs, buttons, rows, stars and dots"),
            row("Hover".to_string(), "Pauses the testimonial carousel"),
        ]);
        lines
    }

    pub fn render(
        frame: &mut Frame,
        screen: Rect,
        keybinds: &Keybinds,
        theme: &dyn Theme,
        scroll: u16,
    ) {
        let styles = ThemedStyles::new(theme);
        let area = Self::calculate_area(screen);

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" Esc/?: Close  j/k: Scroll ").centered())
            .borders(Borders::ALL)
            .border_style(styles.border_focused())
            .style(styles.surface());

        let paragraph = Paragraph::new(Self::lines(keybinds, theme))
            .block(block)
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TOKYO_NIGHT;

    #[test]
    fn test_calculate_area_is_centered() {
        let area = HelpModal::calculate_area(Rect::new(0, 0, 100, 50));
        assert_eq!(area, Rect::new(15, 5, 70, 40));
    }

    #[test]
    fn test_lines_list_every_binding() {
        let keybinds = Keybinds::new();
        let lines = HelpModal::lines(&keybinds, &TOKYO_NIGHT);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

        assert!(text.iter().any(|l| l.contains("Pause / resume status refresh")));
        assert!(text.iter().any(|l| l.contains("Stop typing")));
        assert!(lines.len() > keybinds.help_rows().len());
    }
}
