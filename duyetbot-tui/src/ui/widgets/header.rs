use duyetbot_core::{catalog::PRODUCT_NAME, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::events::Action;
use crate::theme::ThemedStyles;
use crate::ui::layout::Regions;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MAIN_LINK_LABEL: &str = "Back to main ↗";

const TAB_GAP: u16 = 1;

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, regions: &mut Regions) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(styles.border())
            .style(styles.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let link_width = Span::raw(MAIN_LINK_LABEL).width() as u16 + 1;
        let brand_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(link_width)])
            .split(rows[0]);

        let brand = Paragraph::new(Line::from(vec![
            Span::styled(" DB ", styles.button()),
            Span::styled(format!(" {} ", PRODUCT_NAME), styles.title()),
            Span::styled("Interactive ", styles.dimmed()),
            Span::styled(format!("v{}", VERSION), styles.dimmed()),
        ]));
        frame.render_widget(brand, brand_row[0]);

        let link = Paragraph::new(Line::from(Span::styled(MAIN_LINK_LABEL, styles.link())))
            .alignment(Alignment::Right);
        frame.render_widget(link, brand_row[1]);
        regions.click(brand_row[1], Action::ShowLink, MAIN_LINK_LABEL);

        let active = app.shell.active_tab();
        for (tab, rect) in Self::tab_layout(rows[1]) {
            let style = if tab == active {
                styles.tab_active()
            } else {
                styles.tab_inactive()
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(tab_title(tab), style))),
                rect,
            );
            regions.click(rect, Action::GoToTab(tab), tab.label());
        }
    }

    /// Screen cells of every tab button in `row`, left to right. Tabs that
    /// do not fit are clipped or left out.
    pub fn tab_layout(row: Rect) -> Vec<(Tab, Rect)> {
        let right = row.x.saturating_add(row.width);
        let mut x = row.x;
        let mut out = Vec::new();

        for &tab in Tab::all() {
            if x >= right {
                break;
            }
            let width = (Span::raw(tab_title(tab)).width() as u16).min(right - x);
            out.push((tab, Rect::new(x, row.y, width, row.height.min(1))));
            x = x.saturating_add(width).saturating_add(TAB_GAP);
        }
        out
    }
}

fn tab_title(tab: Tab) -> String {
    format!(" {} {} ", tab.index() + 1, tab.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_layout_is_contiguous() {
        let layout = Header::tab_layout(Rect::new(2, 1, 200, 1));
        assert_eq!(layout.len(), Tab::all().len());
        assert_eq!(layout[0].1.x, 2);
        assert_eq!(layout[0].1.width, " 1 Chat Playground ".len() as u16);

        for pair in layout.windows(2) {
            let (_, a) = pair[0];
            let (_, b) = pair[1];
            assert_eq!(b.x, a.x + a.width + TAB_GAP);
        }
    }

    #[test]
    fn test_tab_layout_clips_narrow_rows() {
        let layout = Header::tab_layout(Rect::new(0, 0, 25, 1));
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[1].0, Tab::Status);
        assert_eq!(layout[1].1.x + layout[1].1.width, 25);
    }
}
