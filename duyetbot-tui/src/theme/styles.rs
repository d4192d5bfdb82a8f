use duyetbot_core::{StatusKind, SupportKind};
use ratatui::style::{Modifier, Style};

use super::Theme;

pub struct ThemedStyles<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ThemedStyles<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    pub fn base(&self) -> Style {
        Style::default()
            .bg(self.theme.background())
            .fg(self.theme.foreground())
    }

    pub fn surface(&self) -> Style {
        Style::default()
            .bg(self.theme.surface())
            .fg(self.theme.foreground())
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.theme.border())
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .bg(self.theme.selection())
            .fg(self.theme.foreground())
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.theme.foreground_dim())
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.theme.accent())
    }

    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.theme.accent_secondary())
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.theme.success())
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.theme.warning())
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.theme.error())
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.theme.info())
    }

    pub fn keybind(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.theme.info())
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_row_selected(&self) -> Style {
        Style::default()
            .bg(self.theme.selection())
            .fg(self.theme.foreground())
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.theme.background())
            .bg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.theme.foreground_dim())
    }

    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.theme.background())
            .bg(self.theme.accent())
    }

    pub fn button_focused(&self) -> Style {
        self.button().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn button_disabled(&self) -> Style {
        Style::default()
            .fg(self.theme.foreground_dim())
            .bg(self.theme.surface())
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.theme.foreground())
    }

    pub fn input_placeholder(&self) -> Style {
        Style::default()
            .fg(self.theme.foreground_dim())
            .add_modifier(Modifier::ITALIC)
    }

    pub fn user_bubble(&self) -> Style {
        Style::default()
            .fg(self.theme.background())
            .bg(self.theme.accent())
    }

    pub fn bot_bubble(&self) -> Style {
        Style::default()
            .fg(self.theme.foreground())
            .bg(self.theme.surface())
    }

    pub fn code(&self) -> Style {
        Style::default()
            .fg(self.theme.success())
            .bg(self.theme.surface())
    }

    pub fn gauge(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .bg(self.theme.surface())
    }

    pub fn star(&self, filled: bool) -> Style {
        if filled {
            Style::default().fg(self.theme.warning())
        } else {
            self.dimmed()
        }
    }

    pub fn status(&self, status: StatusKind) -> Style {
        match status {
            StatusKind::Online => self.success(),
            StatusKind::Degraded => self.warning(),
            StatusKind::Offline => self.error(),
        }
    }

    pub fn support(&self, support: SupportKind) -> Style {
        match support {
            SupportKind::Yes => self.success(),
            SupportKind::Partial => self.warning(),
            SupportKind::No => self.dimmed(),
        }
    }
}
