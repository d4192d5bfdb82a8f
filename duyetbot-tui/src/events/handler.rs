use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use duyetbot_core::{ConfigField, FeedbackField, Tab};
use ratatui::layout::{Position, Rect};

use super::keybinds::Keybinds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    GoToTab(Tab),
    Help,
    ToggleTheme,
    Back,
    Up,
    Down,
    Left,
    Right,
    Select,
    Toggle,
    Reset,
    StartEditing,
    StopEditing,
    Submit,
    InsertChar(char),
    DeleteChar,
    PreviousSlide,
    NextSlide,
    GoToSlide(usize),
    CloseDetail,
    SelectFeature(usize),
    UseQuickQuestion(usize),
    SetRating(u8),
    FocusConfigField(ConfigField),
    FocusFeedbackField(FeedbackField),
    ToggleAutoRefresh,
    ShowLink,
    PointerMoved { over: Option<HoverTarget> },
    MouseClick { x: u16, y: u16 },
    MouseScroll { direction: ScrollDirection },
    Resize { width: u16, height: u16 },
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Normal mode dispatches through the keybind table; editing mode sends
/// printable keys to the focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Screen areas that react to pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Carousel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickableRegion {
    pub area: Rect,
    pub action: Action,
    pub label: String,
}

impl ClickableRegion {
    pub fn new(area: Rect, action: Action, label: impl Into<String>) -> Self {
        Self {
            area,
            action,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverRegion {
    pub area: Rect,
    pub target: HoverTarget,
}

pub struct EventHandler {
    input_mode: InputMode,
    keybinds: Keybinds,
    terminal_size: Option<(u16, u16)>,
    clickable_regions: Vec<ClickableRegion>,
    hover_regions: Vec<HoverRegion>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self::with_keybinds(Keybinds::new())
    }

    pub fn with_keybinds(keybinds: Keybinds) -> Self {
        Self {
            input_mode: InputMode::Normal,
            keybinds,
            terminal_size: None,
            clickable_regions: Vec::new(),
            hover_regions: Vec::new(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    pub fn keybinds(&self) -> &Keybinds {
        &self.keybinds
    }

    pub fn terminal_size(&self) -> Option<(u16, u16)> {
        self.terminal_size
    }

    pub fn set_clickable_regions(&mut self, regions: Vec<ClickableRegion>) {
        self.clickable_regions = regions;
    }

    pub fn set_hover_regions(&mut self, regions: Vec<HoverRegion>) {
        self.hover_regions = regions;
    }

    pub fn clickable_regions(&self) -> &[ClickableRegion] {
        &self.clickable_regions
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => None,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.handle_resize(width, height),
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key),
            InputMode::Editing => self.handle_editing_mode_key(key),
        }
    }

    fn handle_normal_mode_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Terminals disagree on whether shifted punctuation carries SHIFT.
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        self.keybinds.get(key.code, modifiers).cloned()
    }

    fn handle_editing_mode_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl_pressed = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl_pressed) {
            (KeyCode::Char('c'), true) => Some(Action::Quit),
            (KeyCode::Esc, _) => {
                self.input_mode = InputMode::Normal;
                Some(Action::StopEditing)
            }
            (KeyCode::Enter, _) => Some(Action::Submit),
            (KeyCode::Backspace, _) => Some(Action::DeleteChar),
            (KeyCode::Tab, _) | (KeyCode::Down, _) => Some(Action::Down),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => Some(Action::Up),
            (KeyCode::Left, _) => Some(Action::Left),
            (KeyCode::Right, _) => Some(Action::Right),
            (KeyCode::Char(c), false) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Action::InsertChar(c))
            }
            _ => None,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .clickable_regions
                    .iter()
                    .find(|region| region.area.contains(position));
                match hit {
                    Some(region) => Some(region.action.clone()),
                    None => Some(Action::MouseClick {
                        x: mouse.column,
                        y: mouse.row,
                    }),
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let over = self
                    .hover_regions
                    .iter()
                    .find(|region| region.area.contains(position))
                    .map(|region| region.target);
                Some(Action::PointerMoved { over })
            }
            MouseEventKind::ScrollUp => Some(Action::MouseScroll {
                direction: ScrollDirection::Up,
            }),
            MouseEventKind::ScrollDown => Some(Action::MouseScroll {
                direction: ScrollDirection::Down,
            }),
            _ => None,
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) -> Option<Action> {
        self.terminal_size = Some((width, height));
        Some(Action::Resize { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_normal_mode_quit() {
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_tab_switching() {
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Tab)),
            Some(Action::NextTab)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::BackTab)),
            Some(Action::PrevTab)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('1'))),
            Some(Action::GoToTab(Tab::Playground))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('5'))),
            Some(Action::GoToTab(Tab::Feedback))
        );
    }

    #[test]
    fn test_normal_mode_panel_keys() {
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('j'))),
            Some(Action::Down)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Left)),
            Some(Action::Left)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char(' '))),
            Some(Action::Toggle)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('p'))),
            Some(Action::ToggleAutoRefresh)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('['))),
            Some(Action::PreviousSlide)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('x'))),
            Some(Action::CloseDetail)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('i'))),
            Some(Action::StartEditing)
        );
    }

    #[test]
    fn test_shifted_help_key() {
        let mut handler = EventHandler::new();
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key(shifted), Some(Action::Help));
    }

    #[test]
    fn test_editing_mode_captures_text() {
        let mut handler = EventHandler::new();
        handler.set_input_mode(InputMode::Editing);

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('1'))),
            Some(Action::InsertChar('1'))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            Some(Action::DeleteChar)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            Some(Action::Submit)
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_escape_leaves_editing_mode() {
        let mut handler = EventHandler::new();
        handler.set_input_mode(InputMode::Editing);

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Esc)),
            Some(Action::StopEditing)
        );
        assert_eq!(handler.input_mode(), InputMode::Normal);
    }

    #[test]
    fn test_clickable_regions() {
        let mut handler = EventHandler::new();
        handler.set_clickable_regions(vec![ClickableRegion::new(
            Rect::new(10, 10, 20, 5),
            Action::GoToTab(Tab::Status),
            "System Status",
        )]);

        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 12)),
            Some(Action::GoToTab(Tab::Status))
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)),
            Some(Action::MouseClick { x: 5, y: 5 })
        );
    }

    #[test]
    fn test_hover_regions() {
        let mut handler = EventHandler::new();
        handler.set_hover_regions(vec![HoverRegion {
            area: Rect::new(0, 20, 40, 10),
            target: HoverTarget::Carousel,
        }]);

        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Moved, 5, 25)),
            Some(Action::PointerMoved {
                over: Some(HoverTarget::Carousel)
            })
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Moved, 5, 5)),
            Some(Action::PointerMoved { over: None })
        );
    }

    #[test]
    fn test_resize() {
        let mut handler = EventHandler::new();
        assert_eq!(handler.terminal_size(), None);

        assert_eq!(
            handler.handle_resize(120, 40),
            Some(Action::Resize {
                width: 120,
                height: 40
            })
        );
        assert_eq!(handler.terminal_size(), Some((120, 40)));
    }
}
