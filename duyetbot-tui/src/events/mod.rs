mod handler;
mod keybinds;

pub use handler::{
    Action, ClickableRegion, EventHandler, HoverRegion, HoverTarget, InputMode, ScrollDirection,
};
pub use keybinds::{
    KeyBinding, KeybindConfig, Keybinds, SerializableKeyCode, SerializableKeyModifiers,
};
