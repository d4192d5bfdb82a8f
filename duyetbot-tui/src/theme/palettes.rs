use ratatui::style::Color;

use super::Theme;

/// A named set of 24-bit colors, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub name: &'static str,
    pub background: u32,
    pub foreground: u32,
    pub foreground_dim: u32,
    pub surface: u32,
    pub border: u32,
    pub selection: u32,
    pub accent: u32,
    pub accent_secondary: u32,
    pub success: u32,
    pub warning: u32,
    pub error: u32,
    pub info: u32,
}

pub const TOKYO_NIGHT: ColorPalette = ColorPalette {
    name: "Tokyo Night",
    background: 0x1a1b26,
    foreground: 0xc0caf5,
    foreground_dim: 0x565f89,
    surface: 0x24283b,
    border: 0x414868,
    selection: 0x364a82,
    accent: 0x7aa2f7,
    accent_secondary: 0xbb9af7,
    success: 0x9ece6a,
    warning: 0xe0af68,
    error: 0xf7768e,
    info: 0x7dcfff,
};

/// Light palette matching the product site.
pub const DUYET_LIGHT: ColorPalette = ColorPalette {
    name: "Duyet Light",
    background: 0xffffff,
    foreground: 0x111827,
    foreground_dim: 0x6b7280,
    surface: 0xf3f4f6,
    border: 0xd1d5db,
    selection: 0xdbeafe,
    accent: 0x2563eb,
    accent_secondary: 0x7c3aed,
    success: 0x16a34a,
    warning: 0xca8a04,
    error: 0xdc2626,
    info: 0x0891b2,
};

pub const NORD: ColorPalette = ColorPalette {
    name: "Nord",
    background: 0x2e3440,
    foreground: 0xeceff4,
    foreground_dim: 0x4c566a,
    surface: 0x3b4252,
    border: 0x4c566a,
    selection: 0x434c5e,
    accent: 0x88c0d0,
    accent_secondary: 0x81a1c1,
    success: 0xa3be8c,
    warning: 0xebcb8b,
    error: 0xbf616a,
    info: 0x5e81ac,
};

pub const BUILTIN_PALETTES: &[ColorPalette] = &[TOKYO_NIGHT, DUYET_LIGHT, NORD];

pub fn hex_to_color(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Color::Rgb(r, g, b)
}

impl Theme for ColorPalette {
    fn name(&self) -> &'static str {
        self.name
    }

    fn background(&self) -> Color {
        hex_to_color(self.background)
    }

    fn foreground(&self) -> Color {
        hex_to_color(self.foreground)
    }

    fn foreground_dim(&self) -> Color {
        hex_to_color(self.foreground_dim)
    }

    fn surface(&self) -> Color {
        hex_to_color(self.surface)
    }

    fn border(&self) -> Color {
        hex_to_color(self.border)
    }

    fn selection(&self) -> Color {
        hex_to_color(self.selection)
    }

    fn accent(&self) -> Color {
        hex_to_color(self.accent)
    }

    fn accent_secondary(&self) -> Color {
        hex_to_color(self.accent_secondary)
    }

    fn success(&self) -> Color {
        hex_to_color(self.success)
    }

    fn warning(&self) -> Color {
        hex_to_color(self.warning)
    }

    fn error(&self) -> Color {
        hex_to_color(self.error)
    }

    fn info(&self) -> Color {
        hex_to_color(self.info)
    }
}
