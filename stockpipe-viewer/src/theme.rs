//! Color tokens for the viewer.

use ratatui::style::{Color, Modifier, Style};

/// Electric cyan: the price line.
pub const ACCENT: Color = Color::Rgb(0, 229, 255);
/// Steel blue: axes and secondary text.
pub const MUTED: Color = Color::Rgb(110, 130, 160);
/// Neon orange: the title.
pub const WARNING: Color = Color::Rgb(255, 165, 0);

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn title() -> Style {
    Style::default().fg(WARNING).add_modifier(Modifier::BOLD)
}
