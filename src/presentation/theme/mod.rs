//! Colours derived from the configured accent.

pub mod palette;

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const FALLBACK_ACCENT: Color = Color::Magenta;

/// Colours and styles derived from the accent colour.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Accent colour, also used for info toasts.
    pub accent: Color,
    /// Success colour.
    pub success: Color,
    /// Warning colour.
    pub warning: Color,
    /// Error colour.
    pub error: Color,
    /// Selected list rows.
    pub selection_style: Style,
    /// Secondary text.
    pub dimmed_style: Style,
    /// Default text.
    pub base_style: Style,
    /// Block titles.
    pub title_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(FALLBACK_ACCENT)
    }
}

impl Theme {
    /// Theme for a colour name or hex code; unknown values fall back to magenta.
    #[must_use]
    pub fn new(accent: &str) -> Self {
        Self::from_color(parse_color(accent))
    }

    /// Theme for `accent`.
    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let selection_bg = palette::shade(accent, 0.2, 0.3);

        Self {
            accent,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            selection_style: Style::default()
                .bg(selection_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
        }
    }
}

/// Parses a colour name or `#rgb` / `#rrggbb` hex code.
fn parse_color(s: &str) -> Color {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).map_or(FALLBACK_ACCENT, |(r, g, b)| Color::Rgb(r, g, b));
    }
    if s.eq_ignore_ascii_case("orange") {
        return Color::Indexed(208);
    }
    Color::from_str(s).unwrap_or(FALLBACK_ACCENT)
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
            parse_hex_color(&doubled)
        }
        _ => None,
    }
}
