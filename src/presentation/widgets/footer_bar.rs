//! Footer with key hints.

use crate::domain::keybinding::Keybind;
use crate::presentation::theme::{Theme, palette};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Context named at the left of the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// Upload pane.
    #[default]
    Upload,
    /// History pane.
    History,
    /// File explorer overlay.
    FileExplorer,
    /// Path input overlay.
    PathInput,
}

impl FocusContext {
    /// Label shown in the footer.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Upload => "UPLOAD",
            Self::History => "HISTORY",
            Self::FileExplorer => "FILES",
            Self::PathInput => "PATH",
        }
    }
}

/// Styles of the footer.
pub struct FooterBarStyle {
    /// Bar background.
    pub background: Style,
    /// Action labels.
    pub label_style: Style,
    /// Key names.
    pub key_style: Style,
    /// Keys that currently do nothing.
    pub disabled_style: Style,
    /// Right-hand info text.
    pub info: Style,
    /// Focus context badge.
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    /// Styles for `theme`.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let key_bg = palette::shade(theme.accent, 0.08, 0.5);

        Self {
            label_style: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(key_bg).fg(Color::White),
            focus_indicator: Style::default()
                .bg(key_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            disabled_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            info: Style::default().fg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

const fn always_enabled(_: &Keybind) -> bool {
    true
}

/// One-line key hint bar.
pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    is_enabled: &'a dyn Fn(&Keybind) -> bool,
    focus_context: Option<FocusContext>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    /// Footer listing `keybindings`.
    #[must_use]
    pub fn new(keybindings: &'a [Keybind]) -> Self {
        Self {
            keybindings,
            is_enabled: &always_enabled,
            focus_context: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    /// Bindings for which `predicate` is false are drawn disabled.
    #[must_use]
    pub fn enabled_when(mut self, predicate: &'a dyn Fn(&Keybind) -> bool) -> Self {
        self.is_enabled = predicate;
        self
    }

    /// Sets the focus badge.
    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    /// Sets the right-hand text.
    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    /// Overrides the styles.
    #[must_use]
    pub fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Short human form of a key, e.g. `C-v`, `Enter`, `↑`.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }

        match key.code {
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::Delete => s.push_str("Del"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            other => s.push_str(&format!("{other:?}")),
        }
        s
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self
            .keybindings
            .iter()
            .filter(|k| k.visible_in_bar)
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::raw(" "));
            }

            let key_text = Self::format_key(&binding.key);
            if (self.is_enabled)(binding) {
                spans.push(Span::styled(
                    format!(" {} ", binding.label),
                    self.style.label_style,
                ));
                spans.push(Span::styled(format!(" {key_text} "), self.style.key_style));
            } else {
                spans.push(Span::styled(
                    format!(" {} {key_text} ", binding.label),
                    self.style.disabled_style,
                ));
            }
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.width()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        let left_line = Line::from(self.build_left_spans());
        Paragraph::new(left_line).render(Rect::new(area.x, area.y, left_width, 1), buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            Paragraph::new(Span::styled(info, self.style.info))
                .render(Rect::new(right_x, area.y, right_width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::{Action, upload_bindings};

    fn rendered(bar: FooterBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_format_key() {
        assert_eq!(
            FooterBar::format_key(&KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL)),
            "C-v"
        );
        assert_eq!(
            FooterBar::format_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)),
            "Del"
        );
    }

    #[test]
    fn test_hidden_bindings_not_rendered() {
        let bindings = upload_bindings();
        let line = rendered(
            FooterBar::new(&bindings).focus_context(FocusContext::Upload),
            200,
        );

        assert!(line.contains("UPLOAD"));
        assert!(line.contains("Paste"));
        assert!(line.contains("C-v"));
        assert!(!line.contains("Dismiss"));
    }

    #[test]
    fn test_right_info_rendered() {
        let bindings = upload_bindings();
        let line = rendered(FooterBar::new(&bindings).right_info(Some("3 saved")), 200);
        assert!(line.trim_end().ends_with("3 saved"));
    }

    #[test]
    fn test_disabled_binding_still_listed() {
        let bindings = upload_bindings();
        let predicate = |k: &Keybind| k.action != Action::Process;
        let line = rendered(FooterBar::new(&bindings).enabled_when(&predicate), 200);
        assert!(line.contains("Remove BG Enter"));
    }
}
