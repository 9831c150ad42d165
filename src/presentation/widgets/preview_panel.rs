//! Staged file and result panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::application::dto::PreviewState;
use crate::application::services::{ProcessingState, UploadSession};
use crate::presentation::theme::Theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const DATA_URL_CHARS: usize = 48;

/// Staged file details, processing status and the latest result.
pub struct PreviewPanel<'a> {
    session: &'a UploadSession,
    theme: &'a Theme,
    focused: bool,
    tick: usize,
}

impl<'a> PreviewPanel<'a> {
    /// Panel for `session`.
    #[must_use]
    pub const fn new(session: &'a UploadSession, theme: &'a Theme) -> Self {
        Self {
            session,
            theme,
            focused: false,
            tick: 0,
        }
    }

    /// Highlights the border when focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Frame counter driving the busy indicator.
    #[must_use]
    pub const fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    fn field(&self, name: &'static str, value: impl Into<String>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{name:<10}"), self.theme.dimmed_style),
            Span::raw(value.into()),
        ])
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let Some(candidate) = self.session.candidate() else {
            let mut lines = vec![
                Line::from("No image staged."),
                Line::default(),
                Line::from("Press o to browse, i to type a path, Ctrl+V to paste"),
                Line::from("an image, or drop a file onto the terminal."),
                Line::from("JPEG, PNG or WebP up to 10 MB."),
            ];
            if let Some(error) = self.session.last_error() {
                lines.push(Line::default());
                lines.push(self.error_line(&error.to_string()));
            }
            return lines;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                candidate.display_name().to_string(),
                self.theme.title_style,
            )),
            self.field("Type", candidate.media_type().label()),
            self.field("Size", candidate.size_label()),
        ];

        match self.session.preview() {
            PreviewState::Ready(preview) => {
                let (w, h) = preview.dimensions;
                lines.push(self.field("Pixels", format!("{w} x {h}")));
                lines.push(self.field("Preview", preview.abbreviated_data_url(DATA_URL_CHARS)));
            }
            PreviewState::Rendering => lines.push(self.field("Preview", "rendering...")),
            PreviewState::Unavailable => lines.push(self.field("Preview", "unavailable")),
            PreviewState::Empty => {}
        }

        lines.push(Line::default());
        lines.push(self.status_line());

        if let Some(result) = self.session.current_result() {
            lines.push(self.field("Result", result.result_url()));
            lines.push(Line::from(Span::styled(
                "d to download, y to copy the link",
                self.theme.dimmed_style,
            )));
        }
        if let Some(error) = self.session.last_error() {
            lines.push(self.error_line(&error.to_string()));
        }
        lines
    }

    fn status_line(&self) -> Line<'a> {
        match self.session.state() {
            ProcessingState::Idle => Line::from(Span::styled(
                "Ready. Press Enter to remove the background.",
                Style::default().fg(self.theme.accent),
            )),
            ProcessingState::InFlight(_) => {
                let frame = SPINNER[self.tick % SPINNER.len()];
                Line::from(Span::styled(
                    format!("{frame} Removing background..."),
                    Style::default()
                        .fg(self.theme.warning)
                        .add_modifier(Modifier::BOLD),
                ))
            }
            ProcessingState::Succeeded => Line::from(Span::styled(
                "Background removed.",
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            )),
        }
    }

    fn error_line(&self, message: &str) -> Line<'a> {
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(self.theme.error),
        ))
    }
}

impl Widget for PreviewPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.accent)
        } else {
            self.theme.dimmed_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Upload ");

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
