//! Newest-first list of processed images.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::HistoryEntry;
use crate::presentation::theme::Theme;

/// Selection of the history list.
#[derive(Debug, Default)]
pub struct HistoryListState {
    list: ListState,
}

impl HistoryListState {
    /// Selected index.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    /// Moves down, stopping at the last entry.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.list.select(None);
            return;
        }
        let next = self.list.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list.select(Some(next));
    }

    /// Moves up, stopping at the first entry.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.list.select(None);
            return;
        }
        let prev = self.list.selected().map_or(0, |i| i.saturating_sub(1));
        self.list.select(Some(prev));
    }

    /// Keeps the selection inside a list of `len` entries.
    pub fn clamp(&mut self, len: usize) {
        match self.list.selected() {
            _ if len == 0 => self.list.select(None),
            Some(i) if i >= len => self.list.select(Some(len - 1)),
            None => self.list.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Moves the selection to the newest entry.
    pub fn select_first(&mut self, len: usize) {
        self.list.select((len > 0).then_some(0));
    }
}

/// List of processed images.
pub struct HistoryList<'a> {
    entries: &'a [HistoryEntry],
    timestamp_format: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    /// List of `entries`.
    #[must_use]
    pub const fn new(entries: &'a [HistoryEntry], theme: &'a Theme) -> Self {
        Self {
            entries,
            timestamp_format: "%Y-%m-%d %H:%M",
            focused: false,
            theme,
        }
    }

    /// Sets the chrono timestamp format.
    #[must_use]
    pub const fn timestamp_format(mut self, format: &'a str) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Highlights the border when focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn entry_line(&self, entry: &'a HistoryEntry) -> Line<'a> {
        let when = entry.created_at_local().map_or_else(
            || "unknown time".to_string(),
            |t| t.format(self.timestamp_format).to_string(),
        );
        Line::from(vec![
            Span::styled(format!("{when}  "), self.theme.dimmed_style),
            Span::styled(
                entry.original_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(entry.result_url(), Style::default().fg(self.theme.accent)),
        ])
    }
}

impl StatefulWidget for HistoryList<'_> {
    type State = HistoryListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.accent)
        } else {
            self.theme.dimmed_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" History ({}) ", self.entries.len()));

        if self.entries.is_empty() {
            Paragraph::new("No processed images yet.")
                .style(self.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(self.entry_line(entry)))
            .collect();

        let highlight = if self.focused {
            self.theme.selection_style
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");

        StatefulWidget::render(list, area, buf, &mut state.list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut state = HistoryListState::default();

        state.select_previous(3);
        assert_eq!(state.selected(), Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected(), Some(2));

        state.clamp(1);
        assert_eq!(state.selected(), Some(0));
        state.clamp(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_renders_entries_with_timestamp_format() {
        let theme = Theme::default();
        let entries = vec![HistoryEntry::at(
            "cat.png",
            "https://host/cut.png",
            1_700_000_000_000,
        )];
        let area = Rect::new(0, 0, 70, 4);
        let mut buf = Buffer::empty(area);
        let mut state = HistoryListState::default();
        state.select_first(entries.len());

        HistoryList::new(&entries, &theme)
            .timestamp_format("%Y")
            .focused(true)
            .render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert!(text.contains("History (1)"));
        assert!(text.contains("2023  cat.png  https://host/cut.png"));
    }

    #[test]
    fn test_renders_empty_hint() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);

        HistoryList::new(&[], &theme).render(area, &mut buf, &mut HistoryListState::default());

        assert!(buffer_text(&buf).contains("No processed images yet."));
    }
}
