//! Directory browser for picking images.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use crate::domain::entities::MediaType;
use crate::presentation::theme::Theme;

/// Outcome of a key press in the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileExplorerAction {
    /// A file was chosen.
    SelectFile(PathBuf),
    /// The explorer should close.
    Close,
    /// Nothing to do.
    None,
}

#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    is_dir: bool,
    name: String,
    accepted: bool,
}

/// Directory browser for picking an image to upload.
pub struct FileExplorer {
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    state: ListState,
    show_hidden: bool,
    images_only: bool,
}

impl FileExplorer {
    /// Opens the explorer in `start_dir`.
    #[must_use]
    pub fn new(start_dir: PathBuf, images_only: bool) -> Self {
        let mut explorer = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            state: ListState::default(),
            show_hidden: false,
            images_only,
        };
        explorer.reload();
        explorer
    }

    /// Directory being listed.
    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn reload(&mut self) {
        let selected_name = self.selected_entry().map(|e| e.name.clone());
        self.entries.clear();

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                path: parent.to_path_buf(),
                is_dir: true,
                name: "..".to_string(),
                accepted: true,
            });
        }

        if let Ok(read_dir) = fs::read_dir(&self.current_dir) {
            let mut entries: Vec<FileEntry> = read_dir
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.path();
                    let name = path.file_name()?.to_string_lossy().into_owned();
                    if !self.show_hidden && name.starts_with('.') {
                        return None;
                    }
                    let is_dir = path.is_dir();
                    let accepted = is_dir || is_accepted_image(&path);
                    if self.images_only && !accepted {
                        return None;
                    }
                    Some(FileEntry {
                        path,
                        is_dir,
                        name,
                        accepted,
                    })
                })
                .collect();

            entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            });

            self.entries.extend(entries);
        }

        let index = selected_name
            .and_then(|name| self.entries.iter().position(|e| e.name == name))
            .or_else(|| (!self.entries.is_empty()).then_some(0));
        self.state.select(index);
    }

    fn enter(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.state.select(None);
        self.reload();
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) {
            self.enter(parent);
        }
    }

    /// Shows or hides dotfiles.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.reload();
    }

    /// Handles navigation keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> FileExplorerAction {
        match key.code {
            KeyCode::Esc => FileExplorerAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_relative(-1);
                FileExplorerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_relative(1);
                FileExplorerAction::None
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => {
                self.go_up();
                FileExplorerAction::None
            }
            KeyCode::Char('.') => {
                self.toggle_hidden();
                FileExplorerAction::None
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_selected(),
            _ => FileExplorerAction::None,
        }
    }

    fn activate_selected(&mut self) -> FileExplorerAction {
        let Some(selected) = self.selected_entry().cloned() else {
            return FileExplorerAction::None;
        };
        if selected.name == ".." {
            self.go_up();
            FileExplorerAction::None
        } else if selected.is_dir {
            self.enter(selected.path);
            FileExplorerAction::None
        } else {
            FileExplorerAction::SelectFile(selected.path)
        }
    }

    fn select_relative(&mut self, delta: isize) {
        let len = self.entries.len();
        if len == 0 {
            self.state.select(None);
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        let next = current.checked_add_signed(delta).map_or(len - 1, |i| i % len);
        self.state.select(Some(next));
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Draws the explorer into `area`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        Clear.render(area, buf);

        let title = format!(" Select an image: {} ", self.current_dir.display());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner_area = block.inner(area);
        let [list_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner_area);

        block.render(area, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let (icon, color) = if entry.is_dir {
                    ("  ", Color::Blue)
                } else if entry.accepted {
                    ("  ", Color::White)
                } else {
                    ("  ", Color::DarkGray)
                };
                ListItem::new(format!("{icon}{}", entry.name)).style(Style::default().fg(color))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme.selection_style)
            .highlight_symbol(">> ");

        StatefulWidget::render(list, list_area, buf, &mut self.state);

        let footer = Line::from(vec![
            Span::raw(" [Esc] Cancel | [Enter] Open/Select | [h] Up | [.] Hidden "),
        ])
        .style(theme.dimmed_style);

        Widget::render(footer, footer_area, buf);
    }
}

fn is_accepted_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaType::from_extension)
        .is_some()
}
