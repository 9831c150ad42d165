//! Reusable widgets.

mod file_explorer;
mod footer_bar;
mod history_list;
mod path_input;
mod preview_panel;

pub use file_explorer::{FileExplorer, FileExplorerAction};
pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use history_list::{HistoryList, HistoryListState};
pub use path_input::{PathInput, PathInputAction, PathInputView};
pub use preview_panel::PreviewPanel;
