//! UI screens.

mod app;
mod backend;
mod notification_popup;
mod paste_guard;
mod upload_screen;

pub use app::{App, AppPorts, AppSettings};
pub use backend::{Action, Backend, BackendCommand, ChannelNotifier, Workers};
pub use notification_popup::NotificationPopup;
pub use paste_guard::PasteGuard;
pub use upload_screen::{ScreenOptions, UploadFocus, UploadKeyResult, UploadScreen, UploadScreenState};
