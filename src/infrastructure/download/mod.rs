//! Download strategies.

mod browser;
mod direct;

pub use browser::BrowserDownloadStrategy;
pub use direct::DirectSaveStrategy;
