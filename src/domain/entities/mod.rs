//! Domain entity definitions.

mod clipboard_item;
mod history_entry;
mod media_type;
mod processed_image;
mod upload_candidate;

pub use clipboard_item::{ClipboardItem, first_image};
pub use history_entry::{EntryId, HistoryEntry};
pub use media_type::{MediaType, UNKNOWN_MEDIA_TYPE};
pub use processed_image::ProcessedImage;
pub use upload_candidate::{UploadCandidate, format_megabytes, result_name_for};
