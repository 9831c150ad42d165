//! Use case implementations.

mod process_image_use_case;
mod stage_upload_use_case;

pub use process_image_use_case::{DEFAULT_PROCESSING_TIMEOUT, ProcessImageUseCase};
pub use stage_upload_use_case::{StageUploadUseCase, parse_dropped_path};
