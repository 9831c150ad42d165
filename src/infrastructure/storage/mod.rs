//! Durable storage adapters.

mod history_file;

pub use history_file::JsonHistoryStorage;
