//! Command-line arguments.

use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "snapcut",
    version,
    about = "Remove image backgrounds from the terminal",
    long_about = None
)]
/// Command-line arguments.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Background removal endpoint.
    #[arg(long, value_name = "URL", env = "SNAPCUT_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Directory downloaded results are saved to.
    #[arg(long, value_name = "PATH", global = true)]
    pub download_dir: Option<PathBuf>,

    /// Enable desktop notifications.
    #[arg(long, global = true)]
    pub desktop_notifications: Option<bool>,

    /// Accent color (name or hex code).
    #[arg(long, global = true)]
    pub accent_color: Option<String>,

    /// Runs a single command instead of the interactive view.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Headless subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Remove the background of an image file.
    Process {
        /// JPG, PNG or WebP file, at most 10 MB.
        file: PathBuf,

        /// Download the result once processing succeeds.
        #[arg(short, long)]
        download: bool,
    },
    /// Download a processed image.
    Download {
        /// Result URL.
        url: String,

        /// File name to save as.
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Inspect or edit processing history.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Show pricing plans.
    Plans,
    /// Show product features.
    Features,
    /// Show the site map.
    Routes,
}

/// History subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum HistoryCommand {
    /// List processed images, newest first.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Remove one entry.
    Remove {
        /// Entry id as shown by `history list`.
        id: String,
    },
    /// Remove all entries.
    Clear,
}
