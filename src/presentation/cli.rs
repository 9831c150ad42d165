//! Headless subcommands.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail};
use tracing::{info, warn};

use crate::application::dto::CompletionOutcome;
use crate::application::services::{ClipboardCapture, DownloadResolver, HistoryStore, UploadSession};
use crate::application::use_cases::{ProcessImageUseCase, StageUploadUseCase};
use crate::domain::NotificationLevel;
use crate::domain::catalog::{FEATURES, PLANS, ROUTES};
use crate::domain::entities::{EntryId, HistoryEntry, result_name_for};
use crate::domain::ports::{
    ClipboardPort, DownloadReceipt, DownloadStrategy, HistoryStoragePort, NotificationPort,
    ProcessingPort,
};
use crate::infrastructure::config::{Command, HistoryCommand};

/// Adapters and settings a headless run needs.
pub struct CliContext {
    /// Background removal service.
    pub processing: Arc<dyn ProcessingPort>,
    /// System clipboard.
    pub clipboard: Arc<dyn ClipboardPort>,
    /// History persistence.
    pub history: Arc<dyn HistoryStoragePort>,
    /// First download strategy.
    pub direct_download: Arc<dyn DownloadStrategy>,
    /// Strategy used when the direct one fails.
    pub fallback_download: Arc<dyn DownloadStrategy>,
    /// Progress sink.
    pub notifier: Arc<dyn NotificationPort>,
    /// Processing timeout.
    pub timeout: Duration,
    /// chrono format for history timestamps.
    pub timestamp_format: String,
}

impl CliContext {
    fn downloads(&self) -> DownloadResolver {
        DownloadResolver::new(
            self.direct_download.clone(),
            self.fallback_download.clone(),
            self.notifier.clone(),
        )
    }
}

/// Prints notifications to stderr so stdout stays machine readable.
pub struct StderrNotifier;

impl NotificationPort for StderrNotifier {
    fn send(&self, level: NotificationLevel, title: &str, body: &str) {
        let tag = level.tag();
        if body.is_empty() {
            eprintln!("[{tag}] {title}");
        } else {
            eprintln!("[{tag}] {title}: {body}");
        }
    }
}

/// Runs `command`, writing its output to `out`.
///
/// # Errors
/// Returns error if the command fails; the binary exits non-zero.
pub async fn run(ctx: &CliContext, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Process { file, download } => process(ctx, &file, download, out).await,
        Command::Download { url, name } => {
            let name = name.unwrap_or_else(|| name_from_url(&url));
            download_to(ctx, &url, &name, out).await
        }
        Command::History { action } => history(ctx, action, out),
        Command::Plans => print_plans(out),
        Command::Features => print_features(out),
        Command::Routes => print_routes(out),
    }
}

async fn process(ctx: &CliContext, file: &Path, download: bool, out: &mut dyn Write) -> Result<()> {
    let stage = StageUploadUseCase::new(ClipboardCapture::new(ctx.clipboard.clone()));
    let candidate = stage
        .from_path(file)
        .await
        .wrap_err_with(|| format!("cannot upload {}", file.display()))?;

    ctx.notifier.send(
        NotificationLevel::Info,
        "Removing background",
        &format!("{} ({})", candidate.display_name(), candidate.size_label()),
    );

    let mut session = UploadSession::new(HistoryStore::load(ctx.history.clone()));
    session.stage(candidate);
    let job = session.begin_processing()?;
    let completion = ProcessImageUseCase::new(ctx.processing.clone(), ctx.timeout)
        .execute(&job)
        .await;

    match session.complete_processing(completion) {
        CompletionOutcome::Succeeded {
            entry,
            persist_error,
            ..
        } => {
            if let Some(e) = persist_error {
                warn!(error = %e, "Result not saved to history");
                ctx.notifier
                    .send(NotificationLevel::Warn, "History not saved", &e.to_string());
            }
            writeln!(out, "{}", entry.result_url())?;
            info!(id = %entry.id(), "Headless processing finished");

            if download {
                download_to(ctx, entry.result_url(), &entry.suggested_file_name(), out).await?;
            }
            Ok(())
        }
        CompletionOutcome::Failed { error, .. } => Err(error.into()),
    }
}

async fn download_to(ctx: &CliContext, url: &str, name: &str, out: &mut dyn Write) -> Result<()> {
    match ctx.downloads().download(url, name).await? {
        DownloadReceipt::Saved(path) => writeln!(out, "Saved {}", path.display())?,
        DownloadReceipt::Dispatched { url } => writeln!(out, "Opened {url} in the browser")?,
    }
    Ok(())
}

fn name_from_url(url: &str) -> String {
    let last = url
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .unwrap_or_default();
    result_name_for(last)
}

fn history(ctx: &CliContext, action: HistoryCommand, out: &mut dyn Write) -> Result<()> {
    let mut store = HistoryStore::load(ctx.history.clone());

    match action {
        HistoryCommand::List { json } => {
            if json {
                serde_json::to_writer_pretty(&mut *out, store.entries())?;
                writeln!(out)?;
            } else {
                print_history_table(store.entries(), &ctx.timestamp_format, out)?;
            }
        }
        HistoryCommand::Remove { id } => match store.remove(&EntryId::from(id.as_str()))? {
            Some(entry) => writeln!(out, "Removed {} ({})", entry.id(), entry.original_name())?,
            None => bail!("no history entry with id {id}"),
        },
        HistoryCommand::Clear => {
            let count = store.len();
            store.clear()?;
            writeln!(out, "Cleared {count} entries")?;
        }
    }
    Ok(())
}

fn print_history_table(
    entries: &[HistoryEntry],
    timestamp_format: &str,
    out: &mut dyn Write,
) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No processed images yet.")?;
        return Ok(());
    }
    for entry in entries {
        let when = entry.created_at_local().map_or_else(
            || "-".to_string(),
            |t| t.format(timestamp_format).to_string(),
        );
        writeln!(
            out,
            "{}  {when}  {}  {}",
            entry.id(),
            entry.original_name(),
            entry.result_url()
        )?;
    }
    Ok(())
}

fn print_plans(out: &mut dyn Write) -> Result<()> {
    for plan in &PLANS {
        let marker = if plan.highlighted { " (most popular)" } else { "" };
        writeln!(out, "{} {}{}{marker}", plan.name, plan.price, plan.period)?;
        writeln!(out, "  {}", plan.description)?;
        for feature in plan.features {
            writeln!(out, "  - {feature}")?;
        }
        writeln!(out, "  [{}]", plan.call_to_action)?;
    }
    Ok(())
}

fn print_features(out: &mut dyn Write) -> Result<()> {
    for feature in &FEATURES {
        writeln!(out, "{}: {}", feature.title, feature.description)?;
    }
    Ok(())
}

fn print_routes(out: &mut dyn Write) -> Result<()> {
    for route in &ROUTES {
        writeln!(out, "{:<12} {}", route.path, route.title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::preview_renderer::fixtures::png_of_size;
    use crate::domain::errors::{DownloadError, ProcessingFailure};
    use crate::domain::ports::mocks::{
        MockClipboard, MockDownloadStrategy, MockHistoryStorage, MockNotificationPort,
        MockProcessingPort,
    };
    use std::path::PathBuf;

    fn context(processing: MockProcessingPort, history: Arc<MockHistoryStorage>) -> CliContext {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .returning(|_, name| Ok(DownloadReceipt::Saved(PathBuf::from("/dl").join(name))));
        direct.expect_name().return_const("direct");
        let mut fallback = MockDownloadStrategy::new();
        fallback.expect_name().return_const("browser");

        CliContext {
            processing: Arc::new(processing),
            clipboard: Arc::new(MockClipboard::default()),
            history,
            direct_download: Arc::new(direct),
            fallback_download: Arc::new(fallback),
            notifier: Arc::new(MockNotificationPort::new()),
            timeout: Duration::from_secs(5),
            timestamp_format: "%Y".to_string(),
        }
    }

    async fn run_to_string(ctx: &CliContext, command: Command) -> Result<String> {
        let mut out = Vec::new();
        run(ctx, command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn staged_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("cat.png");
        std::fs::write(&path, png_of_size(1024)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_process_prints_url_and_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = Arc::new(MockHistoryStorage::new());
        let ctx = context(
            MockProcessingPort::succeeding("https://host/cut.png"),
            history.clone(),
        );

        let output = run_to_string(
            &ctx,
            Command::Process {
                file: staged_file(&dir),
                download: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(output, "https://host/cut.png\nSaved /dl/snapcut-cat.png\n");
        assert_eq!(history.persisted().len(), 1);
        assert_eq!(history.persisted()[0].original_name(), "cat.png");
    }

    #[tokio::test]
    async fn test_process_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let history = Arc::new(MockHistoryStorage::new());
        let ctx = context(
            MockProcessingPort::failing(ProcessingFailure::MissingResultUrl),
            history.clone(),
        );

        let result = run_to_string(
            &ctx,
            Command::Process {
                file: staged_file(&dir),
                download: false,
            },
        )
        .await;

        assert!(result.is_err());
        assert!(history.persisted().is_empty());
    }

    #[tokio::test]
    async fn test_process_rejects_invalid_file_before_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        std::fs::write(&path, b"GIF89a").unwrap();
        let processing = Arc::new(MockProcessingPort::succeeding("https://host/cut.png"));
        let ctx = CliContext {
            processing: processing.clone(),
            ..context(
                MockProcessingPort::succeeding("unused"),
                Arc::new(MockHistoryStorage::new()),
            )
        };

        let result = run_to_string(
            &ctx,
            Command::Process {
                file: path,
                download: false,
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(processing.calls(), 0);
    }

    #[tokio::test]
    async fn test_download_failure_is_an_error() {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .returning(|_, _| Err(DownloadError::network("offline")));
        direct.expect_name().return_const("direct");
        let mut fallback = MockDownloadStrategy::new();
        fallback
            .expect_deliver()
            .returning(|_, _| Err(DownloadError::Browser { message: "none".to_string() }));
        fallback.expect_name().return_const("browser");
        let ctx = CliContext {
            direct_download: Arc::new(direct),
            fallback_download: Arc::new(fallback),
            ..context(
                MockProcessingPort::succeeding("unused"),
                Arc::new(MockHistoryStorage::new()),
            )
        };

        let result = run_to_string(
            &ctx,
            Command::Download {
                url: "https://host/a.png".to_string(),
                name: None,
            },
        )
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_name_from_url() {
        assert_eq!(name_from_url("https://host/path/cut.webp?x=1"), "cut.png");
        assert_eq!(name_from_url("https://host/"), "image.png");
    }

    #[tokio::test]
    async fn test_history_list_remove_clear() {
        let history = Arc::new(MockHistoryStorage::with_entries(vec![
            HistoryEntry::at("b.png", "https://host/b.png", 1_700_000_000_000),
            HistoryEntry::at("a.png", "https://host/a.png", 1_600_000_000_000),
        ]));
        let ctx = context(MockProcessingPort::succeeding("unused"), history.clone());
        let id = history.persisted()[1].id().to_string();

        let table = run_to_string(
            &ctx,
            Command::History {
                action: HistoryCommand::List { json: false },
            },
        )
        .await
        .unwrap();
        assert!(table.contains("2023  b.png  https://host/b.png"));

        let json = run_to_string(
            &ctx,
            Command::History {
                action: HistoryCommand::List { json: true },
            },
        )
        .await
        .unwrap();
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);

        let removed = run_to_string(
            &ctx,
            Command::History {
                action: HistoryCommand::Remove { id: id.clone() },
            },
        )
        .await
        .unwrap();
        assert!(removed.contains("a.png"));
        assert_eq!(history.persisted().len(), 1);

        let missing = run_to_string(
            &ctx,
            Command::History {
                action: HistoryCommand::Remove { id },
            },
        )
        .await;
        assert!(missing.is_err());

        let cleared = run_to_string(
            &ctx,
            Command::History {
                action: HistoryCommand::Clear,
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared, "Cleared 1 entries\n");
        assert!(history.persisted().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_commands() {
        let ctx = context(
            MockProcessingPort::succeeding("unused"),
            Arc::new(MockHistoryStorage::new()),
        );

        let plans = run_to_string(&ctx, Command::Plans).await.unwrap();
        assert!(plans.contains("Pro ₹499/month (most popular)"));

        let features = run_to_string(&ctx, Command::Features).await.unwrap();
        assert!(features.starts_with("Lightning Fast: "));

        let routes = run_to_string(&ctx, Command::Routes).await.unwrap();
        assert!(routes.contains("/upload"));
    }
}
