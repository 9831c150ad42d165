//! snapcut binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use snapcut::infrastructure::{
    AppConfig, ArboardClipboard, BrowserDownloadStrategy, CliArgs, DesktopNotificationService,
    DirectSaveStrategy, JsonHistoryStorage, StorageManager, WebhookProcessingClient,
};
use snapcut::presentation::cli::{self, CliContext, StderrNotifier};
use snapcut::presentation::theme::Theme;
use snapcut::presentation::ui::{AppPorts, AppSettings, ScreenOptions};
use snapcut::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, StorageManager)> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, storage))
}

fn ports(config: &AppConfig, storage: &StorageManager) -> Result<AppPorts> {
    Ok(AppPorts {
        processing: Arc::new(WebhookProcessingClient::new(
            config.endpoint.clone(),
            config.timeout(),
        )?),
        clipboard: Arc::new(ArboardClipboard::new()),
        history: Arc::new(JsonHistoryStorage::new(storage.history_path())),
        direct_download: Arc::new(DirectSaveStrategy::new(
            config.effective_download_dir(),
            config.timeout(),
        )?),
        fallback_download: Arc::new(BrowserDownloadStrategy::new()),
        desktop: Arc::new(DesktopNotificationService::new(
            config.enable_desktop_notifications,
        )),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let mut args = CliArgs::parse();
    let (config, storage) = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = snapcut::VERSION,
        endpoint = %config.endpoint,
        "Starting SnapCut"
    );

    let ports = ports(&config, &storage)?;

    if let Some(command) = args.command.take() {
        let ctx = CliContext {
            processing: ports.processing,
            clipboard: ports.clipboard,
            history: ports.history,
            direct_download: ports.direct_download,
            fallback_download: ports.fallback_download,
            notifier: Arc::new(StderrNotifier),
            timeout: config.timeout(),
            timestamp_format: config.ui.timestamp_format.clone(),
        };
        return cli::run(&ctx, command, &mut std::io::stdout()).await;
    }

    let settings = AppSettings {
        processing_timeout: config.timeout(),
        notification_duration: config.notification_duration(),
        screen: ScreenOptions {
            start_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            images_only: config.ui.images_only,
            timestamp_format: config.ui.timestamp_format.clone(),
            theme: Theme::new(&config.theme.accent_color),
        },
    };
    let app = App::new(ports, settings);

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
