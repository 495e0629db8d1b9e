//! Notifeed daemon: keeps the unified notification feed fresh, delivers
//! sound and desktop alerts, and mirrors the unread count into the title.
//!
//! Main entry point that wires all crates together and runs until Ctrl+C.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use notifeed_core::config::AppConfig;
use notifeed_core::error::AppError;
use notifeed_core::traits::NotificationPermission;
use notifeed_realtime::{FeedPoller, NotificationEngine, PanelState, SharedTitle, TitleSync};
use notifeed_service::ServiceContext;
use notifeed_worker::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Daemon error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("NOTIFEED_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main daemon run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Notifeed v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Services over store, platform, and sources ───────
    let services = ServiceContext::from_config(&config)?;

    // Permission is per process; re-request it when the user opted in.
    if services.desktop.prefs().enabled
        && services.desktop.permission() != NotificationPermission::Granted
    {
        let permission = services.desktop.request_permission().await;
        tracing::info!(?permission, "Desktop notification permission");
    }

    // ── Step 2: Engine and title sync ────────────────────────────
    let engine = NotificationEngine::new(services);
    let title = SharedTitle::new(config.feed.title.clone());
    let title_sync = TitleSync::new(config.feed.title.clone(), Arc::new(title));
    let title_task = tokio::spawn(title_sync.run(engine.store().subscribe()));

    // ── Step 3: Pollers ──────────────────────────────────────────
    let panel = PanelState::new(config.feed.panel_open_on_start);
    let poller = FeedPoller::start(Arc::clone(&engine), &panel, &config.feed);

    // ── Step 4: Scheduled tasks ──────────────────────────────────
    let mut scheduler = CronScheduler::new().await?;
    scheduler
        .register_default_tasks(&config.retention, Arc::clone(&engine))
        .await?;
    scheduler.start().await?;

    // ── Step 5: Log feed events until shutdown ───────────────────
    let mut events = engine.store().events();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(?event, "Feed event");
        }
    });

    tracing::info!("Notifeed daemon running (Ctrl+C to stop)");
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping...");

    // ── Step 6: Graceful shutdown ────────────────────────────────
    poller.shutdown().await;
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Scheduler shutdown failed: {e}");
    }
    event_log.abort();
    title_task.abort();

    tracing::info!("Notifeed daemon stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
