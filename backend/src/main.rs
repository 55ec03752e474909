use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use replypilot::config::{Config, LoggingConfig};
use replypilot::{AppState, ReplyService, build_router};

#[derive(Debug, Parser)]
#[command(name = "replypilot", version, about = "Marketplace review reply generator")]
struct Args {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        Config::load(args.config.as_deref())
    })?;
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!("Starting ReplyPilot backend v{}", env!("CARGO_PKG_VERSION"));
    for warning in config.startup_warnings() {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Completion model: {}", config.llm.model);

    let reply_service = ReplyService::from_config(&config.llm)?;
    let state = Arc::new(AppState::new(reply_service));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Stdout-only subscriber used while the logging config itself is loaded.
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).finish()
}

/// Stdout logging plus an optional daily-rolling file.
///
/// The returned guard must live until shutdown so buffered file logs flush.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let stdout_layer = fmt::layer().with_target(true);

    match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path.file_name().unwrap_or(OsStr::new("replypilot.log"));

            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        },
        None => {
            tracing_subscriber::registry().with(filter).with(stdout_layer).init();
            Ok(None)
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
