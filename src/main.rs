use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

mod api;
mod config;
mod error;
mod extractor;
mod fetch;
mod logging;
mod models;
mod payload;
mod playlist;
mod provider;
mod scrape;
mod server;
mod subtitles;
mod utils;
mod wixmp;

use config::Config;
use fetch::HttpFetcher;
use logging::{init_logging, LoggingConfig};
use server::{build_router, AppState};

#[derive(Parser)]
#[command(
    name = "anirelay",
    version,
    about = "CORS relay for the AllAnime API and provider link extraction"
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    logging: LoggingConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.logging)?;

    let config = cli.config;
    info!(
        api_base = %config.api_base,
        provider_base = %config.provider_base,
        referer = %config.referer,
        "starting anirelay"
    );

    let fetcher = HttpFetcher::new(config.user_agent.clone()).context("Failed to build HTTP client")?;
    let bind = config.bind;
    let app = build_router(AppState::new(config, fetcher));

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        on_signal("Ctrl-C", tokio::signal::ctrl_c().await).await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => on_signal("SIGTERM", Err(e)).await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}

// A listener that failed to register never resolves, so it cannot trigger shutdown.
async fn on_signal(name: &str, registered: std::io::Result<()>) {
    if let Err(e) = registered {
        error!("Failed to listen for {}: {}", name, e);
        std::future::pending::<()>().await;
    }
}
