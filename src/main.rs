//! Recency Cache - line-oriented driver
//!
//! Reads commands from stdin and writes one JSON reply per line to stdout.
//! Logs go to stderr so they never mix with replies.

use anyhow::Context;
use tokio::io::{stdin, stdout, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::driver::run_session;
use recency_cache::{spawn_stats_reporter, Config, DriverState};

/// Main entry point for the cache driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache with the configured capacity
/// 4. Start the background stats reporter (unless disabled)
/// 5. Serve commands from stdin until EOF or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Recency Cache driver");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, stats_interval={}s",
        config.capacity, config.stats_interval
    );

    let state = DriverState::from_config(&config).context("failed to create cache")?;
    info!("Cache initialized");

    let reporter = (config.stats_interval > 0)
        .then(|| spawn_stats_reporter(state.cache.clone(), config.stats_interval));

    let session = run_session(&state, BufReader::new(stdin()), stdout());

    tokio::select! {
        result = session => {
            let summary = result.context("command session failed")?;
            info!("Input closed after {} commands", summary.commands);
        }
        _ = shutdown_signal() => {}
    }

    if let Some(reporter) = reporter {
        reporter.abort();
        warn!("Stats reporter aborted");
    }

    let stats = state.cache.stats().await;
    info!(
        "Shutdown complete: entries={}, hits={}, misses={}, evictions={}",
        stats.total_entries, stats.hits, stats.misses, stats.evictions
    );
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
