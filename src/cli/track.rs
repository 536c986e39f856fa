use crate::core::settings::Settings;
use crate::orbit::Sgp4Propagator;
use crate::tle::HttpTleSource;
use crate::tracker::{Display, Tracker};
use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::watch;

pub async fn run(settings: &Settings) -> Result<()> {
    let source = HttpTleSource::new(settings.tle.url.as_str(), settings.tle.timeout());
    let satellites = super::prepare(settings, &source).await?;

    let tracker = Tracker::new(
        satellites,
        Sgp4Propagator::new(),
        settings.observer.observer(),
        settings.tracking.interval(),
    );

    println!("Loaded {} GPS satellites.", tracker.satellite_count());
    if tracker.satellite_count() == 0 {
        tracing::warn!("TLE file contains no satellites, nothing will be reported");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut display = Display::new(std::io::stdout());
    tracker
        .run(&mut display, shutdown_rx)
        .await
        .context("Failed to write to terminal")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::debug!("Shutdown signal received");
}
