use crate::domain::Location;
use crate::iss::FetchError;
use crate::metrics::IssMetrics;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Where the poller gets the position of the ISS from.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn location(&self) -> Result<Location, FetchError>;
}

/// Fetches the position once and publishes it.
///
/// Failures are logged and leave the previously published position in place.
#[instrument(skip_all)]
pub async fn poll_once<S: LocationSource>(source: &S, metrics: &IssMetrics) -> Result<Location, FetchError> {
    match source.location().await {
        Ok(location) => {
            metrics.update(location.latitude, location.longitude);
            info!("🛰️ ISS is at {}", location);
            Ok(location)
        }
        Err(e) => {
            warn!(
                kind = ?e.kind(),
                "⚠️ {}: {}, keeping last known position ({}, {})",
                e.kind(),
                e,
                metrics.latitude(),
                metrics.longitude()
            );
            Err(e)
        }
    }
}

/// Polls `source` until `cancel` is triggered, waiting `interval` after each attempt finishes.
#[instrument(skip(source, metrics, cancel))]
pub async fn run<S: LocationSource>(source: S, metrics: IssMetrics, interval: Duration, cancel: CancellationToken) {
    info!("🛰️ Polling the ISS position every {}s", interval.as_secs());

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = poll_once(&source, &metrics) => {}
        }

        debug!("💤 Next poll in {}s", interval.as_secs());
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = sleep(interval) => {}
        }
    }

    info!("🛑 Stopped polling the ISS position");
}
