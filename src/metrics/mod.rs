//! Prometheus exposition of the ISS position.
//!
//! [`IssMetrics`] owns the gauges the poller writes to, [`MetricsServer`] serves the registry they
//! are registered in to scrapers.

mod iss_metrics;
mod server;

pub use iss_metrics::IssMetrics;
pub use server::MetricsServer;
