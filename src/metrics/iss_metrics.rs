use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicU64;

type CoordinateGauge = Gauge<f64, AtomicU64>;

/// The latitude and longitude gauges of the ISS.
///
/// Clones share the underlying gauges, so a clone held by the poller updates what the registry
/// exposes.
#[derive(Clone, Debug, Default)]
pub struct IssMetrics {
    latitude: CoordinateGauge,
    longitude: CoordinateGauge,
}

impl IssMetrics {
    pub fn new(registry: &mut Registry) -> Self {
        let metrics = IssMetrics::default();

        registry.register("iss_latitude", "Current latitude of the ISS", metrics.latitude.clone());
        registry.register("iss_longitude", "Current longitude of the ISS", metrics.longitude.clone());

        metrics
    }

    pub fn update(&self, latitude: f64, longitude: f64) {
        self.latitude.set(latitude);
        self.longitude.set(longitude);
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.get()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.get()
    }
}
