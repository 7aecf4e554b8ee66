use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

const OPENMETRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("unable to bind the metrics endpoint to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("metrics endpoint failed while running: {0}")]
    Serve(#[source] io::Error),
}

#[derive(Error, Debug)]
enum ScrapeError {
    #[error(transparent)]
    Encoding(#[from] std::fmt::Error),
    #[error(transparent)]
    HttpResponse(#[from] axum::http::Error),
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// HTTP endpoint exposing a registry in the text exposition format.
#[derive(Debug)]
pub struct MetricsServer {
    listener: TcpListener,
}

impl MetricsServer {
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(|source| ServerError::Bind { addr, source })?;
        Ok(MetricsServer { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves `registry` on `/metrics` and `/` until `cancel` is triggered.
    #[instrument(skip_all)]
    pub async fn serve(self, registry: Registry, cancel: CancellationToken) -> Result<(), ServerError> {
        let router = Router::new()
            .route("/metrics", get(serve_metrics))
            .route("/", get(serve_metrics))
            .with_state(Arc::new(registry));

        if let Ok(addr) = self.local_addr() {
            info!("📈 Serving metrics on http://{}/metrics", addr);
        }

        axum::serve(self.listener, router)
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await
            .map_err(ServerError::Serve)?;

        info!("📈 Metrics endpoint stopped");
        Ok(())
    }
}

async fn serve_metrics(State(registry): State<Arc<Registry>>) -> Result<Response<Body>, ScrapeError> {
    let mut buffer = String::new();
    encode(&mut buffer, &registry)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)
        .body(Body::from(buffer))?;
    Ok(response)
}
