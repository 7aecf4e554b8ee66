use crate::domain::Location;
use crate::iss::iss_now_response::{Coordinate, IssNowResponse};
use crate::poller::LocationSource;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::{Display, Formatter};
use std::num::ParseFloatError;
use thiserror::Error;
use tracing::{debug, instrument};

const LATITUDE: &str = "iss_position.latitude";
const LONGITUDE: &str = "iss_position.longitude";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("missing key '{0}'")]
    MissingKey(&'static str),
    #[error("'{field}' is not a number: '{value}'")]
    Conversion {
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    Conversion,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) => ErrorKind::Network,
            FetchError::InvalidJson(_) | FetchError::MissingKey(_) => ErrorKind::Parse,
            FetchError::Conversion { .. } => ErrorKind::Conversion,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Parse => write!(f, "JSON parse error"),
            ErrorKind::Conversion => write!(f, "conversion error"),
        }
    }
}

/// Retrieves the current position of the ISS from `url`.
#[instrument(skip(client))]
pub async fn fetch_location(client: &Client, url: &str) -> Result<Location, FetchError> {
    let body = client.get(url).send().await?.error_for_status()?.text().await?;

    let response = serde_json::from_str::<IssNowResponse>(&body)?;
    debug!(message = ?response.message, timestamp = ?response.timestamp, "🛰️ Received ISS position");

    to_location(response)
}

fn to_location(response: IssNowResponse) -> Result<Location, FetchError> {
    let position = response.iss_position.ok_or(FetchError::MissingKey("iss_position"))?;

    let latitude = position.latitude.ok_or(FetchError::MissingKey(LATITUDE))?;
    let latitude = parse_coordinate(LATITUDE, latitude)?;

    let longitude = position.longitude.ok_or(FetchError::MissingKey(LONGITUDE))?;
    let longitude = parse_coordinate(LONGITUDE, longitude)?;

    Ok(Location::new(latitude, longitude))
}

fn parse_coordinate(field: &'static str, Coordinate(value): Coordinate) -> Result<f64, FetchError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| FetchError::Conversion { field, value, source })
}

#[derive(Debug)]
pub struct HttpLocationSource {
    client: Client,
    url: String,
}

impl HttpLocationSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        HttpLocationSource { client, url: url.into() }
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    async fn location(&self) -> Result<Location, FetchError> {
        fetch_location(&self.client, &self.url).await
    }
}
