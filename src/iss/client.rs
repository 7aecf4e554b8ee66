use crate::app_config::Iss;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn new_client(config: &Iss) -> Result<Client, IssClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

    let client = Client::builder().timeout(config.request_timeout()).default_headers(headers).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum IssClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
