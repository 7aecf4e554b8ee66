mod client;
mod fetch;
mod iss_now_response;

pub use client::new_client;
#[cfg(test)]
pub use fetch::ErrorKind;
pub use fetch::{FetchError, HttpLocationSource};
