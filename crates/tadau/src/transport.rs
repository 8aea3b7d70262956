//! HTTP transport for the collect endpoint.

use crate::config::Config;
use crate::types::CollectPayload;
use crate::Error;
use reqwest::{StatusCode, Url};
use tracing::debug;

/// HTTP transport for delivering payloads to the collect endpoint.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let endpoint = Url::parse_with_params(
            config.endpoint(),
            &[
                ("api_secret", config.api_secret()),
                ("measurement_id", config.measurement_id()),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid collect endpoint: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Deliver one payload.
    ///
    /// Success is exactly HTTP 204; every other status is a delivery
    /// failure, including other 2xx codes.
    pub async fn send(&self, payload: &CollectPayload) -> Result<(), Error> {
        debug!(endpoint = %self.endpoint, "sending event");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            status => Err(Error::Delivery(status)),
        }
    }
}
