//! HTTP client wrapper used for API requests.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::status::ApiError;

/// HTTP client for single-shot JSON API requests.
///
/// Requests are issued once; failures are returned to the caller as-is.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if let Some(err) = ApiError::from_status(response.status(), response.headers(), url) {
            return Err(err.into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        serde_json::from_str(&body).context("Failed to parse JSON response")
    }
}
