use crate::config::Config;
use crate::errors::AppError;
use crate::models::LookupResult;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for the remote number lookup API.
///
/// Each lookup is a single GET with `key` and `term` query parameters,
/// bounded by the configured timeout. Redirects are followed; nothing is
/// retried.
#[derive(Clone)]
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LookupClient {
    /// Creates a new `LookupClient` from the application configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create lookup client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Builds the request URL with URL-encoded `key` and `term` parameters.
    pub fn request_url(&self, term: &str) -> Result<url::Url, AppError> {
        url::Url::parse_with_params(
            &self.base_url,
            &[("key", self.api_key.as_str()), ("term", term)],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))
    }

    /// Looks up `term`.
    ///
    /// Transport problems become [`LookupResult::Failure`]. Any response that
    /// arrives is a [`LookupResult::Success`], whatever its status; a body that
    /// is not valid JSON is returned as `{"raw": body}`.
    pub async fn fetch(&self, term: &str) -> LookupResult {
        let url = match self.request_url(term) {
            Ok(url) => url,
            Err(e) => {
                return LookupResult::Failure {
                    message: e.to_string(),
                    status: None,
                }
            }
        };

        tracing::info!("Looking up term: {}", term);
        // Redact key from logs to prevent credential exposure
        tracing::debug!("Lookup URL: {}?key=[REDACTED]&term={}", self.base_url, term);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let status = e.status().map(|s| s.as_u16());
                let e = e.without_url();
                tracing::warn!("Lookup request failed: {}", e);
                return LookupResult::Failure {
                    message: format!("Request error: {}", e),
                    status,
                };
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                tracing::warn!("Failed to read lookup response body: {}", e);
                return LookupResult::Failure {
                    message: format!("Request error: {}", e),
                    status: Some(status),
                };
            }
        };

        tracing::info!("Lookup API responded with status {}", status);
        LookupResult::Success {
            value: decode_body(&body),
            status,
        }
    }
}

/// Decodes a response body, wrapping anything that is not JSON as `{"raw": body}`.
pub fn decode_body(body: &str) -> Value {
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Lookup response is not JSON ({}), wrapping raw body", e);
            json!({ "raw": body })
        }
    }
}
