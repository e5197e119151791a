//! Shared HTTP plumbing for the rental backend's REST API.
//!
//! Every response is wrapped in `{success, data, message, timestamp}`;
//! [`RestClient`] unwraps it and turns transport failures and non-success
//! statuses into [`ServiceError`]s.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::ServiceError;

/// Connection settings for the rental backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    pub timeout: Duration,
    /// Whether `GET /vehicle-types/wheels/{n}` is available.
    pub server_wheel_filter: bool,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            server_wheel_filter: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_server_wheel_filter(mut self, enabled: bool) -> Self {
        self.server_wheel_filter = enabled;
        self
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api")
    }
}

/// Response envelope used by every route.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Some routes report failures under `error` instead of `message`.
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    fn message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Thin wrapper over `reqwest::Client` bound to one backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    config: RestConfig,
}

impl RestClient {
    pub fn new(config: RestConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let request = self.client.get(self.url(path)).query(query);
        self.execute("GET", path, request).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let request = self.client.post(self.url(path)).json(body);
        self.execute("POST", path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        tracing::debug!(method, path, "api request");
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(method, path, status = response.status().as_u16(), "api response");
        self.unwrap_envelope(response).await
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ServiceError::network(format!("Connection failed: {}", err))
        } else {
            ServiceError::network(err.to_string())
        }
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ServiceError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::network(e.to_string()))?;
        decode_envelope(status, &body)
    }
}

/// Interprets a response body for the given status code.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, ServiceError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(ApiEnvelope::message);
        tracing::warn!(status, message = ?message, "api error response");
        return Err(ServiceError::status(status, message));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| ServiceError::decode(format!("Failed to parse response: {}", e)))?;
    if !envelope.success {
        return Err(ServiceError::status(status, envelope.message()));
    }
    envelope
        .data
        .ok_or_else(|| ServiceError::decode("Response envelope has no data"))
}
