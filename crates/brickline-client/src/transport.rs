//! Request/response transport used by the form controller.
//!
//! The controller never talks to the network directly; it hands a
//! [`ApiRequest`] to a [`Transport`] and reads back a [`TransportResponse`].
//! [`HttpTransport`] is the real implementation. Tests and embedders can
//! supply their own.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;

/// Default API base URL when neither config nor `BRICKLINE_URL` sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// A JSON `POST` to an API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute path, e.g. `/api/register`.
    pub path: String,
    /// Serialized JSON body.
    pub body: Vec<u8>,
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` string from a JSON body, if present.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
    }
}

/// Sends one request and returns the response, whatever its status.
///
/// A non-2xx status is a successful exchange; only failures to complete the
/// exchange (connection refused, timeout) are errors.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if no response was received.
    async fn post_json(&self, request: ApiRequest) -> Result<TransportResponse, ClientError>;
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// API base URL. Empty means `BRICKLINE_URL`, then [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

/// [`Transport`] over HTTP, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is not `http(s)://`,
    /// or [`ClientError::Network`] if the HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(cfg: ClientConfig) -> Result<Self, ClientError> {
        let base_url = first_non_empty(&[
            &cfg.base_url,
            &std::env::var("BRICKLINE_URL").unwrap_or_default(),
            DEFAULT_BASE_URL,
        ])
        .trim_end_matches('/')
        .to_owned();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base url must start with http:// or https://, got {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("brickline-client/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Network)?;

        Ok(Self { base_url, client })
    }

    /// The resolved base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: ApiRequest) -> Result<TransportResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();

        tracing::debug!(url = %url, status, "registration request completed");
        Ok(TransportResponse { status, body })
    }
}

fn first_non_empty(vals: &[&str]) -> String {
    vals.iter()
        .find(|v| !v.is_empty())
        .map(|v| (*v).to_owned())
        .unwrap_or_default()
}
