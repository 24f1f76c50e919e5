use std::time::Instant;

use reqwest::{Client, Method, StatusCode};
use tracing::{info, warn};

use crate::config::NewsConfig;

pub mod headlines;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("country code must not be empty")]
    InvalidCountry,
    #[error("news api status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("news api returned an empty body (status {status})")]
    EmptyBody { status: u16 },
    #[error("{0}")]
    Network(String),
    #[error("news parse failed at {path}: {message}")]
    Decode { path: String, message: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

impl FetchError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } | FetchError::EmptyBody { status } => Some(*status),
            _ => None,
        }
    }

    /// Failures raised by the transport or decoder rather than a controlled
    /// HTTP outcome.
    pub fn is_fault(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Decode { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request url carries the api key.
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError::Network(message)
    }
}

/// Thin client over the newsapi.org REST API.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    /// Build a client with the configured read timeout.
    pub fn new(config: &NewsConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .read_timeout(config.read_timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, config: &NewsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Send a GET and log it at basic verbosity: method, url, status, elapsed.
    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), FetchError> {
        let url = self.url(path);
        let logged_url = redacted_url(&url, query);
        let started = Instant::now();

        info!("--> {} {}", Method::GET, logged_url);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let err = FetchError::from(e);
                warn!("<-- HTTP FAILED {}: {}", logged_url, err);
                err
            })?;

        let status = resp.status();
        info!(
            "<-- {} {} ({}ms)",
            status.as_u16(),
            logged_url,
            started.elapsed().as_millis()
        );

        let body = resp.text().await.map_err(|e| {
            let err = FetchError::from(e);
            warn!("Failed to read news api body: {}", err);
            err
        })?;

        Ok((status, body))
    }
}

/// Render the request url for logs with the api key masked.
fn redacted_url(url: &str, query: &[(&str, &str)]) -> String {
    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case("apikey") {
                format!("{k}=***")
            } else {
                format!("{k}={v}")
            }
        })
        .collect();

    if pairs.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, pairs.join("&"))
    }
}
