//! Client for the Shlink REST API (v2) short URL endpoint.
//!
//! One call to [`ShlinkClient::shorten`] is one HTTP round trip. Nothing is
//! retried; every failure is classified into a [`ShortenError`] and handed
//! back to the caller.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const SHORT_URLS_PATH: &str = "/rest/v2/short-urls";
pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_USER_AGENT: &str = concat!("shlink-clip/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ShortenError {
    /// Endpoint or API key is empty.
    #[error("{0} is not configured")]
    MissingSetting(&'static str),

    /// Endpoint is not an absolute URL, or the API key is not a valid header value.
    #[error("{name} is invalid: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// The request could not be built, so nothing was sent.
    #[error("could not build request: {0}")]
    InvalidRequest(String),

    /// The server answered with something other than 200. The body is not read.
    #[error("server returned HTTP {status}")]
    HttpError { status: u16 },

    /// No response was received: DNS, refused connection, timeout, broken body.
    #[error("{0}")]
    NetworkError(String),

    /// 200 OK, but the body was not JSON or had no string `shortUrl`.
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

impl ShortenError {
    pub fn kind(&self) -> &'static str {
        match self {
            ShortenError::MissingSetting(_) => "missing-setting",
            ShortenError::InvalidSetting { .. } => "invalid-setting",
            ShortenError::InvalidRequest(_) => "invalid-request",
            ShortenError::HttpError { .. } => "http-error",
            ShortenError::NetworkError(_) => "network-error",
            ShortenError::MalformedResponse(_) => "malformed-response",
        }
    }
}

/// A validated request, built fresh for every shorten action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenRequest {
    long_url: String,
    endpoint: String,
    api_key: String,
}

impl ShortenRequest {
    /// `long_url` is sent verbatim. It is the whole text the user copied, not
    /// only the URL found inside it.
    pub fn new(
        long_url: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ShortenError> {
        let endpoint = endpoint.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if endpoint.is_empty() {
            return Err(ShortenError::MissingSetting("instance URL"));
        }
        if api_key.is_empty() {
            return Err(ShortenError::MissingSetting("API key"));
        }

        match Url::parse(&endpoint) {
            Ok(url) if url.host_str().is_some() => {}
            Ok(_) => {
                return Err(ShortenError::InvalidSetting {
                    name: "instance URL",
                    reason: format!("{endpoint} has no host"),
                });
            }
            Err(e) => {
                return Err(ShortenError::InvalidSetting {
                    name: "instance URL",
                    reason: format!("{endpoint}: {e}"),
                });
            }
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ShortenError::InvalidSetting {
                name: "API key",
                reason: "contains characters not allowed in a header".to_string(),
            });
        }

        Ok(Self {
            long_url: long_url.into(),
            endpoint,
            api_key,
        })
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full URL of the short URL collection on the configured instance.
    pub fn short_urls_url(&self) -> String {
        let base = self.endpoint.strip_suffix('/').unwrap_or(&self.endpoint);
        format!("{base}{SHORT_URLS_PATH}")
    }
}

/// The parts of a created short URL the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrl {
    pub short_url: String,
    pub short_code: Option<String>,
    pub long_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShlinkClient {
    http: reqwest::Client,
}

impl ShlinkClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    pub async fn shorten(&self, request: &ShortenRequest) -> Result<ShortUrl, ShortenError> {
        let url = request.short_urls_url();
        debug!(url = %url, payload_len = request.long_url().len(), "Sending shorten request");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(API_KEY_HEADER, request.api_key())
            .form(&[("longUrl", request.long_url())])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), url = %url, "Shorten request rejected");
            return Err(ShortenError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network_error)?;
        let short_url = parse_short_url(&body)?;

        info!(short_url = %short_url.short_url, "Short URL created");
        Ok(short_url)
    }
}

fn parse_short_url(body: &str) -> Result<ShortUrl, ShortenError> {
    serde_json::from_str(body).map_err(|e| ShortenError::MalformedResponse(e.to_string()))
}

fn network_error(err: reqwest::Error) -> ShortenError {
    if err.is_builder() {
        warn!(error = %err, "Shorten request could not be built");
        return ShortenError::InvalidRequest(err.to_string());
    }

    let detail = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("could not connect: {err}")
    } else {
        err.to_string()
    };
    warn!(error = %err, "Shorten request failed before a response arrived");
    ShortenError::NetworkError(detail)
}
