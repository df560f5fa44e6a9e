//! Start.Info HTTP client.
//!
//! Holds the immutable connection settings and the shared request
//! dispatcher that every endpoint method goes through.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::query::Query;

use super::error::RnvError;

/// Default base URL for the Start.Info API.
pub const DEFAULT_BASE_URL: &str = "http://rnv.the-agent-factory.de:8080/easygo2/api";

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "rnv_api_token";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "RNV_API_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "RNV_BASE_URL";

/// Maximum number of body characters kept in a JSON error.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the Start.Info client.
#[derive(Debug, Clone)]
pub struct RnvConfig {
    /// API token sent with every request
    pub api_token: String,
    /// Base URL for the API (defaults to the public Start.Info endpoint)
    pub base_url: String,
    /// Request timeout in seconds; `None` keeps reqwest's default (no timeout)
    pub timeout_secs: Option<u64>,
}

impl RnvConfig {
    /// Create a new config with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }

    /// Build a config from `RNV_API_TOKEN` and, if set, `RNV_BASE_URL`.
    pub fn from_env() -> Result<Self, RnvError> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| RnvError::Config(format!("{TOKEN_ENV} is not set")))?;
        let config = Self::new(token);

        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Start.Info API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RnvClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl RnvClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with [`RnvError::Config`] if the token is empty or cannot be
    /// sent as a header value.
    pub fn new(config: RnvConfig) -> Result<Self, RnvError> {
        if config.api_token.is_empty() {
            return Err(RnvError::Config("API token not set".to_string()));
        }

        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&config.api_token)
            .map_err(|_| RnvError::Config("invalid API token format".to_string()))?;
        headers.insert(HeaderName::from_static(TOKEN_HEADER), token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            headers,
        })
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Full URL for `path` with `query` appended.
    fn request_url(&self, path: &str, query: &Query) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        url
    }

    /// Issue a GET for `path` with `query` and decode the JSON body.
    ///
    /// `path` must begin with `/`. Any status other than 200 becomes
    /// [`RnvError::Remote`] carrying the status and the query parameters.
    pub async fn send_request(&self, path: &str, query: &Query) -> Result<Value, RnvError> {
        if !path.starts_with('/') {
            return Err(RnvError::InvalidArgument {
                name: "path",
                reason: format!("expected a path beginning with '/', got {path:?}"),
            });
        }

        let url = self.request_url(path, query);

        debug!(endpoint = path, params = query.pairs().len(), "sending request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            debug!(endpoint = path, status = status.as_u16(), "request rejected");
            return Err(RnvError::Remote {
                status: status.as_u16(),
                endpoint: path.to_string(),
                params: query.to_owned_pairs(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RnvError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
        })
    }
}
