// GitHub API HTTP client.
// Handles authentication, request construction, rate limiting, and response decoding.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use reqwest::{
    Method, Request, RequestBuilder, StatusCode, Url,
    header::{
        ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Error, ErrorResponse, Result};
use crate::response::{Rate, Response};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_API_VERSION: &str = "2022-11-28";
const DEFAULT_USER_AGENT: &str = concat!("github-admin/", env!("CARGO_PKG_VERSION"));
const MEDIA_TYPE_JSON: &str = "application/vnd.github+json";

/// GitHub API client with authentication and rate limit tracking.
///
/// Cloning is cheap; clones share the connection pool and the last seen rate limit.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    rate_limit: Arc<Mutex<Option<Rate>>>,
}

/// Configuration for a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    token: Option<String>,
    user_agent: String,
    api_version: String,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: None,
        }
    }
}

impl ClientBuilder {
    /// Base URL used as-is. Must be absolute and end with a slash.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// GitHub Enterprise Server host, e.g. `https://ghe.example.com`.
    pub fn enterprise_url(mut self, url: &str) -> Self {
        self.base_url = enterprise_api_url(url);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Value sent in the `X-GitHub-Api-Version` header.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Total deadline applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() || !base_url.path().ends_with('/') {
            return Err(Error::InvalidUrl(format!(
                "{} must be absolute and have a trailing slash",
                self.base_url
            )));
        }

        let mut headers = HeaderMap::new();

        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_JSON));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_str(&self.api_version)?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Client {
            http: builder.build()?,
            base_url,
            rate_limit: Arc::new(Mutex::new(None)),
        })
    }
}

/// Normalize an Enterprise Server URL to its REST API root.
fn enterprise_api_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    let is_api_subdomain = url
        .split_once("://")
        .is_some_and(|(_, rest)| rest.starts_with("api."));
    if !url.ends_with("/api/v3/") && !is_api_subdomain {
        url.push_str("api/v3/");
    }
    url
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client for api.github.com with the given token.
    pub fn new(token: &str) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Create a client from the GITHUB_TOKEN and optional GITHUB_API_URL environment variables.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| Error::MissingToken)?;
        let mut builder = Self::builder().token(token);
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            builder = builder.enterprise_url(&url);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the most recently observed rate limit.
    pub fn rate_limit(&self) -> Option<Rate> {
        self.rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Start a request for a path relative to the base URL.
    pub(crate) fn request_builder(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?;
        Ok(self.http.request(method, url))
    }

    /// Build a request without a body.
    pub fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        Ok(self.request_builder(method, path)?.build()?)
    }

    /// Build a request whose body is `body` encoded as JSON.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Request> {
        let body = serde_json::to_vec(body)?;
        Ok(self
            .request_builder(method, path)?
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()?)
    }

    /// Send a request and decode the JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, Response)> {
        let (response, body) = self.send(request).await?;
        let value = serde_json::from_slice(&body)?;
        Ok((value, response))
    }

    /// Send a request whose successful response carries no body.
    pub async fn execute_empty(&self, request: Request) -> Result<Response> {
        let (response, _) = self.send(request).await?;
        Ok(response)
    }

    /// Send a request, returning the metadata and raw body of a successful response.
    pub(crate) async fn send(&self, request: Request) -> Result<(Response, Vec<u8>)> {
        self.check_rate_limit_before_send()?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let http_response = self.http.execute(request).await?;
        let status = http_response.status();
        let headers = http_response.headers().clone();
        let body = http_response.bytes().await?.to_vec();

        let response = Response::new(status, headers);
        self.update_rate_limit(&response);
        debug!(
            %status,
            remaining = response.rate.as_ref().map(|r| r.remaining),
            "received response"
        );

        check_response(method, url, &response, &body)?;
        Ok((response, body))
    }

    /// Refuse to send while a previously seen limit is still exhausted.
    fn check_rate_limit_before_send(&self) -> Result<()> {
        let Some(rate) = self.rate_limit() else {
            return Ok(());
        };
        if rate.is_exhausted(Utc::now()) {
            warn!(reset = %rate.reset, "rate limit exhausted, request not sent");
            return Err(Error::RateLimited {
                status: None,
                message: "API rate limit still exceeded; request not sent".to_string(),
                rate,
            });
        }
        Ok(())
    }

    /// Remember the limit reported by the latest response.
    fn update_rate_limit(&self, response: &Response) {
        if let Some(rate) = &response.rate {
            *self
                .rate_limit
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(rate.clone());
        }
    }
}

/// Map a non-2xx response to a rate limit or decoded API error.
fn check_response(method: Method, url: Url, response: &Response, body: &[u8]) -> Result<()> {
    let status = response.status;
    if status.is_success() {
        return Ok(());
    }

    let text = String::from_utf8_lossy(body);
    let decoded = ErrorResponse::decode(method, url, status, &text);

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(rate) = response.rate.as_ref().filter(|r| r.remaining == 0) {
            warn!(reset = %rate.reset, "primary rate limit exceeded");
            return Err(Error::RateLimited {
                status: Some(status),
                rate: rate.clone(),
                message: decoded.message,
            });
        }
        let secondary = decoded
            .documentation_url
            .as_deref()
            .is_some_and(|u| u.contains("secondary-rate-limits"));
        if secondary {
            let retry_after = response
                .headers
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs);
            warn!(?retry_after, "secondary rate limit triggered");
            return Err(Error::SecondaryRateLimit {
                status: Some(status),
                retry_after,
                message: decoded.message,
            });
        }
    }

    Err(Error::Api(Box::new(decoded)))
}
