// Error types for the GitHub admin client.
// Covers local validation, transport failures, and decoded API error bodies.

use std::fmt;
use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::Rate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} must be provided")]
    MissingField(&'static str),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(Box<ErrorResponse>),

    /// Primary limit used up. `status` is None when the request was refused locally.
    #[error("API rate limit exceeded ({rate}): {message}")]
    RateLimited {
        status: Option<StatusCode>,
        rate: Rate,
        message: String,
    },

    #[error("secondary rate limit triggered: {message}")]
    SecondaryRateLimit {
        status: Option<StatusCode>,
        retry_after: Option<Duration>,
        message: String,
    },

    #[error("{field} is not a valid path segment: {value:?}")]
    InvalidPathSegment { field: &'static str, value: String },

    #[error("job scheduled on GitHub side; try again later")]
    Accepted { body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,
}

impl Error {
    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(response) => Some(response.status),
            Error::Http(err) => err.status(),
            Error::RateLimited { status, .. } | Error::SecondaryRateLimit { status, .. } => *status,
            Error::Accepted { .. } => Some(StatusCode::ACCEPTED),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the API for a non-success status.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
    pub documentation_url: Option<String>,
}

impl ErrorResponse {
    /// Decode an error body. Bodies that are not JSON keep their raw text as the message.
    pub(crate) fn decode(method: Method, url: Url, status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_else(|_| ErrorBody {
            message: Some(body.trim().to_string()),
            ..ErrorBody::default()
        });

        Self {
            method,
            url,
            status,
            message: parsed.message.unwrap_or_default(),
            errors: parsed.errors,
            documentation_url: parsed.documentation_url,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.method,
            self.url,
            self.status.as_u16(),
            self.message
        )?;
        if !self.errors.is_empty() {
            let details: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            write!(f, " [{}]", details.join(", "))?;
        }
        Ok(())
    }
}

/// Wire shape of an API error body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    pub documentation_url: Option<String>,
}

/// A single validation error reported alongside an API error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            return f.write_str(message);
        }
        write!(
            f,
            "{} error caused by {} field on {} resource",
            self.code.as_deref().unwrap_or("unknown"),
            self.field.as_deref().unwrap_or("unknown"),
            self.resource.as_deref().unwrap_or("unknown"),
        )
    }
}
