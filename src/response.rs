// Response metadata returned alongside every decoded result.
// Parses rate limit headers and Link-header pagination.

use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::{StatusCode, Url, header::HeaderMap};

const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RATE_USED: &str = "x-ratelimit-used";
const HEADER_RATE_RESET: &str = "x-ratelimit-reset";
const HEADER_RATE_RESOURCE: &str = "x-ratelimit-resource";

/// HTTP response metadata for a completed API call.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Rate limit reported by this response, if the headers were present.
    pub rate: Option<Rate>,
    pub pagination: Pagination,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap) -> Self {
        let rate = Rate::from_headers(&headers);
        let pagination = headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(Pagination::parse)
            .unwrap_or_default();

        Self {
            status,
            headers,
            rate,
            pagination,
        }
    }
}

/// Primary rate limit information from response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rate {
    pub limit: u64,
    pub remaining: u64,
    pub used: u64,
    pub reset: DateTime<Utc>,
    pub resource: Option<String>,
}

impl Rate {
    /// Read the rate limit headers. Returns None unless limit, remaining and reset are all present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, HEADER_RATE_LIMIT)?;
        let remaining = header_u64(headers, HEADER_RATE_REMAINING)?;
        let reset = header_u64(headers, HEADER_RATE_RESET)?;
        let reset = DateTime::from_timestamp(i64::try_from(reset).ok()?, 0)?;

        Some(Self {
            limit,
            remaining,
            used: header_u64(headers, HEADER_RATE_USED).unwrap_or(limit.saturating_sub(remaining)),
            reset,
            resource: headers
                .get(HEADER_RATE_RESOURCE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        })
    }

    /// Whether this limit is used up and has not reset yet.
    pub fn is_exhausted(&self, now: DateTime<Utc>) -> bool {
        self.remaining == 0 && self.reset > now
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} remaining, resets at {}",
            self.remaining,
            self.limit,
            self.reset.format("%H:%M:%S")
        )
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Page numbers and cursors advertised by the `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    /// Cursor for the next page on cursor-paginated endpoints.
    pub after: Option<String>,
    /// Cursor for the previous page on cursor-paginated endpoints.
    pub before: Option<String>,
}

impl Pagination {
    /// Parse a header such as `<https://api.github.com/admin/keys?page=2>; rel="next"`.
    pub fn parse(link: &str) -> Self {
        let mut pagination = Self::default();

        for entry in link.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts.next().map(str::trim) else {
                continue;
            };
            let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };
            let Ok(url) = Url::parse(target) else {
                continue;
            };

            let page = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok());
            let cursor = |name: &str| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
            };

            for rel in parts.filter_map(|p| p.trim().strip_prefix("rel=")) {
                match rel.trim_matches('"') {
                    "next" => {
                        pagination.next_page = page;
                        if let Some(after) = cursor("after") {
                            pagination.after = Some(after);
                        }
                    }
                    "prev" => {
                        pagination.prev_page = page;
                        if let Some(before) = cursor("before") {
                            pagination.before = Some(before);
                        }
                    }
                    "first" => pagination.first_page = page,
                    "last" => pagination.last_page = page,
                    _ => {}
                }
            }
        }

        pagination
    }
}
