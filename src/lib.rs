// Client library for the GitHub Enterprise Server administration REST API.
// Exposes the client, the admin endpoint group, and the request/response types.

//! ```no_run
//! use github_admin::{Client, Organization};
//!
//! # async fn run() -> github_admin::Result<()> {
//! let client = Client::builder()
//!     .enterprise_url("https://ghe.example.com")
//!     .token("ghp_example")
//!     .build()?;
//!
//! let org = Organization {
//!     login: Some("acme".to_string()),
//!     ..Default::default()
//! };
//! let (created, _response) = client.admin().create_org(&org, "alice").await?;
//! assert_eq!(created.login.as_deref(), Some("acme"));
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod client;
pub mod error;
pub mod response;
pub mod types;

pub use admin::AdminHandler;
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorDetail, ErrorResponse, Result};
pub use response::{Pagination, Rate, Response};
pub use types::*;
