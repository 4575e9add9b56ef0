// Enterprise administration endpoints.
// Groups the site-admin REST operations behind `Client::admin()`.

mod keys;
mod ldap;
mod orgs;
mod stats;
mod users;

use crate::client::Client;
use crate::error::{Error, Result};

/// Handle for the enterprise administration API.
///
/// Borrowed from a [`Client`]; holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct AdminHandler<'c> {
    client: &'c Client,
}

impl Client {
    /// Enterprise administration endpoints.
    pub fn admin(&self) -> AdminHandler<'_> {
        AdminHandler { client: self }
    }
}

/// Reject an empty required parameter before anything is sent.
fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(value)
}

/// Like `require`, and also reject values that would change the resolved path.
fn path_segment<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let value = require(value, field)?;
    if value == "." || value == ".." || value.contains(['/', '?', '#']) {
        return Err(Error::InvalidPathSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}
