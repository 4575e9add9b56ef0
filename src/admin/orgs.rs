// Organization administration endpoints.
// Create and rename organizations on a GitHub Enterprise Server instance.

use reqwest::Method;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::response::Response;
use crate::types::{Organization, RenameOrgResponse};

use super::{AdminHandler, path_segment, require};

/// Body for `POST admin/organizations`.
#[derive(Debug, Serialize)]
struct CreateOrgRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    login: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin: Option<&'a str>,
}

/// Body for `PATCH admin/organizations/{org}`.
#[derive(Debug, Serialize)]
struct RenameOrgRequest<'a> {
    login: &'a str,
}

impl AdminHandler<'_> {
    /// Create a new organization.
    ///
    /// Only `org.login` is sent; `admin` is the login of the user who will manage it.
    pub async fn create_org(
        &self,
        org: &Organization,
        admin: &str,
    ) -> Result<(Organization, Response)> {
        let body = CreateOrgRequest {
            login: org.login.as_deref(),
            admin: Some(require(admin, "admin")?),
        };
        let request = self
            .client
            .new_json_request(Method::POST, "admin/organizations", &body)?;
        self.client.execute(request).await
    }

    /// Rename an organization identified by its current login.
    pub async fn rename_org(
        &self,
        org: &Organization,
        new_name: &str,
    ) -> Result<(RenameOrgResponse, Response)> {
        let login = org
            .login
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or(Error::MissingField("login"))?;
        self.rename_org_by_name(login, new_name).await
    }

    /// Rename an organization using its current name.
    pub async fn rename_org_by_name(
        &self,
        org: &str,
        new_name: &str,
    ) -> Result<(RenameOrgResponse, Response)> {
        let org = path_segment(org, "org")?;
        let body = RenameOrgRequest {
            login: require(new_name, "login")?,
        };
        let path = format!("admin/organizations/{}", org);
        let request = self
            .client
            .new_json_request(Method::PATCH, &path, &body)?;
        self.client.execute(request).await
    }
}
