// User administration endpoints.
// Create, rename and delete users, and manage impersonation tokens.

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::response::Response;
use crate::types::{RenameOrgResponse, User, UserAuthorization};

use super::{AdminHandler, path_segment, require};

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    login: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suspended: Option<bool>,
}

#[derive(Debug, Serialize)]
struct RenameUserRequest<'a> {
    login: &'a str,
}

#[derive(Debug, Serialize)]
struct ImpersonateUserRequest<'a> {
    scopes: &'a [&'a str],
}

impl AdminHandler<'_> {
    /// Create a new user. `email` is required unless the instance uses external authentication.
    pub async fn create_user(
        &self,
        login: &str,
        email: Option<&str>,
        suspended: Option<bool>,
    ) -> Result<(User, Response)> {
        let body = CreateUserRequest {
            login: require(login, "login")?,
            email,
            suspended,
        };
        let request = self
            .client
            .new_json_request(Method::POST, "admin/users", &body)?;
        self.client.execute(request).await
    }

    /// Change a user's login.
    pub async fn rename_user(
        &self,
        username: &str,
        new_login: &str,
    ) -> Result<(RenameOrgResponse, Response)> {
        let username = path_segment(username, "username")?;
        let body = RenameUserRequest {
            login: require(new_login, "login")?,
        };
        let path = format!("admin/users/{}", username);
        let request = self
            .client
            .new_json_request(Method::PATCH, &path, &body)?;
        self.client.execute(request).await
    }

    /// Delete a user and all of their data.
    pub async fn delete_user(&self, username: &str) -> Result<Response> {
        let username = path_segment(username, "username")?;
        let path = format!("admin/users/{}", username);
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }

    /// Create an impersonation OAuth token for a user.
    pub async fn create_user_impersonation_token(
        &self,
        username: &str,
        scopes: &[&str],
    ) -> Result<(UserAuthorization, Response)> {
        let username = path_segment(username, "username")?;
        let path = format!("admin/users/{}/authorizations", username);
        let request = self.client.new_json_request(
            Method::POST,
            &path,
            &ImpersonateUserRequest { scopes },
        )?;
        self.client.execute(request).await
    }

    /// Delete a user's impersonation OAuth token.
    pub async fn delete_user_impersonation_token(&self, username: &str) -> Result<Response> {
        let username = path_segment(username, "username")?;
        let path = format!("admin/users/{}/authorizations", username);
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_body_omits_unset() {
        let body = CreateUserRequest {
            login: "octocat",
            email: None,
            suspended: Some(true),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"login":"octocat","suspended":true}"#
        );
    }

    #[test]
    fn test_impersonation_body() {
        let body = ImpersonateUserRequest {
            scopes: &["repo", "admin:org"],
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"scopes":["repo","admin:org"]}"#
        );
    }
}
