// Instance statistics endpoint.

use reqwest::{Method, StatusCode};

use crate::error::{Error, Result};
use crate::response::Response;
use crate::types::AdminStats;

use super::AdminHandler;

impl AdminHandler<'_> {
    /// Get all instance statistics.
    ///
    /// While GitHub is still computing the numbers it answers 202, surfaced as `Error::Accepted`.
    pub async fn get_admin_stats(&self) -> Result<(AdminStats, Response)> {
        let request = self.client.new_request(Method::GET, "enterprise/stats/all")?;
        let (response, body) = self.client.send(request).await?;
        if response.status == StatusCode::ACCEPTED {
            return Err(Error::Accepted {
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok((serde_json::from_slice(&body)?, response))
    }
}
