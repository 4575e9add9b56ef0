// Public SSH key administration endpoints.

use reqwest::Method;

use crate::error::Result;
use crate::response::Response;
use crate::types::{ListOptions, PublicKey};

use super::AdminHandler;

impl AdminHandler<'_> {
    /// List SSH keys on the instance. Follow `Response::pagination.next_page` for more.
    pub async fn list_public_keys(
        &self,
        options: &ListOptions,
    ) -> Result<(Vec<PublicKey>, Response)> {
        let request = self
            .client
            .request_builder(Method::GET, "admin/keys")?
            .query(options)
            .build()?;
        self.client.execute(request).await
    }

    /// Delete a public SSH key.
    pub async fn delete_public_key(&self, key_id: u64) -> Result<Response> {
        let path = format!("admin/keys/{}", key_id);
        let request = self.client.new_request(Method::DELETE, &path)?;
        self.client.execute_empty(request).await
    }
}
