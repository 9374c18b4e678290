// src/api/users.rs
use super::client::NotionClient;
use super::requests::PageRequest;
use crate::error::ClientError;
use crate::model::{PaginatedList, User};
use crate::types::UserId;

/// User operations.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a NotionClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        let value = self
            .client
            .get(&format!("users/{}", id.to_dashed()), &[])
            .await?;
        Ok(self.client.decoder().user(&value)?)
    }

    /// List the users of the workspace.
    pub async fn list(&self, page: &PageRequest) -> Result<PaginatedList<User>, ClientError> {
        let query = page.query()?;
        let value = self.client.get("users", &query).await?;
        Ok(self.client.decoder().user_list(&value)?)
    }
}
