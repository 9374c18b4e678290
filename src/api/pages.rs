// src/api/pages.rs
use super::client::NotionClient;
use super::requests::{CreatePageRequest, UpdatePageRequest};
use crate::error::ClientError;
use crate::model::Page;
use crate::types::PageId;

/// Page operations.
#[derive(Debug, Clone, Copy)]
pub struct Pages<'a> {
    client: &'a NotionClient,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }

    /// Retrieve a page and its property values.
    pub async fn get(&self, id: &PageId) -> Result<Page, ClientError> {
        let value = self
            .client
            .get(&format!("pages/{}", id.to_dashed()), &[])
            .await?;
        Ok(self.client.decoder().page(&value)?)
    }

    /// Create a page under a database or another page.
    pub async fn create(&self, request: &CreatePageRequest) -> Result<Page, ClientError> {
        let value = self.client.post("pages", request).await?;
        Ok(self.client.decoder().page(&value)?)
    }

    /// Change only the properties named in `request`.
    ///
    /// The returned page holds every property the server reports, not just
    /// the updated ones.
    pub async fn update_properties(
        &self,
        id: &PageId,
        request: &UpdatePageRequest,
    ) -> Result<Page, ClientError> {
        let value = self
            .client
            .patch(&format!("pages/{}", id.to_dashed()), request)
            .await?;
        Ok(self.client.decoder().page(&value)?)
    }
}
