// src/api/search.rs
use super::client::NotionClient;
use super::requests::{validate_page_size, SearchRequest};
use crate::error::ClientError;
use crate::model::{NotionObject, PaginatedList};

/// Search over the pages and databases shared with the integration.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    client: &'a NotionClient,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }

    /// Results mix pages and databases; each is decoded by its `object` tag.
    pub async fn query(
        &self,
        request: &SearchRequest,
    ) -> Result<PaginatedList<NotionObject>, ClientError> {
        validate_page_size(request.page_size)?;
        let value = self.client.post("search", request).await?;
        Ok(self.client.decoder().object_list(&value)?)
    }
}
