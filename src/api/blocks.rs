// src/api/blocks.rs
use super::client::NotionClient;
use super::requests::{AppendChildren, PageRequest};
use crate::error::ClientError;
use crate::model::{Block, PaginatedList};
use crate::types::BlockId;

/// Block children operations. Page ids are valid block ids here.
#[derive(Debug, Clone, Copy)]
pub struct Blocks<'a> {
    client: &'a NotionClient,
}

impl<'a> Blocks<'a> {
    pub(crate) fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }

    /// First page of a block's direct children.
    ///
    /// Nested children are not fetched; check `has_children` and list again.
    pub async fn list_children(&self, id: &BlockId) -> Result<PaginatedList<Block>, ClientError> {
        self.list_children_from(id, &PageRequest::default()).await
    }

    /// A page of a block's direct children starting at a cursor.
    pub async fn list_children_from(
        &self,
        id: &BlockId,
        page: &PageRequest,
    ) -> Result<PaginatedList<Block>, ClientError> {
        let query = page.query()?;
        let value = self
            .client
            .get(&format!("blocks/{}/children", id.to_dashed()), &query)
            .await?;
        Ok(self.client.decoder().block_list(&value)?)
    }

    /// Append blocks after the existing children of `id`.
    ///
    /// Returns the parent block as the server reports it after the append.
    pub async fn append_children(
        &self,
        id: &BlockId,
        children: &[Block],
    ) -> Result<Block, ClientError> {
        let value = self
            .client
            .patch(
                &format!("blocks/{}/children", id.to_dashed()),
                &AppendChildren { children },
            )
            .await?;
        Ok(self.client.decoder().block(&value)?)
    }
}
