// src/api/databases.rs
use super::client::NotionClient;
use super::requests::{validate_page_size, DatabaseQuery, PageRequest};
use crate::error::ClientError;
use crate::model::{Database, NotionObject, PaginatedList};
use crate::types::DatabaseId;

/// Database operations.
#[derive(Debug, Clone, Copy)]
pub struct Databases<'a> {
    client: &'a NotionClient,
}

impl<'a> Databases<'a> {
    pub(crate) fn new(client: &'a NotionClient) -> Self {
        Self { client }
    }

    /// Retrieve a database and its property schema.
    pub async fn get(&self, id: &DatabaseId) -> Result<Database, ClientError> {
        let value = self
            .client
            .get(&format!("databases/{}", id.to_dashed()), &[])
            .await?;
        Ok(self.client.decoder().database(&value)?)
    }

    /// Query the rows of a database.
    pub async fn query(
        &self,
        id: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<PaginatedList<NotionObject>, ClientError> {
        validate_page_size(query.page_size)?;
        let value = self
            .client
            .post(&format!("databases/{}/query", id.to_dashed()), query)
            .await?;
        Ok(self.client.decoder().object_list(&value)?)
    }

    /// List the databases shared with the integration.
    pub async fn list(&self, page: &PageRequest) -> Result<PaginatedList<Database>, ClientError> {
        let query = page.query()?;
        let value = self.client.get("databases", &query).await?;
        Ok(self.client.decoder().database_list(&value)?)
    }
}
