use super::kinds::ParentType;
use crate::types::{DatabaseId, PageId};

/// Where a page or database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Database { database_id: DatabaseId },
    Page { page_id: PageId },
    Workspace,
}

impl Parent {
    pub fn parent_type(&self) -> ParentType {
        match self {
            Parent::Database { .. } => ParentType::Database,
            Parent::Page { .. } => ParentType::Page,
            Parent::Workspace => ParentType::Workspace,
        }
    }
}

impl From<DatabaseId> for Parent {
    fn from(database_id: DatabaseId) -> Self {
        Parent::Database { database_id }
    }
}

impl From<PageId> for Parent {
    fn from(page_id: PageId) -> Self {
        Parent::Page { page_id }
    }
}
