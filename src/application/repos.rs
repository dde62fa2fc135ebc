//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::pagination::PageRequest;
use crate::domain::categories::CategoryDraft;
use crate::domain::entities::{CategoryRecord, PostDetailsRecord, PostSummaryRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    /// Whether the store refused the write itself (constraint or input rejection).
    pub fn is_write_rejection(&self) -> bool {
        matches!(
            self,
            RepoError::Duplicate { .. }
                | RepoError::InvalidInput { .. }
                | RepoError::Integrity { .. }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQueryFilter {
    pub category_slug: Option<String>,
}

impl PostQueryFilter {
    pub fn by_category(slug: impl Into<String>) -> Self {
        Self {
            category_slug: Some(slug.into()),
        }
    }
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryRecord>, RepoError>;
}

#[async_trait]
pub trait CategoriesWriteRepo: Send + Sync {
    async fn create_category(&self, draft: CategoryDraft) -> Result<CategoryRecord, RepoError>;

    async fn update_category(
        &self,
        id: i32,
        draft: CategoryDraft,
    ) -> Result<CategoryRecord, RepoError>;

    async fn delete_category(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError>;

    /// Posts matching `filter`, newest `last_update_date` first, then sliced by `page`.
    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummaryRecord>, RepoError>;

    async fn find_details(&self, id: i32) -> Result<Option<PostDetailsRecord>, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
