use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use crate::application::pagination::{OffsetPage, PageRequest};
use crate::application::repos::{PostQueryFilter, PostsRepo, RepoError};
use crate::domain::categories::normalize_slug;
use crate::domain::entities::{PostDetailsRecord, PostSummaryRecord};
use crate::domain::error::DomainError;

const POST_ENTITY: &str = "post";

#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Which posts `total` counts on the per-category listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryTotalScope {
    /// Every post in the store, regardless of the category filter.
    #[default]
    AllPosts,
    /// Only posts in the requested category.
    CategoryPosts,
}

impl From<bool> for CategoryTotalScope {
    fn from(filtered: bool) -> Self {
        if filtered {
            Self::CategoryPosts
        } else {
            Self::AllPosts
        }
    }
}

#[derive(Clone)]
pub struct PostService {
    reader: Arc<dyn PostsRepo>,
    category_total: CategoryTotalScope,
}

impl PostService {
    pub fn new(reader: Arc<dyn PostsRepo>, category_total: CategoryTotalScope) -> Self {
        Self {
            reader,
            category_total,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> Result<OffsetPage<PostSummaryRecord>, PostError> {
        let filter = PostQueryFilter::default();
        let (total, items) = tokio::try_join!(
            self.reader.count_posts(&filter),
            self.reader.list_posts(&filter, page),
        )?;

        Ok(OffsetPage::new(total, page, items))
    }

    /// The slug is matched case-insensitively, since stored slugs are lowercase.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category_slug: &str,
        page: PageRequest,
    ) -> Result<OffsetPage<PostSummaryRecord>, PostError> {
        let filter = PostQueryFilter::by_category(normalize_slug(category_slug));
        let count_filter = match self.category_total {
            CategoryTotalScope::AllPosts => PostQueryFilter::default(),
            CategoryTotalScope::CategoryPosts => filter.clone(),
        };

        let (total, items) = tokio::try_join!(
            self.reader.count_posts(&count_filter),
            self.reader.list_posts(&filter, page),
        )?;

        Ok(OffsetPage::new(total, page, items))
    }

    pub async fn details(&self, id: i32) -> Result<PostDetailsRecord, PostError> {
        self.reader
            .find_details(id)
            .await?
            .ok_or_else(|| DomainError::not_found(POST_ENTITY).into())
    }
}
