use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::application::repos::{CategoriesRepo, CategoriesWriteRepo, RepoError};
use crate::cache::CategoryListCache;
use crate::domain::categories::CategoryDraft;
use crate::domain::entities::CategoryRecord;
use crate::domain::error::DomainError;

const CATEGORY_ENTITY: &str = "category";

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The store refused the write (unique or referential constraint).
    #[error("category write rejected: {0}")]
    Write(#[source] RepoError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl CategoryError {
    fn from_write(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::not_found(CATEGORY_ENTITY).into(),
            err if err.is_write_rejection() => Self::Write(err),
            err => Self::Repo(err),
        }
    }
}

/// Raw editor input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Clone)]
pub struct CategoryService {
    reader: Arc<dyn CategoriesRepo>,
    writer: Arc<dyn CategoriesWriteRepo>,
    cache: CategoryListCache,
}

impl CategoryService {
    pub fn new(
        reader: Arc<dyn CategoriesRepo>,
        writer: Arc<dyn CategoriesWriteRepo>,
        cache: CategoryListCache,
    ) -> Self {
        Self {
            reader,
            writer,
            cache,
        }
    }

    /// All categories ordered by id, served from the list cache when fresh.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<Vec<CategoryRecord>>, CategoryError> {
        if let Some(categories) = self.cache.get() {
            debug!(count = categories.len(), "category list served from cache");
            return Ok(categories);
        }

        let categories = Arc::new(self.reader.list_all().await?);
        self.cache.put(Arc::clone(&categories));
        debug!(count = categories.len(), "category list cached");
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<CategoryRecord, CategoryError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(CATEGORY_ENTITY).into())
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CategoryInput) -> Result<CategoryRecord, CategoryError> {
        let draft = CategoryDraft::new(input.name, input.slug)?;

        let record = self
            .writer
            .create_category(draft)
            .await
            .map_err(CategoryError::from_write)?;

        self.after_write();
        Ok(record)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<CategoryRecord, CategoryError> {
        let draft = CategoryDraft::new(input.name, input.slug)?;
        self.get_by_id(id).await?;

        let record = self
            .writer
            .update_category(id, draft)
            .await
            .map_err(CategoryError::from_write)?;

        self.after_write();
        Ok(record)
    }

    /// Remove a category and hand back the record as it was before deletion.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<CategoryRecord, CategoryError> {
        let existing = self.get_by_id(id).await?;

        self.writer
            .delete_category(id)
            .await
            .map_err(CategoryError::from_write)?;

        self.after_write();
        Ok(existing)
    }

    fn after_write(&self) {
        if self.cache.invalidates_on_write() {
            self.cache.invalidate();
        }
    }
}
