use async_trait::async_trait;

use crate::{
    application::repos::{CategoriesRepo, CategoriesWriteRepo, RepoError},
    domain::{categories::CategoryDraft, entities::CategoryRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    slug: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CategoryRecord::from))
    }
}

#[async_trait]
impl CategoriesWriteRepo for PostgresRepositories {
    async fn create_category(&self, draft: CategoryDraft) -> Result<CategoryRecord, RepoError> {
        let (name, slug) = draft.into_parts();
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_category(
        &self,
        id: i32,
        draft: CategoryDraft,
    ) -> Result<CategoryRecord, RepoError> {
        let (name, slug) = draft.into_parts();
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3
            WHERE id = $1
            RETURNING id, name, slug
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        Ok(row.into())
    }

    async fn delete_category(&self, id: i32) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
