use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::{
    application::{
        pagination::PageRequest,
        repos::{PostQueryFilter, PostsRepo, RepoError},
    },
    domain::entities::{
        AuthorRecord, CategoryRecord, PostDetailsRecord, PostRecord, PostSummaryRecord,
        RoleRecord,
    },
};

use super::{PostgresRepositories, map_sqlx_error};

const POST_SUMMARY_FROM: &str = " FROM posts p \
    INNER JOIN categories c ON c.id = p.category_id \
    INNER JOIN authors a ON a.id = p.author_id";

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    id: i32,
    title: String,
    slug: String,
    last_update_date: OffsetDateTime,
    category_name: String,
    author_name: String,
    author_email: String,
}

impl From<PostSummaryRow> for PostSummaryRecord {
    fn from(row: PostSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            last_update_date: row.last_update_date,
            category_name: row.category_name,
            author_name: row.author_name,
            author_email: row.author_email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostWithCategoryRow {
    id: i32,
    title: String,
    slug: String,
    summary: String,
    body: String,
    create_date: OffsetDateTime,
    last_update_date: OffsetDateTime,
    category_id: i32,
    author_id: i32,
    category_name: String,
    category_slug: String,
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i32,
    name: String,
    email: String,
    slug: String,
    bio: Option<String>,
    image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i32,
    name: String,
    slug: String,
}

impl PostgresRepositories {
    fn bind_i64(value: u64, what: &str) -> Result<i64, RepoError> {
        i64::try_from(value).map_err(|_| RepoError::InvalidInput {
            message: format!("{what} exceeds supported range"),
        })
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        qb.push(POST_SUMMARY_FROM);
        Self::apply_post_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummaryRecord>, RepoError> {
        let limit = Self::bind_i64(page.limit(), "page size")?;
        let offset = Self::bind_i64(page.offset(), "page offset")?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT p.id, p.title, p.slug, p.last_update_date, \
                    c.name AS category_name, a.name AS author_name, a.email AS author_email",
        );
        qb.push(POST_SUMMARY_FROM);
        Self::apply_post_filter(&mut qb, filter);
        qb.push(" ORDER BY p.last_update_date DESC, p.id DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build_query_as::<PostSummaryRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostSummaryRecord::from).collect())
    }

    async fn find_details(&self, id: i32) -> Result<Option<PostDetailsRecord>, RepoError> {
        let Some(post) = sqlx::query_as::<_, PostWithCategoryRow>(
            r#"
            SELECT p.id, p.title, p.slug, p.summary, p.body, p.create_date,
                   p.last_update_date, p.category_id, p.author_id,
                   c.name AS category_name, c.slug AS category_slug
            FROM posts p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        else {
            return Ok(None);
        };

        let author = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, email, slug, bio, image
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(post.author_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let roles = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name, r.slug
            FROM roles r
            INNER JOIN author_roles ar ON ar.role_id = r.id
            WHERE ar.author_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(author.id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let category = CategoryRecord {
            id: post.category_id,
            name: post.category_name,
            slug: post.category_slug,
        };

        let author = AuthorRecord {
            id: author.id,
            name: author.name,
            email: author.email,
            slug: author.slug,
            bio: author.bio,
            image: author.image,
            roles: roles
                .into_iter()
                .map(|role| RoleRecord {
                    id: role.id,
                    name: role.name,
                    slug: role.slug,
                })
                .collect(),
        };

        let post = PostRecord {
            id: post.id,
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            body: post.body,
            create_date: post.create_date,
            last_update_date: post.last_update_date,
            category_id: post.category_id,
            author_id: post.author_id,
        };

        Ok(Some(PostDetailsRecord {
            post,
            category,
            author,
        }))
    }
}
