use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::application::pagination::OffsetPage;
use crate::domain::entities::{
    AuthorRecord, CategoryRecord, PostDetailsRecord, PostSummaryRecord, RoleRecord,
};

/// Uniform response wrapper: either `data` or a non-empty `errors`, never both.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> ResultEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self { data: None, errors }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEditorRequest {
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Slug")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<&CategoryRecord> for CategoryView {
    fn from(record: &CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            slug: record.slug.clone(),
        }
    }
}

impl From<CategoryRecord> for CategoryView {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: record.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryView {
    pub id: i32,
    pub title: String,
    pub slug: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update_date: OffsetDateTime,
    /// Category name.
    pub category: String,
    /// `Name (email)` of the author.
    pub author: String,
}

impl From<PostSummaryRecord> for PostSummaryView {
    fn from(record: PostSummaryRecord) -> Self {
        let author = record.author_display();
        Self {
            id: record.id,
            title: record.title,
            slug: record.slug,
            last_update_date: record.last_update_date,
            category: record.category_name,
            author,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListView {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub posts: Vec<PostSummaryView>,
}

impl From<OffsetPage<PostSummaryRecord>> for PostListView {
    fn from(page: OffsetPage<PostSummaryRecord>) -> Self {
        let page = page.map(PostSummaryView::from);
        Self {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            posts: page.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<RoleRecord> for RoleView {
    fn from(record: RoleRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: record.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub roles: Vec<RoleView>,
}

impl From<AuthorRecord> for AuthorView {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            slug: record.slug,
            bio: record.bio,
            image: record.image,
            roles: record.roles.into_iter().map(RoleView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailsView {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub create_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update_date: OffsetDateTime,
    pub category: CategoryView,
    pub author: AuthorView,
}

impl From<PostDetailsRecord> for PostDetailsView {
    fn from(record: PostDetailsRecord) -> Self {
        let PostDetailsRecord {
            post,
            category,
            author,
        } = record;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            body: post.body,
            create_date: post.create_date,
            last_update_date: post.last_update_date,
            category: category.into(),
            author: author.into(),
        }
    }
}
