//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub roles: Vec<RoleRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    pub create_date: OffsetDateTime,
    pub last_update_date: OffsetDateTime,
    pub category_id: i32,
    pub author_id: i32,
}

/// Listing projection of a post with its category name and author identity denormalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummaryRecord {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub last_update_date: OffsetDateTime,
    pub category_name: String,
    pub author_name: String,
    pub author_email: String,
}

impl PostSummaryRecord {
    pub fn author_display(&self) -> String {
        author_display(&self.author_name, &self.author_email)
    }
}

/// A post with its category and author (including roles) eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetailsRecord {
    pub post: PostRecord,
    pub category: CategoryRecord,
    pub author: AuthorRecord,
}

/// Format an author the way listings show it: `Name (email)`.
pub fn author_display(name: &str, email: &str) -> String {
    format!("{name} ({email})")
}
