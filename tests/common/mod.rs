#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use time::OffsetDateTime;
use time::macros::datetime;
use tower::ServiceExt;

use blog_api::application::categories::CategoryService;
use blog_api::application::pagination::{PageRequest, PaginationPolicy};
use blog_api::application::posts::{CategoryTotalScope, PostService};
use blog_api::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, HealthRepo, PostQueryFilter, PostsRepo, RepoError,
};
use blog_api::cache::{CacheConfig, CategoryListCache};
use blog_api::domain::categories::CategoryDraft;
use blog_api::domain::entities::{
    AuthorRecord, CategoryRecord, PostDetailsRecord, PostRecord, PostSummaryRecord, RoleRecord,
};
use blog_api::infra::http::{ApiState, build_router};

/// In-memory stand-in for the Postgres repositories with the same constraint behaviour.
#[derive(Default)]
pub struct MemoryStore {
    categories: Mutex<Vec<CategoryRecord>>,
    authors: Mutex<Vec<AuthorRecord>>,
    posts: Mutex<Vec<PostRecord>>,
    next_category_id: AtomicUsize,
    category_reads: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Two categories (`tech`, `news`), one author with a role and five posts.
    pub fn seeded() -> Arc<Self> {
        let store = Self::new();
        let tech = store.insert_category("Tecnologia", "tech");
        let news = store.insert_category("Notícias", "news");
        store.insert_author(AuthorRecord {
            id: 1,
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            slug: "ana-souza".into(),
            bio: Some("Escreve sobre Rust".into()),
            image: None,
            roles: vec![RoleRecord {
                id: 1,
                name: "Autor".into(),
                slug: "author".into(),
            }],
        });

        let base = datetime!(2024-01-01 00:00 UTC);
        for (id, category) in [(1, tech), (2, news), (3, tech), (4, news), (5, tech)] {
            store.insert_post(id, category, base + time::Duration::days(id.into()));
        }
        store
    }

    pub fn insert_category(&self, name: &str, slug: &str) -> i32 {
        let id = self.next_id();
        self.categories.lock().unwrap().push(CategoryRecord {
            id,
            name: name.into(),
            slug: slug.into(),
        });
        id
    }

    pub fn insert_author(&self, author: AuthorRecord) {
        self.authors.lock().unwrap().push(author);
    }

    pub fn insert_post(&self, id: i32, category_id: i32, last_update_date: OffsetDateTime) {
        self.posts.lock().unwrap().push(PostRecord {
            id,
            title: format!("Post {id}"),
            slug: format!("post-{id}"),
            summary: format!("Resumo {id}"),
            body: format!("Corpo {id}"),
            create_date: last_update_date,
            last_update_date,
            category_id,
            author_id: 1,
        });
    }

    pub fn category_slugs(&self) -> Vec<String> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .map(|category| category.slug.clone())
            .collect()
    }

    pub fn category_reads(&self) -> usize {
        self.category_reads.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn next_id(&self) -> i32 {
        let id = self.next_category_id.fetch_add(1, Ordering::SeqCst) + 1;
        i32::try_from(id).expect("id fits in i32")
    }

    fn check_available(&self) -> Result<(), RepoError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("connection refused"));
        }
        Ok(())
    }

    fn check_unique_slug(&self, slug: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .any(|category| category.slug == slug && Some(category.id) != except);
        if taken {
            return Err(RepoError::Duplicate {
                constraint: "categories_slug_key".into(),
            });
        }
        Ok(())
    }

    fn summaries(&self, filter: &PostQueryFilter) -> Vec<PostSummaryRecord> {
        let categories = self.categories.lock().unwrap();
        let authors = self.authors.lock().unwrap();
        let mut summaries: Vec<PostSummaryRecord> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter_map(|post| {
                let category = categories.iter().find(|c| c.id == post.category_id)?;
                let author = authors.iter().find(|a| a.id == post.author_id)?;
                let matches = filter
                    .category_slug
                    .as_deref()
                    .is_none_or(|slug| slug == category.slug);
                matches.then(|| PostSummaryRecord {
                    id: post.id,
                    title: post.title.clone(),
                    slug: post.slug.clone(),
                    last_update_date: post.last_update_date,
                    category_name: category.name.clone(),
                    author_name: author.name.clone(),
                    author_email: author.email.clone(),
                })
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.last_update_date
                .cmp(&a.last_update_date)
                .then(b.id.cmp(&a.id))
        });
        summaries
    }
}

#[async_trait]
impl CategoriesRepo for MemoryStore {
    async fn list_all(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        self.check_available()?;
        self.category_reads.fetch_add(1, Ordering::SeqCst);
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by_key(|category| category.id);
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryRecord>, RepoError> {
        self.check_available()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }
}

#[async_trait]
impl CategoriesWriteRepo for MemoryStore {
    async fn create_category(&self, draft: CategoryDraft) -> Result<CategoryRecord, RepoError> {
        self.check_available()?;
        self.check_unique_slug(draft.slug(), None)?;
        let (name, slug) = draft.into_parts();
        let id = self.insert_category(&name, &slug);
        Ok(CategoryRecord { id, name, slug })
    }

    async fn update_category(
        &self,
        id: i32,
        draft: CategoryDraft,
    ) -> Result<CategoryRecord, RepoError> {
        self.check_available()?;
        self.check_unique_slug(draft.slug(), Some(id))?;
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(RepoError::NotFound)?;
        let (name, slug) = draft.into_parts();
        category.name = name;
        category.slug = slug;
        Ok(category.clone())
    }

    async fn delete_category(&self, id: i32) -> Result<(), RepoError> {
        self.check_available()?;
        let referenced = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .any(|post| post.category_id == id);
        if referenced {
            return Err(RepoError::InvalidInput {
                message: "violates foreign key constraint \"posts_category_id_fkey\"".into(),
            });
        }

        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostsRepo for MemoryStore {
    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError> {
        self.check_available()?;
        Ok(self.summaries(filter).len() as u64)
    }

    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostSummaryRecord>, RepoError> {
        self.check_available()?;
        Ok(self
            .summaries(filter)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_details(&self, id: i32) -> Result<Option<PostDetailsRecord>, RepoError> {
        self.check_available()?;
        let Some(post) = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned()
        else {
            return Ok(None);
        };

        let category = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == post.category_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;
        let author = self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|author| author.id == post.author_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;

        Ok(Some(PostDetailsRecord {
            post,
            category,
            author,
        }))
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.check_available()
    }
}

pub struct AppOptions {
    pub cache: CacheConfig,
    pub category_total: CategoryTotalScope,
    pub pagination: PaginationPolicy,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            cache: CacheConfig {
                categories_ttl: Duration::from_secs(3600),
                invalidate_on_write: false,
            },
            category_total: CategoryTotalScope::AllPosts,
            pagination: PaginationPolicy::default(),
        }
    }
}

pub fn app(store: &Arc<MemoryStore>) -> Router {
    app_with(store, AppOptions::default())
}

pub fn app_with(store: &Arc<MemoryStore>, options: AppOptions) -> Router {
    let categories = CategoryService::new(
        store.clone(),
        store.clone(),
        CategoryListCache::new(options.cache),
    );
    let posts = PostService::new(store.clone(), options.category_total);

    build_router(ApiState {
        categories: Arc::new(categories),
        posts: Arc::new(posts),
        health: store.clone(),
        pagination: options.pagination,
    })
}

pub fn page_size(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("non-zero page size")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be json")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
