use std::sync::Arc;

use crate::domain::entities::CategoryRecord;

use super::config::CacheConfig;
use super::store::TtlStore;

pub const CATEGORIES_CACHE_KEY: &str = "categories";

/// Process-wide memo of the full category listing.
#[derive(Clone)]
pub struct CategoryListCache {
    store: Arc<TtlStore<&'static str, Arc<Vec<CategoryRecord>>>>,
    config: CacheConfig,
}

impl CategoryListCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: Arc::new(TtlStore::new(CATEGORIES_CACHE_KEY)),
            config,
        }
    }

    pub fn get(&self) -> Option<Arc<Vec<CategoryRecord>>> {
        self.store.get(&CATEGORIES_CACHE_KEY)
    }

    pub fn put(&self, categories: Arc<Vec<CategoryRecord>>) {
        self.store
            .insert(CATEGORIES_CACHE_KEY, categories, self.config.categories_ttl);
    }

    pub fn invalidate(&self) {
        self.store.invalidate(&CATEGORIES_CACHE_KEY);
    }

    pub fn invalidates_on_write(&self) -> bool {
        self.config.invalidate_on_write
    }
}
