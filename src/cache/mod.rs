//! In-process caching.
//!
//! [`TtlStore`] is a key/value map whose entries expire a fixed duration after
//! they were written (absolute, not sliding). [`CategoryListCache`] memoises the
//! full category listing on top of it. Population is not coalesced: concurrent
//! misses each read the store and the last write wins.
//!
//! ```toml
//! [cache]
//! categories_ttl_seconds = 3600
//! invalidate_on_write = false
//! ```

mod categories;
mod config;
mod lock;
mod store;

pub use categories::{CATEGORIES_CACHE_KEY, CategoryListCache};
pub use config::CacheConfig;
pub use store::TtlStore;

pub const METRIC_CACHE_HIT_TOTAL: &str = "blog_cache_hit_total";
pub const METRIC_CACHE_MISS_TOTAL: &str = "blog_cache_miss_total";
