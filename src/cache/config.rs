//! Cache configuration.

use std::time::Duration;

const DEFAULT_CATEGORIES_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Absolute lifetime of the cached category list.
    pub categories_ttl: Duration,
    /// Drop the cached category list after a successful category write.
    pub invalidate_on_write: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            categories_ttl: DEFAULT_CATEGORIES_TTL,
            invalidate_on_write: false,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            categories_ttl: settings.categories_ttl,
            invalidate_on_write: settings.invalidate_on_write,
        }
    }
}
