//! Offset pagination shared by the post listings.

use std::num::NonZeroU32;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Deployment-wide defaults applied to incoming page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub default_page_size: NonZeroU32,
    pub max_page_size: NonZeroU32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            default_page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            max_page_size: NonZeroU32::new(DEFAULT_MAX_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl From<&crate::config::PaginationSettings> for PaginationPolicy {
    fn from(settings: &crate::config::PaginationSettings) -> Self {
        Self {
            default_page_size: settings.default_page_size,
            max_page_size: settings.max_page_size,
        }
    }
}

impl PaginationPolicy {
    /// Resolve optional query parameters into a page request.
    ///
    /// Missing values fall back to page 0 and the default size; sizes above the
    /// ceiling are clamped, a size of zero is rejected.
    pub fn resolve(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PageRequest, PaginationError> {
        let page_size = match page_size {
            Some(size) => NonZeroU32::new(size).ok_or(PaginationError::ZeroPageSize)?,
            None => self.default_page_size,
        };

        Ok(PageRequest {
            page: page.unwrap_or(0),
            page_size: page_size.min(self.max_page_size),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: NonZeroU32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: NonZeroU32) -> Self {
        Self { page, page_size }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Rows to skip: `page * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size.get())
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetPage<T> {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<T>,
}

impl<T> OffsetPage<T> {
    pub fn new(total: u64, request: PageRequest, items: Vec<T>) -> Self {
        Self {
            total,
            page: request.page(),
            page_size: request.page_size(),
            items,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> OffsetPage<U> {
        OffsetPage {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("non-zero")
    }

    #[test]
    fn defaults_apply_when_parameters_are_missing() {
        let request = PaginationPolicy::default()
            .resolve(None, None)
            .expect("valid request");

        assert_eq!(request.page(), 0);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::new(3, size(20));
        assert_eq!(request.offset(), 60);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn offset_does_not_overflow_for_large_pages() {
        let request = PageRequest::new(u32::MAX, size(100));
        assert_eq!(request.offset(), u64::from(u32::MAX) * 100);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = PaginationPolicy::default().resolve(Some(0), Some(0));
        assert_eq!(result, Err(PaginationError::ZeroPageSize));
    }

    #[test]
    fn oversized_pages_are_clamped() {
        let policy = PaginationPolicy {
            default_page_size: size(10),
            max_page_size: size(50),
        };
        let request = policy.resolve(Some(1), Some(500)).expect("valid request");
        assert_eq!(request.page_size(), 50);
        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn map_preserves_page_metadata() {
        let page = OffsetPage::new(7, PageRequest::new(1, size(2)), vec![1, 2]);
        let mapped = page.map(|value| value * 10);

        assert_eq!(mapped.total, 7);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.page_size, 2);
        assert_eq!(mapped.items, vec![10, 20]);
    }
}
