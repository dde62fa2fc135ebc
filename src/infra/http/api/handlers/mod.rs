//! API handlers organized by resource type.
//!
//! Service errors are translated here; each operation passes the codes it
//! reports for not-found, rejected-write and internal failures.

mod categories;
mod posts;

pub use categories::*;
pub use posts::*;

use serde::Deserialize;

use crate::application::categories::CategoryError;
use crate::application::pagination::{PageRequest, PaginationPolicy};
use crate::application::posts::PostError;
use crate::domain::error::DomainError;

use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub(crate) fn resolve(&self, policy: &PaginationPolicy) -> Result<PageRequest, ApiError> {
        policy
            .resolve(self.page, self.page_size)
            .map_err(|err| ApiError::bad_request().with_detail(err))
    }
}

/// Codes one category operation reports for each failure kind.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CategoryCodes {
    pub not_found: &'static str,
    pub write: &'static str,
    pub internal: &'static str,
}

pub(crate) fn category_to_api(codes: CategoryCodes, err: CategoryError) -> ApiError {
    match err {
        CategoryError::Domain(DomainError::Validation { fields }) => ApiError::validation(&fields),
        CategoryError::Domain(DomainError::NotFound { .. }) => ApiError::not_found(codes.not_found),
        CategoryError::Write(repo) => ApiError::write_failed(codes.write).with_detail(repo),
        CategoryError::Repo(repo) => ApiError::internal(codes.internal).with_detail(repo),
    }
}

pub(crate) fn post_to_api(not_found: &'static str, internal: &'static str, err: PostError) -> ApiError {
    match err {
        PostError::Domain(DomainError::NotFound { .. }) => ApiError::not_found(not_found),
        PostError::Domain(other) => ApiError::posts_internal(internal).with_detail(other),
        PostError::Repo(repo) => ApiError::posts_internal(internal).with_detail(repo),
    }
}
