//! Blog content API: category management and paginated post reads.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
