use std::sync::Arc;

use crate::application::categories::CategoryService;
use crate::application::pagination::PaginationPolicy;
use crate::application::posts::PostService;
use crate::application::repos::HealthRepo;

#[derive(Clone)]
pub struct ApiState {
    pub categories: Arc<CategoryService>,
    pub posts: Arc<PostService>,
    pub health: Arc<dyn HealthRepo>,
    pub pagination: PaginationPolicy,
}
