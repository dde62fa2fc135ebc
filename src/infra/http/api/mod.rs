pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    routing::{get, post},
};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/v1/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/v1/categories/", post(handlers::create_category))
        .route(
            "/v1/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route("/v1/posts", get(handlers::list_posts))
        .route("/v1/posts/{id}", get(handlers::get_post_details))
        .route(
            "/v1/posts/category/{category}",
            get(handlers::list_posts_by_category),
        )
        .with_state(state)
}
