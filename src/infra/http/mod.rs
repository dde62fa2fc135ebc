pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};
pub use middleware::RequestContext;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

use self::api::error::{ApiError, codes};
use self::middleware::{log_responses, set_request_context};

/// Full application router: the versioned API, a health probe and an enveloped 404 fallback.
pub fn build_router(state: ApiState) -> Router {
    let health_state = state.clone();

    build_api_router(state)
        .route("/health", get(health).with_state(health_state))
        .fallback(route_not_found)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health(State(state): State<ApiState>) -> Response {
    db_health_response(state.health.ping().await)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found(codes::ROUTE_NOT_FOUND)
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
