//! Post handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;

use crate::infra::http::api::error::{ApiError, codes};
use crate::infra::http::api::models::{PostDetailsView, PostListView, ResultEnvelope};
use crate::infra::http::api::state::ApiState;

use super::{PageQuery, post_to_api};

pub async fn list_posts(
    State(state): State<ApiState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.resolve(&state.pagination)?;

    let posts = state.posts.list(page).await.map_err(|err| {
        post_to_api(codes::POST_LIST_INTERNAL, codes::POST_LIST_INTERNAL, err)
    })?;

    Ok(Json(ResultEnvelope::success(PostListView::from(posts))))
}

pub async fn get_post_details(
    State(state): State<ApiState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.details(id).await.map_err(|err| {
        post_to_api(
            codes::POST_DETAILS_NOT_FOUND,
            codes::POST_DETAILS_INTERNAL,
            err,
        )
    })?;

    Ok(Json(ResultEnvelope::success(PostDetailsView::from(post))))
}

pub async fn list_posts_by_category(
    State(state): State<ApiState>,
    WithRejection(Path(category), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.resolve(&state.pagination)?;

    let posts = state
        .posts
        .list_by_category(&category, page)
        .await
        .map_err(|err| {
            post_to_api(
                codes::POST_CATEGORY_LIST_INTERNAL,
                codes::POST_CATEGORY_LIST_INTERNAL,
                err,
            )
        })?;

    Ok(Json(ResultEnvelope::success(PostListView::from(posts))))
}
