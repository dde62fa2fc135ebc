//! Category handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;

use crate::application::categories::CategoryInput;
use crate::infra::http::api::error::{ApiError, codes};
use crate::infra::http::api::models::{CategoryEditorRequest, CategoryView, ResultEnvelope};
use crate::infra::http::api::state::ApiState;

use super::{CategoryCodes, category_to_api};

type IdPath = WithRejection<Path<i32>, ApiError>;
type EditorBody = WithRejection<Json<CategoryEditorRequest>, ApiError>;

const GET_CODES: CategoryCodes = CategoryCodes {
    not_found: codes::CATEGORY_GET_NOT_FOUND,
    write: codes::CATEGORY_GET_INTERNAL,
    internal: codes::CATEGORY_GET_INTERNAL,
};

const LIST_CODES: CategoryCodes = CategoryCodes {
    not_found: codes::CATEGORY_LIST_INTERNAL,
    write: codes::CATEGORY_LIST_INTERNAL,
    internal: codes::CATEGORY_LIST_INTERNAL,
};

const CREATE_CODES: CategoryCodes = CategoryCodes {
    not_found: codes::CATEGORY_CREATE_INTERNAL,
    write: codes::CATEGORY_CREATE_WRITE,
    internal: codes::CATEGORY_CREATE_INTERNAL,
};

const UPDATE_CODES: CategoryCodes = CategoryCodes {
    not_found: codes::CATEGORY_UPDATE_NOT_FOUND,
    write: codes::CATEGORY_UPDATE_WRITE,
    internal: codes::CATEGORY_UPDATE_INTERNAL,
};

const DELETE_CODES: CategoryCodes = CategoryCodes {
    not_found: codes::CATEGORY_DELETE_NOT_FOUND,
    write: codes::CATEGORY_DELETE_WRITE,
    internal: codes::CATEGORY_DELETE_INTERNAL,
};

impl From<CategoryEditorRequest> for CategoryInput {
    fn from(request: CategoryEditorRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
        }
    }
}

pub async fn list_categories(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .categories
        .list()
        .await
        .map_err(|err| category_to_api(LIST_CODES, err))?;

    let views: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();
    Ok(Json(ResultEnvelope::success(views)))
}

pub async fn get_category(
    State(state): State<ApiState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .get_by_id(id)
        .await
        .map_err(|err| category_to_api(GET_CODES, err))?;

    Ok(Json(ResultEnvelope::success(CategoryView::from(category))))
}

pub async fn create_category(
    State(state): State<ApiState>,
    WithRejection(Json(payload), _): EditorBody,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .create(payload.into())
        .await
        .map_err(|err| category_to_api(CREATE_CODES, err))?;

    let location = format!("/v1/categories/{}", category.id);
    let mut response = (
        StatusCode::CREATED,
        Json(ResultEnvelope::success(CategoryView::from(category))),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

pub async fn update_category(
    State(state): State<ApiState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(payload), _): EditorBody,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .update(id, payload.into())
        .await
        .map_err(|err| category_to_api(UPDATE_CODES, err))?;

    Ok(Json(ResultEnvelope::success(CategoryView::from(category))))
}

pub async fn delete_category(
    State(state): State<ApiState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .delete(id)
        .await
        .map_err(|err| category_to_api(DELETE_CODES, err))?;

    Ok(Json(ResultEnvelope::success(CategoryView::from(category))))
}
