use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::ErrorReport;
use crate::domain::error::FieldViolation;

use super::models::ResultEnvelope;

/// One code per (operation, failure kind). Rendered as `"<code> - <message>"`.
pub mod codes {
    pub const CATEGORY_LIST_INTERNAL: &str = "05X04";

    pub const CATEGORY_GET_NOT_FOUND: &str = "2002";
    pub const CATEGORY_GET_INTERNAL: &str = "0002";

    pub const CATEGORY_CREATE_WRITE: &str = "1003";
    pub const CATEGORY_CREATE_INTERNAL: &str = "0003";

    pub const CATEGORY_UPDATE_NOT_FOUND: &str = "2004";
    pub const CATEGORY_UPDATE_WRITE: &str = "1004";
    pub const CATEGORY_UPDATE_INTERNAL: &str = "0004";

    pub const CATEGORY_DELETE_NOT_FOUND: &str = "2005";
    pub const CATEGORY_DELETE_WRITE: &str = "1005";
    pub const CATEGORY_DELETE_INTERNAL: &str = "0006";

    pub const POST_LIST_INTERNAL: &str = "05X40";
    pub const POST_DETAILS_NOT_FOUND: &str = "2041";
    pub const POST_DETAILS_INTERNAL: &str = "05X41";
    pub const POST_CATEGORY_LIST_INTERNAL: &str = "05X42";

    pub const BAD_REQUEST: &str = "4000";
    pub const ROUTE_NOT_FOUND: &str = "4004";
    pub const ROUTING_INTERNAL: &str = "0000";
}

pub mod messages {
    pub const INTERNAL: &str = "Falha interna no servidor";
    pub const NOT_FOUND: &str = "Conteúdo não encontrado";
    pub const WRITE_FAILED: &str = "Não foi possível concluir a operação";
    pub const POSTS_INTERNAL: &str = "Erro interno no servidor";
    pub const BAD_REQUEST: &str = "Requisição inválida";
}

const SOURCE: &str = "infra::http::api";

/// Failure rendered as a `{ data: null, errors: [...] }` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    errors: Vec<String>,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            errors: vec![format!("{code} - {message}")],
            detail: None,
        }
    }

    pub fn internal(code: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, messages::INTERNAL)
    }

    pub fn posts_internal(code: &'static str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            code,
            messages::POSTS_INTERNAL,
        )
    }

    pub fn not_found(code: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, messages::NOT_FOUND)
    }

    pub fn write_failed(code: &'static str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            code,
            messages::WRITE_FAILED,
        )
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, messages::BAD_REQUEST)
    }

    /// Field messages are reported as-is, one entry per violated field rule.
    pub fn validation(fields: &[FieldViolation]) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            errors: fields.iter().map(|field| field.message.to_string()).collect(),
            detail: None,
        }
    }

    /// Internal cause logged by the response middleware, never sent to the client.
    pub fn with_detail(mut self, detail: impl std::fmt::Display) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ResultEnvelope::<()>::failure(self.errors.clone());
        let mut response = (self.status, Json(body)).into_response();

        let messages = self.detail.into_iter().chain(self.errors).collect();
        ErrorReport {
            source: SOURCE,
            status: self.status,
            messages,
        }
        .attach(&mut response);
        response
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => {
                Self::not_found(codes::ROUTE_NOT_FOUND).with_detail(rejection.body_text())
            }
            _ => Self::internal(codes::ROUTING_INTERNAL).with_detail(rejection.body_text()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request().with_detail(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request().with_detail(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_prefixed_with_their_code() {
        let err = ApiError::not_found(codes::CATEGORY_GET_NOT_FOUND);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.errors, ["2002 - Conteúdo não encontrado"]);
    }

    #[test]
    fn write_and_internal_failures_share_status_but_not_code() {
        let write = ApiError::write_failed(codes::CATEGORY_CREATE_WRITE);
        let internal = ApiError::internal(codes::CATEGORY_CREATE_INTERNAL);

        assert_eq!(write.status, internal.status);
        assert_ne!(write.errors, internal.errors);
    }

    #[test]
    fn validation_lists_field_messages() {
        let err = ApiError::validation(&[
            FieldViolation::new("Name", "O Nome é obrigatório"),
            FieldViolation::new("Slug", "Este campo deve ter entre 3 a 40 caracteres"),
        ]);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.errors,
            [
                "O Nome é obrigatório",
                "Este campo deve ter entre 3 a 40 caracteres"
            ]
        );
    }

    #[test]
    fn detail_is_kept_out_of_the_body() {
        let response = ApiError::internal(codes::CATEGORY_LIST_INTERNAL)
            .with_detail("connection refused")
            .into_response();

        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(
            report.messages,
            ["connection refused", "05X04 - Falha interna no servidor"]
        );
    }
}
