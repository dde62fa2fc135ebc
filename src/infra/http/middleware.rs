use std::time::Instant;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

/// Per-request id, available to handlers and copied onto the response.
#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext {
        request_id: Uuid::new_v4().to_string(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Log 4xx responses at `warn` and 5xx at `error`, using the attached [`ErrorReport`].
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let report = response.extensions_mut().remove::<ErrorReport>();
        log_failure(
            FailedRequest {
                method,
                path,
                request_id,
                status,
                elapsed_ms: start.elapsed().as_millis(),
            },
            report,
        );
    }

    response
}

struct FailedRequest {
    method: Method,
    path: String,
    request_id: String,
    status: StatusCode,
    elapsed_ms: u128,
}

fn log_failure(request: FailedRequest, report: Option<ErrorReport>) {
    let (source, chain) = report
        .map(|report| (report.source, report.messages))
        .unwrap_or(("unknown", Vec::new()));
    let detail = chain.first().map_or("no diagnostic available", String::as_str);

    if request.status.is_server_error() {
        error!(
            target: "blog_api::http::response",
            status = request.status.as_u16(),
            method = %request.method,
            path = %request.path,
            elapsed_ms = request.elapsed_ms,
            source,
            detail,
            chain = ?chain,
            request_id = %request.request_id,
            "request failed",
        );
    } else {
        warn!(
            target: "blog_api::http::response",
            status = request.status.as_u16(),
            method = %request.method,
            path = %request.path,
            elapsed_ms = request.elapsed_ms,
            source,
            detail,
            chain = ?chain,
            request_id = %request.request_id,
            "client request error",
        );
    }
}
