use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{TrackError, TrackRequest, MISSING_FIELDS};
use super::sink::TrackSink;

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Router exposing `/api/track` with permissive CORS for the web client.
pub fn track_router<S>(sink: Arc<S>) -> Router
where
    S: TrackSink + 'static,
{
    Router::new()
        .route(
            "/api/track",
            post(track_handler::<S>)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .with_state(sink)
}

pub(crate) async fn track_handler<S>(
    State(sink): State<Arc<S>>,
    headers: HeaderMap,
    payload: Result<Json<TrackRequest>, JsonRejection>,
) -> Response
where
    S: TrackSink + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable track payload");
            return failure(StatusCode::BAD_REQUEST, MISSING_FIELDS);
        }
    };

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let record = match request.validate(user_agent, Utc::now()) {
        Ok(record) => record,
        Err(TrackError::Validation(message)) => return failure(StatusCode::BAD_REQUEST, message),
        Err(other) => {
            tracing::error!(error = %other, "TRACK_ERROR");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
        }
    };

    match sink.record(record) {
        Ok(()) => (StatusCode::OK, CORS_HEADERS, Json(json!({ "ok": true }))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "TRACK_ERROR");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

pub(crate) async fn preflight_handler() -> Response {
    (StatusCode::OK, CORS_HEADERS).into_response()
}

pub(crate) async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({ "ok": false, "error": message }));
    (status, CORS_HEADERS, body).into_response()
}
