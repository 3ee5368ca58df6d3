use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use seller_profile::questionnaire::{SecondaryMix, TypeNarrative};
use seller_profile::share::{share_text, share_url};
use seller_profile::tracking::{track_router, TrackSink};
use seller_profile::{compute_profile, AnswerSelection, Profile, Questionnaire};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRequest {
    #[serde(default)]
    pub(crate) selections: AnswerSelection,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) questionnaire_version: Option<String>,
    pub(crate) answered: usize,
    pub(crate) total_questions: usize,
    #[serde(flatten)]
    pub(crate) profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) primary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) secondary_name: Option<String>,
    /// Strengths, traps and growth plan of the primary type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) narrative: Option<TypeNarrative>,
    /// What the secondary type adds to the primary, and the risk it brings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) secondary_mix: Option<SecondaryMix>,
    pub(crate) share_text: String,
    pub(crate) share_url: String,
}

pub(crate) fn with_profile_routes<S>(sink: Arc<S>) -> axum::Router
where
    S: TrackSink + 'static,
{
    track_router(sink)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/questionnaire",
            axum::routing::get(questionnaire_endpoint),
        )
        .route("/api/v1/profile", axum::routing::post(profile_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questionnaire_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Questionnaire> {
    Json(state.questionnaire.as_ref().clone())
}

pub(crate) async fn profile_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Json<ProfileResponse> {
    let questionnaire = state.questionnaire.as_ref();
    let profile = compute_profile(questionnaire, &payload.selections);

    // stale ids do not count as answered
    let answered = payload
        .selections
        .iter()
        .filter(|(question, answer)| questionnaire.answer(question, answer).is_some())
        .count();
    let text = share_text(questionnaire, &profile, &state.share.bot_handle);
    let url = share_url(&state.share.origin, &text);
    let narrative = profile
        .primary_key()
        .and_then(|key| questionnaire.type_definition(key))
        .map(|definition| &definition.result);
    let secondary_mix = narrative
        .zip(profile.secondary_key())
        .and_then(|(narrative, key)| narrative.secondary_mix.get(key))
        .cloned();

    tracing::debug!(
        answered,
        primary = profile.primary_key().map(|key| key.as_str()),
        secondary = profile.secondary_key().map(|key| key.as_str()),
        "profile computed"
    );

    Json(ProfileResponse {
        questionnaire_version: questionnaire.version.clone(),
        answered,
        total_questions: questionnaire.questions.len(),
        primary_name: profile
            .primary_key()
            .map(|key| questionnaire.type_name(key).to_string()),
        secondary_name: profile
            .secondary_key()
            .map(|key| questionnaire.type_name(key).to_string()),
        narrative: narrative.cloned(),
        secondary_mix,
        share_text: text,
        share_url: url,
        profile,
    })
}
