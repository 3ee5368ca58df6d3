use metrics_exporter_prometheus::PrometheusHandle;
use seller_profile::config::ShareConfig;
use seller_profile::questionnaire::{AnswerId, QuestionId};
use seller_profile::{Questionnaire, QuestionnaireError};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) questionnaire: Arc<Questionnaire>,
    pub(crate) share: ShareConfig,
}

/// Reads the questionnaire at `path`, or the bundled one when no path is configured.
pub(crate) fn load_questionnaire(path: Option<&Path>) -> Result<Questionnaire, QuestionnaireError> {
    match path {
        Some(path) => Questionnaire::from_path(path),
        None => Questionnaire::builtin(),
    }
}

/// Parses a `question=answer` pair from the command line.
pub(crate) fn parse_answer(raw: &str) -> Result<(QuestionId, AnswerId), String> {
    let (question, answer) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=ANSWER, got '{raw}'"))?;
    let (question, answer) = (question.trim(), answer.trim());
    if question.is_empty() || answer.is_empty() {
        return Err(format!("expected QUESTION=ANSWER, got '{raw}'"));
    }
    Ok((QuestionId::from(question), AnswerId::from(answer)))
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use metrics_exporter_prometheus::PrometheusBuilder;

    AppState {
        readiness: Arc::new(AtomicBool::new(true)),
        metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        questionnaire: Arc::new(Questionnaire::builtin().expect("bundled questionnaire")),
        share: ShareConfig {
            bot_handle: "@disc_for_seller_bot".to_string(),
            origin: "https://t.me".to_string(),
        },
    }
}
