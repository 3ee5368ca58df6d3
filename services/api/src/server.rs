use crate::cli::ServeArgs;
use crate::infra::{load_questionnaire, AppState};
use crate::routes::with_profile_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use seller_profile::config::AppConfig;
use seller_profile::error::AppError;
use seller_profile::telemetry;
use seller_profile::tracking::LogTrackSink;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let questionnaire = Arc::new(load_questionnaire(config.questionnaire.path.as_deref())?);
    info!(
        version = questionnaire.version.as_deref().unwrap_or("unversioned"),
        types = questionnaire.types.len(),
        questions = questionnaire.questions.len(),
        "questionnaire ready"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        questionnaire,
        share: config.share.clone(),
    };

    let app = with_profile_routes(Arc::new(LogTrackSink))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "seller profile service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
