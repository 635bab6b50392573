use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAnswerStore};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use investor_type::config::AppConfig;
use investor_type::error::AppError;
use investor_type::quiz::QuizService;
use investor_type::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        public_url: Arc::from(config.quiz.public_url.as_str()),
    };

    let idle = chrono::Duration::minutes(config.quiz.session_idle_minutes);
    let store = Arc::new(InMemoryAnswerStore::new(idle));
    let quiz_service = Arc::new(QuizService::new(store, config.quiz.public_url.clone()));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        idle_minutes = config.quiz.session_idle_minutes,
        "investor type quiz ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
