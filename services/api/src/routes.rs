use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use investor_type::quiz::{
    lookup_type, quiz_router, AnswerSet, AnswerStore, QuestionView, QuizResultView, QuizService,
    ScoreState, ScoringEngine, TypeCatalog, TypeDetailView, TypeSummaryView,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) answers: AnswerSet,
    /// Include per-letter totals in the response.
    #[serde(default)]
    pub(crate) explain: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    #[serde(flatten)]
    pub(crate) result: QuizResultView,
    pub(crate) answered: usize,
    pub(crate) complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scores: Option<ScoreState>,
}

pub(crate) fn with_quiz_routes<S>(service: Arc<QuizService<S>>) -> axum::Router
where
    S: AnswerStore + 'static,
{
    quiz_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/questions", axum::routing::get(questions_endpoint))
        .route("/api/v1/types", axum::routing::get(types_endpoint))
        .route("/api/v1/types/:code", axum::routing::get(type_detail_endpoint))
        .route("/api/v1/score", axum::routing::post(score_endpoint))
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

pub(crate) async fn questions_endpoint() -> Json<Vec<QuestionView>> {
    let questions = ScoringEngine::standard().questions();
    let total = questions.len();
    Json(
        questions
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionView::new(question, index, total))
            .collect(),
    )
}

pub(crate) async fn types_endpoint() -> Json<Vec<TypeSummaryView>> {
    Json(
        TypeCatalog::standard()
            .records()
            .iter()
            .map(TypeSummaryView::from)
            .collect(),
    )
}

pub(crate) async fn type_detail_endpoint(Path(code): Path<String>) -> Response {
    match lookup_type(&code) {
        Some(record) => {
            let view = TypeDetailView::new(&TypeCatalog::standard(), record);
            (StatusCode::OK, Json(view)).into_response()
        }
        None => {
            let payload = json!({ "error": format!("unknown investor type '{code}'") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

/// Stateless scoring of a submitted answer set; partial sets are allowed.
pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Response {
    let engine = ScoringEngine::standard();
    let code = engine.compute_code(&request.answers);

    let Some(record) = engine.types().get(code) else {
        error!(%code, "scored code has no catalog record");
        let payload = json!({ "error": format!("type {code} has no catalog record") });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
    };

    let questions = engine.questions();
    let response = ScoreResponse {
        result: QuizResultView::new(&engine.types(), record, &state.public_url),
        answered: request.answers.answered_in(&questions),
        complete: request.answers.is_complete(&questions),
        scores: request
            .explain
            .then(|| engine.score(&request.answers)),
    };

    (StatusCode::OK, Json(response)).into_response()
}
