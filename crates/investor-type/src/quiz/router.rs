use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::answers::AnswerValue;
use super::questions::QuestionId;
use super::service::{QuizService, QuizServiceError};
use super::session::{AnswerStore, SessionId};

#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub reset: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub value: AnswerValue,
}

/// Router builder exposing the quiz-flow session endpoints.
pub fn quiz_router<S>(service: Arc<QuizService<S>>) -> Router
where
    S: AnswerStore + 'static,
{
    Router::new()
        .route("/api/v1/quiz/sessions", post(start_handler::<S>))
        .route(
            "/api/v1/quiz/sessions/:session_id",
            get(progress_handler::<S>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/answers/:question_id",
            put(answer_handler::<S>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/complete",
            post(complete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    request: Option<axum::Json<StartSessionRequest>>,
) -> Response
where
    S: AnswerStore + 'static,
{
    // an empty or non-JSON body starts a fresh session
    let request = request
        .map(|axum::Json(request)| request)
        .unwrap_or_default();

    match service.start(request.session_id, request.reset) {
        Ok(progress) => (StatusCode::CREATED, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn progress_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AnswerStore + 'static,
{
    match service.progress(&SessionId(session_id)) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path((session_id, question_id)): Path<(String, u32)>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    S: AnswerStore + 'static,
{
    match service.answer(
        &SessionId(session_id),
        QuestionId(question_id),
        request.value,
    ) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn complete_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AnswerStore + 'static,
{
    match service.complete(&SessionId(session_id)) {
        Ok(outcome) => {
            let view = service.result_view(outcome.record);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: QuizServiceError) -> Response {
    match err {
        QuizServiceError::SessionNotFound(ref session) => {
            let payload = json!({
                "error": err.to_string(),
                "session_id": session,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        QuizServiceError::UnknownQuestion(question) => {
            let payload = json!({
                "error": err.to_string(),
                "question_id": question,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        QuizServiceError::Incomplete { ref missing } => {
            let payload = json!({
                "error": err.to_string(),
                "missing": missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        QuizServiceError::MissingType(_) | QuizServiceError::Store(_) => {
            error!(error = %err, "quiz flow failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
