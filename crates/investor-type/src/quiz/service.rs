use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use super::answers::{AnswerSet, AnswerValue};
use super::catalog::TypeRecord;
use super::code::InvestorCode;
use super::questions::QuestionId;
use super::scoring::ScoringEngine;
use super::session::{AnswerStore, SessionId, StoreError};
use super::views::{QuestionView, QuizResultView};

/// Quiz flow composing the answer store with the scoring engine.
pub struct QuizService<S> {
    store: Arc<S>,
    engine: ScoringEngine<'static>,
    public_url: String,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("quiz-{id:06}"))
}

impl<S> QuizService<S>
where
    S: AnswerStore + 'static,
{
    pub fn new(store: Arc<S>, public_url: impl Into<String>) -> Self {
        Self::with_engine(store, ScoringEngine::standard(), public_url)
    }

    pub fn with_engine(
        store: Arc<S>,
        engine: ScoringEngine<'static>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            engine,
            public_url: public_url.into(),
        }
    }

    pub fn engine(&self) -> ScoringEngine<'static> {
        self.engine
    }

    /// Opens a session. Resuming an unknown id starts it empty; `reset` drops saved answers.
    pub fn start(
        &self,
        resume: Option<SessionId>,
        reset: bool,
    ) -> Result<QuizProgress, QuizServiceError> {
        let session = resume.unwrap_or_else(next_session_id);

        let answers = if reset {
            self.store.clear(&session)?;
            None
        } else {
            self.store.load(&session)?
        };

        let answers = match answers {
            Some(answers) => answers,
            None => {
                let fresh = AnswerSet::new();
                self.store.save(&session, &fresh)?;
                fresh
            }
        };

        debug!(%session, reset, answered = answers.len(), "quiz session opened");
        Ok(self.progress_for(session, answers))
    }

    /// Records one answer and reports the updated progress.
    pub fn answer(
        &self,
        session: &SessionId,
        question: QuestionId,
        value: AnswerValue,
    ) -> Result<QuizProgress, QuizServiceError> {
        if self.engine.questions().get(question).is_none() {
            return Err(QuizServiceError::UnknownQuestion(question));
        }

        let answers = self
            .store
            .update(session, &mut |answers| {
                answers.insert(question, value);
            })?
            .ok_or_else(|| QuizServiceError::SessionNotFound(session.clone()))?;

        Ok(self.progress_for(session.clone(), answers))
    }

    pub fn progress(&self, session: &SessionId) -> Result<QuizProgress, QuizServiceError> {
        let answers = self.load(session)?;
        Ok(self.progress_for(session.clone(), answers))
    }

    /// Scores a fully answered session and discards its stored answers.
    pub fn complete(&self, session: &SessionId) -> Result<QuizOutcome, QuizServiceError> {
        let answers = self.load(session)?;

        let missing = answers.missing(&self.engine.questions());
        if !missing.is_empty() {
            return Err(QuizServiceError::Incomplete { missing });
        }

        let code = self.engine.compute_code(&answers);
        let record = self
            .engine
            .types()
            .get(code)
            .ok_or(QuizServiceError::MissingType(code))?;

        self.store.clear(session)?;
        info!(%session, %code, "quiz session completed");

        Ok(QuizOutcome {
            session_id: session.clone(),
            code,
            record,
        })
    }

    /// Presentation view for a record, with share links rooted at the public URL.
    pub fn result_view(&self, record: &TypeRecord) -> QuizResultView {
        QuizResultView::new(&self.engine.types(), record, &self.public_url)
    }

    fn load(&self, session: &SessionId) -> Result<AnswerSet, QuizServiceError> {
        self.store
            .load(session)?
            .ok_or_else(|| QuizServiceError::SessionNotFound(session.clone()))
    }

    fn progress_for(&self, session_id: SessionId, answers: AnswerSet) -> QuizProgress {
        let questions = self.engine.questions();
        let total = questions.len();
        let missing = answers.missing(&questions);
        let answered = total - missing.len();
        let percent = if total == 0 {
            100
        } else {
            ((answered * 100 + total / 2) / total) as u8
        };

        let next_question = missing.first().and_then(|id| {
            let index = questions.position(*id)?;
            questions
                .get(*id)
                .map(|question| QuestionView::new(question, index, total))
        });

        QuizProgress {
            session_id,
            answered,
            total,
            percent,
            complete: missing.is_empty(),
            next_question,
            answers,
        }
    }
}

/// Snapshot of a session returned after every quiz-flow call.
#[derive(Debug, Clone, Serialize)]
pub struct QuizProgress {
    pub session_id: SessionId,
    pub answered: usize,
    pub total: usize,
    pub percent: u8,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionView>,
    pub answers: AnswerSet,
}

#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub session_id: SessionId,
    pub code: InvestorCode,
    pub record: &'static TypeRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("quiz session {0} not found")]
    SessionNotFound(SessionId),
    #[error("question {0} is not part of the quiz")]
    UnknownQuestion(QuestionId),
    #[error("quiz incomplete: {} question(s) unanswered", .missing.len())]
    Incomplete { missing: Vec<QuestionId> },
    #[error("type {0} has no catalog record")]
    MissingType(InvestorCode),
    #[error(transparent)]
    Store(#[from] StoreError),
}
