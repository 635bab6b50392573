use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quiz::{AnswerSet, AnswerStore, QuizService, SessionId, StoreError};

pub(super) const PUBLIC_URL: &str = "https://quiz.example.com";

/// Answer set favoring the first letter of every axis.
pub(super) fn first_letter_answers() -> AnswerSet {
    AnswerSet::from_raw([
        (1, 5),
        (2, 1),
        (3, 5),
        (4, 1),
        (5, 5),
        (6, 1),
        (7, 5),
        (8, 1),
        (9, 5),
        (10, 1),
        (11, 5),
        (12, 1),
        (13, 5),
        (14, 1),
        (15, 1),
        (16, 5),
    ])
}

pub(super) fn uniform_answers(value: i64) -> AnswerSet {
    AnswerSet::from_raw((1..=16).map(|id| (id, value)))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, AnswerSet>>>,
}

impl AnswerStore for MemoryStore {
    fn load(&self, session: &SessionId) -> Result<Option<AnswerSet>, StoreError> {
        let guard = self.sessions.lock().expect("lock");
        Ok(guard.get(session).cloned())
    }

    fn save(&self, session: &SessionId, answers: &AnswerSet) -> Result<(), StoreError> {
        let mut guard = self.sessions.lock().expect("lock");
        guard.insert(session.clone(), answers.clone());
        Ok(())
    }

    fn clear(&self, session: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.sessions.lock().expect("lock");
        guard.remove(session);
        Ok(())
    }

    fn update(
        &self,
        session: &SessionId,
        apply: &mut dyn FnMut(&mut AnswerSet),
    ) -> Result<Option<AnswerSet>, StoreError> {
        let mut guard = self.sessions.lock().expect("lock");
        let Some(answers) = guard.get_mut(session) else {
            return Ok(None);
        };
        apply(answers);
        Ok(Some(answers.clone()))
    }
}

pub(super) struct UnavailableStore;

impl AnswerStore for UnavailableStore {
    fn load(&self, _session: &SessionId) -> Result<Option<AnswerSet>, StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn save(&self, _session: &SessionId, _answers: &AnswerSet) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn clear(&self, _session: &SessionId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn update(
        &self,
        _session: &SessionId,
        _apply: &mut dyn FnMut(&mut AnswerSet),
    ) -> Result<Option<AnswerSet>, StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }
}

pub(super) fn build_service() -> (QuizService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::default();
    let service = QuizService::new(Arc::new(store.clone()), PUBLIC_URL);
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
