use chrono::{DateTime, Duration, Utc};
use investor_type::quiz::{AnswerSet, AnswerStore, SessionId, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) public_url: Arc<str>,
}

#[derive(Debug, Clone)]
struct StoredAnswers {
    answers: AnswerSet,
    touched_at: DateTime<Utc>,
}

/// Process-local answer store. Sessions idle longer than `idle` are dropped.
#[derive(Clone)]
pub(crate) struct InMemoryAnswerStore {
    sessions: Arc<Mutex<HashMap<SessionId, StoredAnswers>>>,
    idle: Duration,
}

impl InMemoryAnswerStore {
    pub(crate) fn new(idle: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, StoredAnswers>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|_| StoreError::Unavailable("answer store mutex poisoned".to_string()))
    }

    /// Removes sessions untouched since `now - idle`, returning how many were dropped.
    pub(crate) fn expire_idle(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        let cutoff = now - self.idle;
        let before = guard.len();
        guard.retain(|_, stored| stored.touched_at >= cutoff);
        let expired = before - guard.len();
        if expired > 0 {
            debug!(expired, "expired idle quiz sessions");
        }
        Ok(expired)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or_default()
    }
}

impl AnswerStore for InMemoryAnswerStore {
    fn load(&self, session: &SessionId) -> Result<Option<AnswerSet>, StoreError> {
        self.expire_idle(Utc::now())?;
        let guard = self.lock()?;
        Ok(guard.get(session).map(|stored| stored.answers.clone()))
    }

    fn save(&self, session: &SessionId, answers: &AnswerSet) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        guard.insert(
            session.clone(),
            StoredAnswers {
                answers: answers.clone(),
                touched_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn clear(&self, session: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        guard.remove(session);
        Ok(())
    }

    fn update(
        &self,
        session: &SessionId,
        apply: &mut dyn FnMut(&mut AnswerSet),
    ) -> Result<Option<AnswerSet>, StoreError> {
        self.expire_idle(Utc::now())?;
        let mut guard = self.lock()?;
        let Some(stored) = guard.get_mut(session) else {
            return Ok(None);
        };
        apply(&mut stored.answers);
        stored.touched_at = Utc::now();
        Ok(Some(stored.answers.clone()))
    }
}

/// Parses a CLI `ID=VALUE` answer pair; the value is clamped later.
pub(crate) fn parse_answer(raw: &str) -> Result<(u32, i64), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid question id in '{raw}' ({err})"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid answer value in '{raw}' ({err})"))?;
    Ok((id, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use investor_type::quiz::{AnswerValue, QuestionId};

    #[test]
    fn idle_sessions_expire() {
        let store = InMemoryAnswerStore::new(Duration::minutes(30));
        let session = SessionId::from("quiz-000001");
        let mut answers = AnswerSet::new();
        answers.insert(QuestionId(1), AnswerValue::clamped(4));
        store.save(&session, &answers).expect("saved");

        assert_eq!(store.expire_idle(Utc::now()).expect("store usable"), 0);
        assert_eq!(store.load(&session).expect("loads"), Some(answers));

        let later = Utc::now() + Duration::minutes(31);
        assert_eq!(store.expire_idle(later).expect("store usable"), 1);
        assert_eq!(store.len(), 0);
        assert_eq!(store.load(&session).expect("loads"), None);
    }

    #[test]
    fn clear_removes_session() {
        let store = InMemoryAnswerStore::new(Duration::minutes(30));
        let session = SessionId::from("quiz-000002");
        store.save(&session, &AnswerSet::new()).expect("saved");
        store.clear(&session).expect("cleared");
        assert_eq!(store.load(&session).expect("loads"), None);
    }

    #[test]
    fn concurrent_updates_keep_every_answer() {
        let store = Arc::new(InMemoryAnswerStore::new(Duration::minutes(30)));
        let session = SessionId::from("quiz-000003");
        store.save(&session, &AnswerSet::new()).expect("saved");

        let handles: Vec<_> = (1..=16)
            .map(|id| {
                let store = Arc::clone(&store);
                let session = session.clone();
                std::thread::spawn(move || {
                    store
                        .update(&session, &mut |answers| {
                            answers.insert(QuestionId(id), AnswerValue::clamped(5));
                        })
                        .expect("store usable")
                        .expect("session present");
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread finished");
        }

        let answers = store.load(&session).expect("loads").expect("session present");
        assert_eq!(answers.len(), 16);
    }

    #[test]
    fn update_on_unknown_session_is_none() {
        let store = InMemoryAnswerStore::new(Duration::minutes(30));
        let updated = store
            .update(&SessionId::from("quiz-404404"), &mut |_| {})
            .expect("store usable");
        assert!(updated.is_none());
    }

    #[test]
    fn parses_answer_pairs() {
        assert_eq!(parse_answer("3=5"), Ok((3, 5)));
        assert_eq!(parse_answer(" 12 = -1 "), Ok((12, -1)));
        assert!(parse_answer("3:5").is_err());
        assert!(parse_answer("x=5").is_err());
        assert!(parse_answer("3=high").is_err());
    }
}
