use serde::{Deserialize, Serialize};
use std::fmt;

use super::answers::AnswerSet;

/// Identifies one quiz run's in-progress answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Transient storage for answers collected during a quiz session.
///
/// Owned by the quiz flow; the scoring core never touches it.
pub trait AnswerStore: Send + Sync {
    /// `Ok(None)` means the session is unknown or has expired.
    fn load(&self, session: &SessionId) -> Result<Option<AnswerSet>, StoreError>;
    fn save(&self, session: &SessionId, answers: &AnswerSet) -> Result<(), StoreError>;
    fn clear(&self, session: &SessionId) -> Result<(), StoreError>;

    /// Applies `apply` to a session's answers and persists the result as one
    /// atomic step, returning the updated set. `Ok(None)` when the session is unknown.
    fn update(
        &self,
        session: &SessionId,
        apply: &mut dyn FnMut(&mut AnswerSet),
    ) -> Result<Option<AnswerSet>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("answer store unavailable: {0}")]
    Unavailable(String),
}
