use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::questions::{QuestionCatalog, QuestionId};

/// Likert answer in `1..=5` (1 = strongly disagree, 5 = strongly agree).
///
/// Out-of-range input is clamped to the nearest bound rather than rejected;
/// a conforming quiz flow never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: AnswerValue = AnswerValue(3);

    /// Strict constructor.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn clamped(raw: i64) -> Self {
        let value = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8;
        if i64::from(value) != raw {
            debug!(raw, clamped = value, "answer value outside 1..=5 clamped");
        }
        Self(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Maps 1..=5 onto -2..=2 with 3 as neutral zero.
    pub fn normalized(self) -> i8 {
        self.0 as i8 - 3
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::clamped(raw))
    }
}

/// Answers keyed by question id. May be partial.
///
/// Serializes as a JSON object keyed by the question id (`{"1": 5}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw integers, clamping each value.
    pub fn from_raw<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, i64)>,
    {
        pairs
            .into_iter()
            .map(|(id, raw)| (QuestionId(id), AnswerValue::clamped(raw)))
            .collect()
    }

    /// Records an answer, returning the one it replaced.
    pub fn insert(&mut self, question: QuestionId, value: AnswerValue) -> Option<AnswerValue> {
        self.answers.insert(question, value)
    }

    pub fn get(&self, question: QuestionId) -> Option<AnswerValue> {
        self.answers.get(&question).copied()
    }

    pub fn remove(&mut self, question: QuestionId) -> Option<AnswerValue> {
        self.answers.remove(&question)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, AnswerValue)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }

    /// Catalog questions without an answer, in catalog order.
    pub fn missing(&self, catalog: &QuestionCatalog<'_>) -> Vec<QuestionId> {
        catalog
            .questions()
            .iter()
            .map(|question| question.id)
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    /// Number of catalog questions answered; answers to unknown ids are ignored.
    pub fn answered_in(&self, catalog: &QuestionCatalog<'_>) -> usize {
        catalog.len() - self.missing(catalog).len()
    }

    pub fn is_complete(&self, catalog: &QuestionCatalog<'_>) -> bool {
        self.missing(catalog).is_empty()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
