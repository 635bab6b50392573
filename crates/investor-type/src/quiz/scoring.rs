use serde::Serialize;
use tracing::{debug, warn};

use super::answers::AnswerSet;
use super::axis::{Axis, Letter, Pole};
use super::catalog::TypeCatalog;
use super::code::InvestorCode;
use super::questions::QuestionCatalog;

/// Returned when a resolved code has no record in the type catalog.
///
/// Unreachable while the catalog holds all 16 types.
pub const FALLBACK_CODE: InvestorCode = InvestorCode::SALD;

/// Running totals for the two letters of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AxisScore {
    pub first: f64,
    pub second: f64,
}

impl AxisScore {
    pub fn total(&self, pole: Pole) -> f64 {
        match pole {
            Pole::First => self.first,
            Pole::Second => self.second,
        }
    }

    fn add(&mut self, pole: Pole, delta: f64) {
        match pole {
            Pole::First => self.first += delta,
            Pole::Second => self.second += delta,
        }
    }

    /// Ties, including the all-zero state, go to the first letter.
    pub fn winner(&self) -> Pole {
        if self.first >= self.second {
            Pole::First
        } else {
            Pole::Second
        }
    }
}

/// Per-axis letter totals accumulated over an answer set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreState {
    pub risk: AxisScore,
    pub decision: AxisScore,
    pub time: AxisScore,
    pub judge: AxisScore,
}

impl ScoreState {
    pub fn axis(&self, axis: Axis) -> &AxisScore {
        match axis {
            Axis::Risk => &self.risk,
            Axis::Decision => &self.decision,
            Axis::Time => &self.time,
            Axis::Judge => &self.judge,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisScore {
        match axis {
            Axis::Risk => &mut self.risk,
            Axis::Decision => &mut self.decision,
            Axis::Time => &mut self.time,
            Axis::Judge => &mut self.judge,
        }
    }

    pub fn letter_total(&self, letter: Letter) -> f64 {
        self.axis(letter.axis()).total(letter.pole())
    }

    /// Picks the winning letter on every axis.
    pub fn resolve(&self) -> InvestorCode {
        InvestorCode::from_poles(
            self.risk.winner(),
            self.decision.winner(),
            self.time.winner(),
            self.judge.winner(),
        )
    }
}

/// Stateless engine turning answer sets into investor codes.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    questions: QuestionCatalog<'a>,
    types: TypeCatalog<'a>,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(questions: QuestionCatalog<'a>, types: TypeCatalog<'a>) -> Self {
        Self { questions, types }
    }

    pub fn questions(&self) -> QuestionCatalog<'a> {
        self.questions
    }

    pub fn types(&self) -> TypeCatalog<'a> {
        self.types
    }

    /// Accumulates weighted, normalized answers per letter.
    ///
    /// Unanswered questions and neutral answers contribute nothing.
    pub fn score(&self, answers: &AnswerSet) -> ScoreState {
        let mut state = ScoreState::default();

        for question in self.questions.questions() {
            let Some(value) = answers.get(question.id) else {
                continue;
            };

            let normalized = value.normalized();
            if normalized == 0 {
                continue;
            }

            for &(letter, weight) in question.weights {
                if letter.axis() != question.axis {
                    warn!(
                        question = question.id.0,
                        %letter,
                        axis = %question.axis,
                        "ignoring weight for a letter outside the question's axis"
                    );
                    continue;
                }
                state
                    .axis_mut(question.axis)
                    .add(letter.pole(), f64::from(normalized) * weight);
            }
        }

        state
    }

    /// Resolves an answer set to a code that is guaranteed to have a record.
    pub fn compute_code(&self, answers: &AnswerSet) -> InvestorCode {
        let state = self.score(answers);
        let code = state.resolve();

        if self.types.contains(code) {
            debug!(%code, answered = answers.len(), "investor code resolved");
            code
        } else {
            warn!(
                %code,
                fallback = %FALLBACK_CODE,
                "resolved code missing from the type catalog; using fallback"
            );
            FALLBACK_CODE
        }
    }
}

impl ScoringEngine<'static> {
    pub fn standard() -> Self {
        Self::new(QuestionCatalog::standard(), TypeCatalog::standard())
    }
}

/// Per-letter totals for an answer set against the standard questions.
pub fn score_answers(answers: &AnswerSet) -> ScoreState {
    ScoringEngine::standard().score(answers)
}

/// Maps an answer set to its investor code. Never fails.
pub fn compute_code(answers: &AnswerSet) -> InvestorCode {
    ScoringEngine::standard().compute_code(answers)
}

/// [`compute_code`] against explicit catalogs.
pub fn compute_code_with(
    questions: QuestionCatalog<'_>,
    types: TypeCatalog<'_>,
    answers: &AnswerSet,
) -> InvestorCode {
    ScoringEngine::new(questions, types).compute_code(answers)
}
