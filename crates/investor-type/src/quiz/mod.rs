//! Investor-type quiz: sixteen Likert questions scored into a four-letter code.
//!
//! Scoring is a pure function of an [`AnswerSet`]; the catalogs are immutable
//! statics. The session service and router layer the interactive quiz flow on
//! top without the scoring core ever seeing a store.

pub mod answers;
pub mod axis;
pub mod catalog;
pub mod code;
pub mod import;
pub mod questions;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use answers::{AnswerSet, AnswerValue};
pub use axis::{Axis, Letter, LetterMeaning, Pole};
pub use catalog::{lookup_type, CatalogError, TypeCatalog, TypeRecord};
pub use code::{CodeParseError, InvestorCode};
pub use import::{AnswerSheetImporter, ImportError, RespondentAnswers};
pub use questions::{Question, QuestionCatalog, QuestionId};
pub use router::quiz_router;
pub use scoring::{
    compute_code, compute_code_with, score_answers, AxisScore, ScoreState, ScoringEngine,
    FALLBACK_CODE,
};
pub use service::{QuizOutcome, QuizProgress, QuizService, QuizServiceError};
pub use session::{AnswerStore, SessionId, StoreError};
pub use views::{
    description_sections, type_image_path, CompatibilityView, DescriptionBlock, QuestionView,
    QuizResultView, SharePayload, TypeDetailView, TypeSummaryView,
};

/// Per-letter explanations for a code, in axis order.
pub fn code_letter_meanings(code: InvestorCode) -> [LetterMeaning; 4] {
    code.letter_meanings()
}
