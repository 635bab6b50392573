use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::axis::{Axis, Letter};
use super::catalog::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single Likert statement measuring one axis.
///
/// The normalized answer is multiplied by each weight and added to that
/// letter's running total. Weights may only name letters of `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub axis: Axis,
    pub text: &'static str,
    #[serde(serialize_with = "serialize_weights")]
    pub weights: &'static [(Letter, f64)],
}

fn serialize_weights<S>(weights: &&'static [(Letter, f64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(weights.len()))?;
    for (letter, weight) in weights.iter() {
        map.serialize_entry(&letter.as_char(), weight)?;
    }
    map.end()
}

/// Ordered, read-only list of quiz questions.
#[derive(Debug, Clone, Copy)]
pub struct QuestionCatalog<'a> {
    questions: &'a [Question],
}

impl<'a> QuestionCatalog<'a> {
    pub const fn new(questions: &'a [Question]) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &'a [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&'a Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    pub fn for_axis(&self, axis: Axis) -> Vec<&'a Question> {
        self.questions
            .iter()
            .filter(|question| question.axis == axis)
            .collect()
    }

    /// Checks id uniqueness, weight ownership and sign, and the per-axis balance.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for question in self.questions {
            if question.id.0 == 0 || !seen.insert(question.id) {
                return Err(CatalogError::InvalidQuestionId(question.id));
            }
            if question.weights.is_empty() {
                return Err(CatalogError::UnweightedQuestion(question.id));
            }
            for (letter, weight) in question.weights {
                if letter.axis() != question.axis {
                    return Err(CatalogError::ForeignLetter {
                        question: question.id,
                        axis: question.axis,
                        letter: *letter,
                    });
                }
                if !(weight.is_finite() && *weight > 0.0) {
                    return Err(CatalogError::NonPositiveWeight {
                        question: question.id,
                        letter: *letter,
                    });
                }
            }
        }

        let expected = self.questions.len() / Axis::ALL.len();
        for axis in Axis::ALL {
            let count = self.for_axis(axis).len();
            if count != expected || count == 0 {
                return Err(CatalogError::UnbalancedAxis { axis, count });
            }
        }

        Ok(())
    }
}

impl QuestionCatalog<'static> {
    /// The 16 authored questions, four per axis.
    pub fn standard() -> Self {
        Self::new(&STANDARD_QUESTIONS)
    }
}

static STANDARD_QUESTIONS: [Question; 16] = [
    Question {
        id: QuestionId(1),
        axis: Axis::Risk,
        text: "大きなリターンが期待できるなら、多少の値動きは気にせずチャレンジしたい。",
        weights: &[(Letter::R, 1.5)],
    },
    Question {
        id: QuestionId(2),
        axis: Axis::Risk,
        text: "投資で一番避けたいのは、大きな損失で夜眠れなくなる状況だ。",
        weights: &[(Letter::S, 1.5)],
    },
    Question {
        id: QuestionId(3),
        axis: Axis::Risk,
        text: "新しい商品やテーマに早めに乗る方だ。",
        weights: &[(Letter::R, 1.2)],
    },
    Question {
        id: QuestionId(4),
        axis: Axis::Risk,
        text: "元本割れの可能性が高いものには、基本的に手を出したくない。",
        weights: &[(Letter::S, 1.3)],
    },
    Question {
        id: QuestionId(5),
        axis: Axis::Decision,
        text: "最終的な投資判断は、自分で調べて自分で決めたい。",
        weights: &[(Letter::A, 1.5)],
    },
    Question {
        id: QuestionId(6),
        axis: Axis::Decision,
        text: "SNSやインフルエンサー、友人の意見をかなり参考にする。",
        weights: &[(Letter::C, 1.3)],
    },
    Question {
        id: QuestionId(7),
        axis: Axis::Decision,
        text: "専門家や他人のおすすめより、自分のルールや基準を優先する。",
        weights: &[(Letter::A, 1.4)],
    },
    Question {
        id: QuestionId(8),
        axis: Axis::Decision,
        text: "みんなが買っているものには安心感を覚える。",
        weights: &[(Letter::C, 1.5)],
    },
    Question {
        id: QuestionId(9),
        axis: Axis::Time,
        text: "数週間〜1年程度の値動きを見ながら、柔軟に売買したい。",
        weights: &[(Letter::T, 1.3)],
    },
    Question {
        id: QuestionId(10),
        axis: Axis::Time,
        text: "10年単位で積み立てて育てる投資が自分には合っていると思う。",
        weights: &[(Letter::L, 1.5)],
    },
    Question {
        id: QuestionId(11),
        axis: Axis::Time,
        text: "短期で結果が出ないとモチベーションが下がりやすい。",
        weights: &[(Letter::T, 1.4)],
    },
    Question {
        id: QuestionId(12),
        axis: Axis::Time,
        text: "日々の値動きより、長期トレンドや将来像を重視する。",
        weights: &[(Letter::L, 1.4)],
    },
    Question {
        id: QuestionId(13),
        axis: Axis::Judge,
        text: "PER、売上成長率、チャートなどの数字を見て判断することが多い。",
        weights: &[(Letter::D, 1.5)],
    },
    Question {
        id: QuestionId(14),
        axis: Axis::Judge,
        text: "企業理念やストーリー、好きかどうかが投資判断に影響する。",
        weights: &[(Letter::V, 1.4)],
    },
    Question {
        id: QuestionId(15),
        axis: Axis::Judge,
        text: "財務データがよくても、応援したくない企業には投資したくない。",
        weights: &[(Letter::V, 1.5)],
    },
    Question {
        id: QuestionId(16),
        axis: Axis::Judge,
        text: "ニュース・指標・チャートを組み合わせて、論理的に結論を出す方だ。",
        weights: &[(Letter::D, 1.3)],
    },
];
