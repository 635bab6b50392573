use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four independent bipolar dimensions of the questionnaire.
///
/// The declaration order is the order letters appear in an [`InvestorCode`].
///
/// [`InvestorCode`]: super::code::InvestorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Risk,
    Decision,
    Time,
    Judge,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Risk, Axis::Decision, Axis::Time, Axis::Judge];

    /// The axis' letter pair, first-listed letter first.
    pub const fn letters(self) -> (Letter, Letter) {
        match self {
            Axis::Risk => (Letter::R, Letter::S),
            Axis::Decision => (Letter::A, Letter::C),
            Axis::Time => (Letter::T, Letter::L),
            Axis::Judge => (Letter::D, Letter::V),
        }
    }

    pub const fn letter(self, pole: Pole) -> Letter {
        let (first, second) = self.letters();
        match pole {
            Pole::First => first,
            Pole::Second => second,
        }
    }

    /// Position of the axis inside a code.
    pub const fn position(self) -> usize {
        match self {
            Axis::Risk => 0,
            Axis::Decision => 1,
            Axis::Time => 2,
            Axis::Judge => 3,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Axis::Risk => "risk",
            Axis::Decision => "decision",
            Axis::Time => "time",
            Axis::Judge => "judge",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Axis::Risk => "リスク許容度",
            Axis::Decision => "意思決定スタイル",
            Axis::Time => "時間軸",
            Axis::Judge => "判断基準",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which side of an axis a letter sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pole {
    First,
    Second,
}

/// The eight code letters, two per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    R,
    S,
    A,
    C,
    T,
    L,
    D,
    V,
}

impl Letter {
    pub const fn axis(self) -> Axis {
        match self {
            Letter::R | Letter::S => Axis::Risk,
            Letter::A | Letter::C => Axis::Decision,
            Letter::T | Letter::L => Axis::Time,
            Letter::D | Letter::V => Axis::Judge,
        }
    }

    pub const fn pole(self) -> Pole {
        match self {
            Letter::R | Letter::A | Letter::T | Letter::D => Pole::First,
            Letter::S | Letter::C | Letter::L | Letter::V => Pole::Second,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Letter::R => 'R',
            Letter::S => 'S',
            Letter::A => 'A',
            Letter::C => 'C',
            Letter::T => 'T',
            Letter::L => 'L',
            Letter::D => 'D',
            Letter::V => 'V',
        }
    }

    /// Case-insensitive.
    pub fn from_char(raw: char) -> Option<Self> {
        match raw.to_ascii_uppercase() {
            'R' => Some(Letter::R),
            'S' => Some(Letter::S),
            'A' => Some(Letter::A),
            'C' => Some(Letter::C),
            'T' => Some(Letter::T),
            'L' => Some(Letter::L),
            'D' => Some(Letter::D),
            'V' => Some(Letter::V),
            _ => None,
        }
    }

    pub fn meaning(self) -> LetterMeaning {
        let (name, description) = match self {
            Letter::R => (
                "Risk-taking",
                "高リスク・高リターンを好み、積極的に投資機会を追求するタイプ",
            ),
            Letter::S => (
                "Secure",
                "安定性を重視し、リスクを抑えた慎重な投資を好むタイプ",
            ),
            Letter::A => (
                "Autonomous",
                "自分で調べ、自分の基準で投資判断を下すタイプ",
            ),
            Letter::C => (
                "Collective",
                "仲間や専門家、コミュニティの意見を参考に投資判断を行うタイプ",
            ),
            Letter::T => (
                "Tactical",
                "短期的な値動きを捉え、機動的に売買するタイプ",
            ),
            Letter::L => (
                "Long-term",
                "長期的な成長を見据えて、じっくりと資産を育てるタイプ",
            ),
            Letter::D => (
                "Data",
                "データや分析を基に論理的に投資判断を行うタイプ",
            ),
            Letter::V => (
                "Value",
                "企業の理念や社会的価値も重視して投資を行うタイプ",
            ),
        };

        LetterMeaning {
            axis: self.axis(),
            axis_label: self.axis().label(),
            letter: self,
            name,
            description,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Human-readable explanation of a single code letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterMeaning {
    pub axis: Axis,
    pub axis_label: &'static str,
    pub letter: Letter,
    pub name: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_letter_round_trips_through_its_axis() {
        for axis in Axis::ALL {
            let (first, second) = axis.letters();
            assert_eq!(first.axis(), axis);
            assert_eq!(second.axis(), axis);
            assert_eq!(first.pole(), Pole::First);
            assert_eq!(second.pole(), Pole::Second);
            assert_eq!(axis.letter(first.pole()), first);
            assert_eq!(axis.letter(second.pole()), second);
        }
    }

    #[test]
    fn letter_parsing_ignores_case() {
        assert_eq!(Letter::from_char('v'), Some(Letter::V));
        assert_eq!(Letter::from_char('L'), Some(Letter::L));
        assert_eq!(Letter::from_char('x'), None);
    }

    #[test]
    fn positions_follow_axis_order() {
        let positions: Vec<usize> = Axis::ALL.iter().map(|axis| axis.position()).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }
}
