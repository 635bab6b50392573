use super::axis::{Axis, Letter, LetterMeaning, Pole};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Four-letter investor type, one letter per axis in [`Axis::ALL`] order.
///
/// Stored as one [`Pole`] per axis, so only the 16 valid combinations can be
/// represented. Serializes as the uppercase string (`"RATD"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvestorCode {
    poles: [Pole; 4],
}

macro_rules! investor_codes {
    ($($name:ident => [$risk:ident, $decision:ident, $time:ident, $judge:ident]),+ $(,)?) => {
        impl InvestorCode {
            $(
                pub const $name: InvestorCode = InvestorCode {
                    poles: [Pole::$risk, Pole::$decision, Pole::$time, Pole::$judge],
                };
            )+

            /// All 16 codes in canonical order.
            pub const ALL: [InvestorCode; 16] = [$(InvestorCode::$name),+];
        }
    };
}

investor_codes! {
    RATD => [First, First, First, First],
    RATV => [First, First, First, Second],
    RALD => [First, First, Second, First],
    RALV => [First, First, Second, Second],
    RCTD => [First, Second, First, First],
    RCTV => [First, Second, First, Second],
    RCLD => [First, Second, Second, First],
    RCLV => [First, Second, Second, Second],
    SATD => [Second, First, First, First],
    SATV => [Second, First, First, Second],
    SALD => [Second, First, Second, First],
    SALV => [Second, First, Second, Second],
    SCTD => [Second, Second, First, First],
    SCTV => [Second, Second, First, Second],
    SCLD => [Second, Second, Second, First],
    SCLV => [Second, Second, Second, Second],
}

impl InvestorCode {
    pub const fn from_poles(risk: Pole, decision: Pole, time: Pole, judge: Pole) -> Self {
        Self {
            poles: [risk, decision, time, judge],
        }
    }

    pub const fn pole(self, axis: Axis) -> Pole {
        self.poles[axis.position()]
    }

    pub const fn letter(self, axis: Axis) -> Letter {
        axis.letter(self.pole(axis))
    }

    pub fn letters(self) -> [Letter; 4] {
        Axis::ALL.map(|axis| self.letter(axis))
    }

    /// Ordered per-letter explanations for display.
    pub fn letter_meanings(self) -> [LetterMeaning; 4] {
        self.letters().map(Letter::meaning)
    }

    /// Parses a code case-insensitively, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        let trimmed = raw.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() != Axis::ALL.len() {
            return Err(CodeParseError::InvalidLength {
                raw: trimmed.to_string(),
                length: chars.len(),
            });
        }

        let mut poles = [Pole::First; 4];
        for (position, (axis, found)) in Axis::ALL.iter().zip(chars).enumerate() {
            let letter =
                Letter::from_char(found).ok_or(CodeParseError::UnknownLetter { position, found })?;
            if letter.axis() != *axis {
                return Err(CodeParseError::WrongAxis {
                    position,
                    letter,
                    expected: *axis,
                });
            }
            poles[position] = letter.pole();
        }

        Ok(Self { poles })
    }
}

impl fmt::Display for InvestorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for InvestorCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for InvestorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InvestorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeParseError {
    #[error("investor code '{raw}' must have 4 letters, found {length}")]
    InvalidLength { raw: String, length: usize },
    #[error("'{found}' at position {position} is not an investor code letter")]
    UnknownLetter { position: usize, found: char },
    #[error("letter {letter} at position {position} does not belong to the {expected} axis")]
    WrongAxis {
        position: usize,
        letter: Letter,
        expected: Axis,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_display() {
        let rendered: Vec<String> = InvestorCode::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "RATD", "RATV", "RALD", "RALV", "RCTD", "RCTV", "RCLD", "RCLV", "SATD", "SATV",
                "SALD", "SALV", "SCTD", "SCTV", "SCLD", "SCLV",
            ]
        );
        let mut sorted = InvestorCode::ALL;
        sorted.sort();
        assert_eq!(sorted, InvestorCode::ALL);
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(InvestorCode::parse(" salv ").unwrap(), InvestorCode::SALV);
        assert_eq!("RcTd".parse::<InvestorCode>().unwrap(), InvestorCode::RCTD);
    }

    #[test]
    fn parse_rejects_letters_on_the_wrong_axis() {
        match InvestorCode::parse("ARTD") {
            Err(CodeParseError::WrongAxis {
                position: 0,
                letter: Letter::A,
                expected: Axis::Risk,
            }) => {}
            other => panic!("expected wrong axis error, got {other:?}"),
        }
        assert!(matches!(
            InvestorCode::parse("RATX"),
            Err(CodeParseError::UnknownLetter {
                position: 3,
                found: 'X'
            })
        ));
        assert!(matches!(
            InvestorCode::parse("RAT"),
            Err(CodeParseError::InvalidLength { length: 3, .. })
        ));
    }

    #[test]
    fn serializes_as_uppercase_string() {
        let json = serde_json::to_string(&InvestorCode::SCLD).expect("serialize");
        assert_eq!(json, "\"SCLD\"");
        let parsed: InvestorCode = serde_json::from_str("\"scld\"").expect("deserialize");
        assert_eq!(parsed, InvestorCode::SCLD);
    }

    #[test]
    fn letters_follow_axis_order() {
        assert_eq!(
            InvestorCode::SALD.letters(),
            [Letter::S, Letter::A, Letter::L, Letter::D]
        );
        let meanings = InvestorCode::RCTV.letter_meanings();
        assert_eq!(meanings[1].letter, Letter::C);
        assert_eq!(meanings[3].axis, Axis::Judge);
    }
}
