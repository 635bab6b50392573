use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::answers::{AnswerSet, AnswerValue};
use super::questions::{QuestionCatalog, QuestionId};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownQuestion {
        respondent: String,
        question: QuestionId,
        row: usize,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read answer sheet: {}", err),
            ImportError::Csv(err) => write!(f, "invalid answer sheet CSV: {}", err),
            ImportError::UnknownQuestion {
                respondent,
                question,
                row,
            } => write!(
                f,
                "row {} answers unknown question {} for respondent {}",
                row, question, respondent
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::UnknownQuestion { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Answers collected for one respondent in an answer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentAnswers {
    pub respondent: String,
    pub answers: AnswerSet,
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    respondent: String,
    question_id: u32,
    value: i64,
}

/// Reads long-format `respondent,question_id,value` answer sheets.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RespondentAnswers>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RespondentAnswers>, ImportError> {
        Self::from_reader_with(reader, &QuestionCatalog::standard())
    }

    /// Respondents come back in first-seen order; a repeated row overwrites the earlier value.
    pub fn from_reader_with<R: Read>(
        reader: R,
        catalog: &QuestionCatalog<'_>,
    ) -> Result<Vec<RespondentAnswers>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut sheets: Vec<RespondentAnswers> = Vec::new();

        for (index, record) in csv_reader.deserialize::<AnswerRow>().enumerate() {
            let row = record?;
            let question = QuestionId(row.question_id);
            if catalog.get(question).is_none() {
                return Err(ImportError::UnknownQuestion {
                    respondent: row.respondent,
                    question,
                    // header is line 1
                    row: index + 2,
                });
            }

            let value = AnswerValue::clamped(row.value);
            match sheets
                .iter_mut()
                .find(|sheet| sheet.respondent == row.respondent)
            {
                Some(sheet) => {
                    sheet.answers.insert(question, value);
                }
                None => {
                    let mut answers = AnswerSet::new();
                    answers.insert(question, value);
                    sheets.push(RespondentAnswers {
                        respondent: row.respondent,
                        answers,
                    });
                }
            }
        }

        debug!(respondents = sheets.len(), "answer sheet imported");
        Ok(sheets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_respondent_in_first_seen_order() {
        let csv = "respondent,question_id,value\n\
                   bob, 1, 5\n\
                   alice,1,2\n\
                   bob,2,1\n";
        let sheets = AnswerSheetImporter::from_reader(csv.as_bytes()).expect("sheet parses");

        let names: Vec<&str> = sheets.iter().map(|s| s.respondent.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert_eq!(sheets[0].answers.len(), 2);
        assert_eq!(
            sheets[0].answers.get(QuestionId(2)).map(AnswerValue::get),
            Some(1)
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let csv = "respondent,question_id,value\ncarol,3,9\ncarol,4,-2\n";
        let sheets = AnswerSheetImporter::from_reader(csv.as_bytes()).expect("sheet parses");

        let answers = &sheets[0].answers;
        assert_eq!(answers.get(QuestionId(3)).map(AnswerValue::get), Some(5));
        assert_eq!(answers.get(QuestionId(4)).map(AnswerValue::get), Some(1));
    }

    #[test]
    fn unknown_question_reports_row() {
        let csv = "respondent,question_id,value\ndave,1,4\ndave,17,4\n";
        let err = AnswerSheetImporter::from_reader(csv.as_bytes()).expect_err("17 is unknown");

        match err {
            ImportError::UnknownQuestion { question, row, .. } => {
                assert_eq!(question, QuestionId(17));
                assert_eq!(row, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_value_is_a_csv_error() {
        let csv = "respondent,question_id,value\nerin,1,agree\n";
        let err = AnswerSheetImporter::from_reader(csv.as_bytes()).expect_err("value invalid");
        assert!(matches!(err, ImportError::Csv(_)));
        assert!(err.to_string().starts_with("invalid answer sheet CSV:"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unknown_question_has_no_source() {
        let err = ImportError::UnknownQuestion {
            respondent: "finn".to_string(),
            question: QuestionId(20),
            row: 4,
        };
        assert_eq!(
            err.to_string(),
            "row 4 answers unknown question 20 for respondent finn"
        );
        assert!(std::error::Error::source(&err).is_none());
    }
}
