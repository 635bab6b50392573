use investor_type::quiz::{
    compute_code, AnswerSheetImporter, ImportError, InvestorCode, QuestionCatalog, QuestionId,
};

#[test]
fn imported_sheet_scores_each_respondent() {
    let data = include_bytes!("fixtures/answer_sheet.csv");
    let sheets = AnswerSheetImporter::from_reader(&data[..]).expect("sheet imports");

    let codes: Vec<(&str, InvestorCode)> = sheets
        .iter()
        .map(|sheet| (sheet.respondent.as_str(), compute_code(&sheet.answers)))
        .collect();

    // yui: S from q1/q4, C from q8, L from q10, D by tie
    assert_eq!(
        codes,
        vec![
            ("aki", InvestorCode::RATD),
            ("ren", InvestorCode::SALV),
            ("yui", InvestorCode::SCLD),
        ]
    );
}

#[test]
fn partial_respondents_report_missing_questions() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/answer_sheet.csv");
    let sheets = AnswerSheetImporter::from_path(path).expect("sheet imports");

    let catalog = QuestionCatalog::standard();
    let yui = sheets
        .iter()
        .find(|sheet| sheet.respondent == "yui")
        .expect("yui present");
    assert!(!yui.answers.is_complete(&catalog));
    assert_eq!(yui.answers.answered_in(&catalog), 5);
    assert_eq!(yui.answers.get(QuestionId(8)).map(|v| v.get()), Some(5));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AnswerSheetImporter::from_path("does/not/exist.csv").expect_err("no such file");
    assert!(matches!(err, ImportError::Io(_)));
}
