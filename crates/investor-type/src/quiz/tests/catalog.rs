use crate::quiz::{
    code_letter_meanings, lookup_type, CatalogError, InvestorCode, QuestionCatalog, TypeCatalog,
};

#[test]
fn standard_catalogs_validate() {
    QuestionCatalog::standard()
        .validate()
        .expect("questions are consistent");
    TypeCatalog::standard().validate().expect("types are consistent");
    assert_eq!(QuestionCatalog::standard().len(), 16);
    assert_eq!(TypeCatalog::standard().len(), 16);
}

#[test]
fn lookup_round_trips_every_code() {
    for code in InvestorCode::ALL {
        let record = lookup_type(&code.to_string()).expect("record present");
        assert_eq!(record.code, code);
        assert!(!record.name.is_empty());
        assert!(!record.description.is_empty());
    }
}

#[test]
fn lookup_ignores_case() {
    assert_eq!(lookup_type("ratd"), lookup_type("RATD"));
    assert_eq!(lookup_type(" sCLv "), lookup_type("SCLV"));
}

#[test]
fn lookup_rejects_unknown_codes() {
    assert!(lookup_type("XXXX").is_none());
    assert!(lookup_type("RAT").is_none());
    assert!(lookup_type("ARTD").is_none());
    assert!(lookup_type("").is_none());
}

#[test]
fn match_lists_reference_known_codes() {
    let catalog = TypeCatalog::standard();
    for record in catalog.records() {
        for code in record.referenced_codes() {
            assert!(catalog.contains(code), "{} links to {}", record.code, code);
        }
    }
}

#[test]
fn reduced_catalog_reports_missing_type() {
    let records = [*lookup_type("RATD").expect("RATD present")];
    let err = TypeCatalog::new(&records)
        .validate()
        .expect_err("15 types missing");
    assert!(matches!(
        err,
        CatalogError::MissingType(_) | CatalogError::DanglingMatch { .. }
    ));
}

#[test]
fn duplicate_records_are_rejected() {
    let record = *lookup_type("RATD").expect("RATD present");
    let err = TypeCatalog::new(&[record, record])
        .validate()
        .expect_err("duplicate");
    assert_eq!(err, CatalogError::DuplicateType(InvestorCode::RATD));
}

#[test]
fn letter_meanings_follow_code_order() {
    let meanings = code_letter_meanings(InvestorCode::SCLD);
    let letters: String = meanings.iter().map(|m| m.letter.as_char()).collect();
    assert_eq!(letters, "SCLD");
    assert_eq!(meanings[3].name, "Data");
    assert_eq!(meanings[0].axis_label, meanings[0].axis.label());
}
