use super::common::*;
use std::sync::Arc;

use crate::quiz::{
    AnswerStore, AnswerValue, InvestorCode, QuestionId, QuizService, QuizServiceError, SessionId,
};

fn value(raw: u8) -> AnswerValue {
    AnswerValue::new(raw).expect("valid answer")
}

#[test]
fn start_issues_sequential_session_ids() {
    let (service, store) = build_service();

    let first = service.start(None, false).expect("session starts");
    let second = service.start(None, false).expect("session starts");

    assert!(first.session_id.0.starts_with("quiz-"));
    assert_eq!(first.session_id.0.len(), "quiz-000000".len());
    assert_ne!(first.session_id, second.session_id);
    assert_eq!(first.answered, 0);
    assert_eq!(first.total, 16);
    assert!(!first.complete);
    let next = first.next_question.expect("first question offered");
    assert_eq!(next.id, QuestionId(1));
    assert_eq!(next.number, 1);
    assert!(store
        .load(&first.session_id)
        .expect("store readable")
        .is_some());
}

#[test]
fn answering_advances_progress() {
    let (service, _) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;

    let progress = service
        .answer(&session, QuestionId(1), value(5))
        .expect("answer recorded");

    assert_eq!(progress.answered, 1);
    assert_eq!(progress.percent, 6);
    assert_eq!(
        progress.next_question.map(|question| question.id),
        Some(QuestionId(2))
    );
    assert_eq!(
        progress.answers.get(QuestionId(1)).map(AnswerValue::get),
        Some(5)
    );
}

#[test]
fn changing_an_answer_replaces_it() {
    let (service, _) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;

    service
        .answer(&session, QuestionId(4), value(1))
        .expect("answer recorded");
    let progress = service
        .answer(&session, QuestionId(4), value(4))
        .expect("answer replaced");

    assert_eq!(progress.answered, 1);
    assert_eq!(
        progress.answers.get(QuestionId(4)).map(AnswerValue::get),
        Some(4)
    );
    // earlier questions are still unanswered
    assert_eq!(
        progress.next_question.map(|question| question.id),
        Some(QuestionId(1))
    );
}

#[test]
fn concurrent_answers_on_one_session_are_all_kept() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let session = service.start(None, false).expect("session starts").session_id;

    let handles: Vec<_> = (1..=16)
        .map(|id| {
            let service = Arc::clone(&service);
            let session = session.clone();
            std::thread::spawn(move || {
                service
                    .answer(&session, QuestionId(id), value(5))
                    .expect("answer recorded");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread finished");
    }

    let progress = service.progress(&session).expect("progress readable");
    assert_eq!(progress.answered, 16);
    assert!(progress.complete);
}

#[test]
fn answering_an_unknown_session_is_not_found() {
    let (service, _) = build_service();
    let err = service
        .answer(&SessionId::from("quiz-888888"), QuestionId(1), value(3))
        .expect_err("session never started");
    assert!(matches!(err, QuizServiceError::SessionNotFound(_)));
}

#[test]
fn unknown_question_is_rejected() {
    let (service, _) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;

    let err = service
        .answer(&session, QuestionId(17), value(3))
        .expect_err("question 17 does not exist");
    assert!(matches!(err, QuizServiceError::UnknownQuestion(QuestionId(17))));
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _) = build_service();
    let err = service
        .progress(&SessionId::from("quiz-999999"))
        .expect_err("session never started");
    assert!(matches!(err, QuizServiceError::SessionNotFound(_)));
}

#[test]
fn resume_keeps_answers_and_reset_discards_them() {
    let (service, _) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;
    service
        .answer(&session, QuestionId(1), value(2))
        .expect("answer recorded");

    let resumed = service
        .start(Some(session.clone()), false)
        .expect("session resumes");
    assert_eq!(resumed.session_id, session);
    assert_eq!(resumed.answered, 1);

    let reset = service
        .start(Some(session.clone()), true)
        .expect("session resets");
    assert_eq!(reset.answered, 0);
    assert_eq!(reset.percent, 0);
}

#[test]
fn completing_early_lists_missing_questions() {
    let (service, _) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;
    service
        .answer(&session, QuestionId(1), value(5))
        .expect("answer recorded");

    match service.complete(&session) {
        Err(QuizServiceError::Incomplete { missing }) => {
            assert_eq!(missing.len(), 15);
            assert_eq!(missing.first(), Some(&QuestionId(2)));
        }
        other => panic!("unexpected completion result: {other:?}"),
    }
    assert!(service.progress(&session).is_ok());
}

#[test]
fn completing_scores_and_clears_the_session() {
    let (service, store) = build_service();
    let session = service.start(None, false).expect("session starts").session_id;

    for (question, answer) in first_letter_answers().iter() {
        service
            .answer(&session, question, answer)
            .expect("answer recorded");
    }
    let progress = service.progress(&session).expect("progress readable");
    assert!(progress.complete);
    assert_eq!(progress.percent, 100);
    assert!(progress.next_question.is_none());

    let outcome = service.complete(&session).expect("quiz completes");
    assert_eq!(outcome.code, InvestorCode::RATD);
    assert_eq!(outcome.record.code, InvestorCode::RATD);
    assert!(store.load(&session).expect("store readable").is_none());

    let view = service.result_view(outcome.record);
    assert_eq!(view.share.url, format!("{PUBLIC_URL}/result/RATD"));
}

#[test]
fn store_failures_surface_as_store_errors() {
    let service = QuizService::new(Arc::new(UnavailableStore), PUBLIC_URL);
    let err = service.start(None, false).expect_err("store offline");
    assert!(matches!(err, QuizServiceError::Store(_)));
}
