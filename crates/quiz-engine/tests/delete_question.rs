use pretty_assertions::assert_eq;
use quiz_engine::{
    DeletionSummary, EngineConfig, QuestionFilter, QuestionId, QuestionRecord, QuestionService,
    QuestionType, QuizError, QuizId, RequestContext,
};
use quiz_test_utils::{fixtures, init_tracing, FakeFiles, MemoryRepository};
use std::sync::Arc;

const STORED_MATCHING: &str = r#"{"opts1":[{"optId":0,"txt":"a","imId":"L0","imUrl":"http://x/L0"},{"optId":1,"txt":"b","imId":"L1","imUrl":"http://x/L1"},{"optId":2,"txt":"c"}],"opts2":[{"optId":0,"txt":"d"},{"optId":1,"txt":"e","imId":"R1","imUrl":"http://x/R1"},{"optId":2,"txt":"f"}]}"#;

fn service(repository: &Arc<MemoryRepository>, files: &Arc<FakeFiles>) -> QuestionService {
    init_tracing();
    QuestionService::new(&EngineConfig::default(), repository.clone(), files.clone())
}

fn seed(repository: &MemoryRepository, quiz_id: QuizId, question_type: QuestionType, json: &str) -> QuestionId {
    let id = QuestionId::new();
    repository.seed_question(QuestionRecord {
        id,
        quiz_id,
        question_type,
        text: "Seeded".to_string(),
        options_json: json.to_string(),
        position: 0,
    });
    id
}

#[tokio::test]
async fn test_matching_teardown_deletes_each_image_once() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    for id in ["L0", "L1", "R1"] {
        files.seed_image(id);
    }
    let quiz_id = QuizId::new();
    let question_id = seed(&repository, quiz_id, QuestionType::Matching, STORED_MATCHING);

    let summary = service(&repository, &files)
        .delete_question(&RequestContext::new(), quiz_id, question_id)
        .await
        .unwrap();

    assert_eq!(summary, DeletionSummary { questions: 1, images: 3 });
    assert_eq!(files.deletes(), vec!["L0", "L1", "R1"]);
    assert!(files.stored().is_empty());
    assert_eq!(repository.question(question_id), None);
}

#[tokio::test]
async fn test_failed_image_delete_keeps_record() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new().with_delete_failure("L1"));
    for id in ["L0", "L1", "R1"] {
        files.seed_image(id);
    }
    let quiz_id = QuizId::new();
    let question_id = seed(&repository, quiz_id, QuestionType::Matching, STORED_MATCHING);

    let err = service(&repository, &files)
        .delete_question(&RequestContext::new(), quiz_id, question_id)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::DeletionFailed(_)));
    assert!(err.is_retryable());
    // Stops at the failing image
    assert_eq!(files.deletes(), vec!["L0", "L1"]);
    assert_eq!(files.stored(), vec!["L1", "R1"]);
    assert!(repository.question(question_id).is_some());
}

#[tokio::test]
async fn test_undecodable_document_is_deletion_failure() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    let quiz_id = QuizId::new();
    let question_id = seed(&repository, quiz_id, QuestionType::DragAndDrop, r#"{"boxes":"#);

    let err = service(&repository, &files)
        .delete_question(&RequestContext::new(), quiz_id, question_id)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::DeletionFailed(_)));
    assert!(files.deletes().is_empty());
    assert!(repository.question(question_id).is_some());
}

#[tokio::test]
async fn test_question_of_other_quiz_is_not_found() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    let question_id = seed(&repository, QuizId::new(), QuestionType::Slider, "{}");

    let err = service(&repository, &files)
        .delete_question(&RequestContext::new(), QuizId::new(), question_id)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::QuestionNotFound(id) if id == question_id));
    assert_eq!(repository.question_count(), 1);
}

#[tokio::test]
async fn test_create_then_delete_leaves_no_images() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    let quiz_id = repository.add_quiz();
    let service = service(&repository, &files);
    let ctx = RequestContext::new();

    let record = service
        .create_question(&ctx, quiz_id, fixtures::drag_and_drop(), fixtures::attachments(&["box", "owl"]))
        .await
        .unwrap();
    assert_eq!(files.stored(), vec!["img-box", "img-owl"]);
    assert_eq!(
        service.question_images(quiz_id, record.id).await.unwrap(),
        vec!["img-box", "img-owl"]
    );

    let summary = service.delete_question(&ctx, quiz_id, record.id).await.unwrap();
    assert_eq!(summary.images, 2);
    assert!(files.stored().is_empty());
    assert_eq!(repository.question_count(), 0);
}

#[tokio::test]
async fn test_delete_by_quiz_removes_every_question() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    let quiz_id = repository.add_quiz();
    let other_quiz = repository.add_quiz();
    let service = service(&repository, &files);
    let ctx = RequestContext::new();

    service
        .create_question(&ctx, quiz_id, fixtures::ordering(), fixtures::attachments(&["imgA"]))
        .await
        .unwrap();
    service
        .create_question(&ctx, quiz_id, fixtures::matching(), fixtures::attachments(&["fr", "jp", "sun"]))
        .await
        .unwrap();
    service
        .create_question(&ctx, quiz_id, fixtures::open(), fixtures::attachments(&[]))
        .await
        .unwrap();
    let kept = service
        .create_question(&ctx, other_quiz, fixtures::multiple_choice(), fixtures::attachments(&["mars"]))
        .await
        .unwrap();

    let summary = service
        .delete_questions(&ctx, QuestionFilter::quiz(quiz_id))
        .await
        .unwrap();

    assert_eq!(summary, DeletionSummary { questions: 3, images: 4 });
    assert_eq!(files.stored(), vec!["img-mars"]);
    assert_eq!(repository.question_count(), 1);
    assert!(repository.question(kept.id).is_some());
}

#[tokio::test]
async fn test_bulk_delete_stops_at_failing_record() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new().with_delete_failure("img-jp"));
    let quiz_id = repository.add_quiz();
    let service = service(&repository, &files);
    let ctx = RequestContext::new();

    let first = service
        .create_question(&ctx, quiz_id, fixtures::ordering(), fixtures::attachments(&["imgA"]))
        .await
        .unwrap();
    let second = service
        .create_question(&ctx, quiz_id, fixtures::matching(), fixtures::attachments(&["fr", "jp", "sun"]))
        .await
        .unwrap();
    let third = service
        .create_question(&ctx, quiz_id, fixtures::open(), fixtures::attachments(&[]))
        .await
        .unwrap();

    let err = service
        .delete_questions(&ctx, QuestionFilter::quiz(quiz_id))
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::DeletionFailed(_)));
    assert!(repository.question(first.id).is_none());
    assert!(repository.question(second.id).is_some());
    assert!(repository.question(third.id).is_some());
}

#[tokio::test]
async fn test_unmatched_filter_is_a_noop() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());

    let summary = service(&repository, &files)
        .delete_questions(&RequestContext::new(), QuestionFilter::quiz(QuizId::new()))
        .await
        .unwrap();

    assert_eq!(summary, DeletionSummary::default());
}

#[tokio::test]
async fn test_retry_after_partial_teardown_completes() {
    let repository = Arc::new(MemoryRepository::new());
    let quiz_id = QuizId::new();
    let question_id = seed(&repository, quiz_id, QuestionType::Matching, STORED_MATCHING);

    let flaky = Arc::new(FakeFiles::new().with_delete_failure("L1"));
    for id in ["L0", "L1", "R1"] {
        flaky.seed_image(id);
    }
    let err = service(&repository, &flaky)
        .delete_question(&RequestContext::new(), quiz_id, question_id)
        .await
        .unwrap_err();
    assert!(matches!(err, QuizError::DeletionFailed(_)));
    assert_eq!(flaky.stored(), vec!["L1", "R1"]);

    // Same storage, now healthy: L0 is already gone
    let healthy = Arc::new(FakeFiles::new());
    for id in flaky.stored() {
        healthy.seed_image(&id);
    }
    let summary = service(&repository, &healthy)
        .delete_question(&RequestContext::new(), quiz_id, question_id)
        .await
        .unwrap();

    assert_eq!(summary, DeletionSummary { questions: 1, images: 2 });
    assert_eq!(healthy.deletes(), vec!["L0", "L1", "R1"]);
    assert!(healthy.stored().is_empty());
    assert_eq!(repository.question(question_id), None);
}

#[tokio::test]
async fn test_image_free_records_delete_without_decoding() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    let quiz_id = QuizId::new();
    let open = seed(&repository, quiz_id, QuestionType::Open, "{}");
    let slider = seed(&repository, quiz_id, QuestionType::Slider, "garbage");
    let service = service(&repository, &files);
    let ctx = RequestContext::new();

    for question_id in [open, slider] {
        let summary = service.delete_question(&ctx, quiz_id, question_id).await.unwrap();
        assert_eq!(summary, DeletionSummary { questions: 1, images: 0 });
    }
    assert!(files.deletes().is_empty());
    assert_eq!(repository.question_count(), 0);
}

#[tokio::test]
async fn test_empty_filter_deletes_nothing() {
    let repository = Arc::new(MemoryRepository::new());
    let files = Arc::new(FakeFiles::new());
    seed(&repository, QuizId::new(), QuestionType::TrueFalse, "{}");
    seed(&repository, QuizId::new(), QuestionType::Slider, "{}");

    let err = service(&repository, &files)
        .delete_questions(&RequestContext::new(), QuestionFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(err, QuizError::EmptyFilter));
    assert_eq!(repository.question_count(), 2);
    assert_eq!(repository.calls(), 0);
}
