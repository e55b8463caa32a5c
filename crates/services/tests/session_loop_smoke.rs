use std::sync::Arc;

use services::{AddOutcome, DeckService, Recall, StudyResponse};
use storage::repository::DeckRepository;
use storage::text_file::TextFileRepository;

#[test]
fn study_session_persists_progress_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("decks").join("flashcards.csv");
    let repo = Arc::new(TextFileRepository::new(&path));

    let mut service = DeckService::with_seed(repo.clone(), Some(42));
    let report = service.load().expect("load");
    assert!(report.missing);

    for id in 1..=3 {
        let outcome = service
            .add_card(format!("Q{id}"), format!("A{id}"))
            .expect("add");
        assert_eq!(outcome, AddOutcome::Added);
    }
    assert!(path.exists());

    let mut session = service.start_study().expect("start");
    while let Some(card) = service.next_study_card(&mut session) {
        let StudyResponse::Answered(recall) = StudyResponse::parse("y") else {
            unreachable!("fixed reply");
        };
        assert_eq!(recall, Recall::Correct);
        service.answer(&mut session, &card.key(), recall).expect("answer");
    }
    let summary = service.finish_study(session).expect("finish");
    assert_eq!(summary.shown, 3);
    assert_eq!(summary.correct, 3);

    let reloaded = repo.load().expect("reload");
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.iter().all(|c| c.leitner_box().value() == 2));
}

#[test]
fn unreadable_store_leaves_service_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory cannot be read as a deck file.
    let repo = Arc::new(TextFileRepository::new(dir.path()));

    let mut service = DeckService::with_seed(repo, Some(1));
    assert!(service.load().is_err());
    assert!(service.deck().is_empty());
}
