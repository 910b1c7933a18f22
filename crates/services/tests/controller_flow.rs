mod common;

use flashdeck_core::model::{CardDraft, DeckError};
use flashdeck_core::session::{ReviewStep, SessionError, SessionPhase};
use services::{ControllerError, ModelError, Screen};

use common::{CAPITALS_JSON, ScriptedModel, app};

#[tokio::test]
async fn capitals_study_and_review() {
    let mut controller = app(ScriptedModel::replying(CAPITALS_JSON), 3).controller();
    controller.select_topic("Capitals").await.unwrap();
    assert_eq!(controller.topic(), Some("Capitals"));

    assert_eq!(controller.report_unknown().unwrap(), SessionPhase::Active);
    controller.report_known().unwrap();
    assert_eq!(
        controller.report_known().unwrap(),
        SessionPhase::AwaitingReview
    );

    let session = controller.session().unwrap();
    assert_eq!(session.known_count(), 2);
    assert_eq!(session.unknown_count(), 1);
    assert_eq!(session.missed()[0].question(), "Capital of France?");

    controller.enter_review().unwrap();
    let review = controller.session().unwrap().review_progress().unwrap();
    assert_eq!((review.cursor, review.total), (0, 1));
    assert!(!review.has_prev && !review.has_next);

    assert_eq!(controller.review_prev().unwrap(), 0);
    assert_eq!(controller.review_next().unwrap(), ReviewStep::Finished);
    assert_eq!(
        controller.session().unwrap().phase(),
        SessionPhase::ReviewFinished
    );
}

#[tokio::test]
async fn network_failure_lands_on_failure_screen_then_retry_recovers() {
    let model = ScriptedModel::new(vec![
        Err(ModelError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
        Ok(CAPITALS_JSON.to_owned()),
    ]);
    let mut controller = app(model, 3).controller();

    let screen = controller.select_topic("Capitals").await.unwrap();
    let Screen::GenerationFailed { topic, message } = screen else {
        panic!("expected failure screen, got {screen:?}");
    };
    assert_eq!(topic, "Capitals");
    assert!(message.contains("Capitals"));
    assert!(controller.session().is_none());

    controller.retry_generation().await.unwrap();
    assert_eq!(controller.session().unwrap().deck().len(), 3);
}

#[tokio::test]
async fn retry_replaces_deck_and_clears_progress() {
    let model = ScriptedModel::new(vec![Ok(CAPITALS_JSON.to_owned()), Ok("nonsense".into())]);
    let mut controller = app(model.clone(), 3).controller();
    controller.select_topic("Capitals").await.unwrap();
    controller.report_unknown().unwrap();

    controller.retry_generation().await.unwrap();
    let session = controller.session().unwrap();
    assert_eq!(session.position(), 0);
    assert_eq!(session.unknown_count(), 0);
    assert!(session.missed().is_empty());
    assert_eq!(session.deck().cards()[0].question(), "Question 1 about Capitals?");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn blank_topic_is_rejected_in_place() {
    let model = ScriptedModel::replying(CAPITALS_JSON);
    let mut controller = app(model.clone(), 3).controller();
    let err = controller.select_topic("   ").await.unwrap_err();
    assert!(matches!(err, ControllerError::Deck(DeckError::EmptyTopic)));
    assert_eq!(controller.screen(), &Screen::TopicSelection);
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn custom_deck_flow() {
    let mut controller = app(ScriptedModel::new(Vec::new()), 3).controller();
    controller.open_custom_cards().unwrap();

    let err = controller.start_custom_study().unwrap_err();
    assert!(matches!(err, ControllerError::Session(SessionError::Empty)));
    assert_eq!(controller.screen(), &Screen::CustomCards);

    let err = controller
        .add_custom_card(CardDraft::new("", "answer"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Question cannot be empty");
    assert!(controller.custom_cards().is_empty());

    let first = controller
        .add_custom_card(CardDraft::new("2 + 2?", "4"))
        .unwrap();
    controller
        .add_custom_card(CardDraft::new("Capital of Italy?", "Rome"))
        .unwrap();

    let session = controller.start_custom_study().unwrap();
    assert_eq!(session.deck().len(), 2);
    controller.report_known().unwrap();
    controller.report_known().unwrap();
    assert_eq!(
        controller.session().unwrap().phase(),
        SessionPhase::Completed
    );

    // Custom decks are never regenerated.
    assert!(matches!(
        controller.retry_generation().await.unwrap_err(),
        ControllerError::InvalidTransition { .. }
    ));

    controller.back_to_custom_cards().unwrap();
    assert!(controller.delete_custom_card(&first).unwrap());
    assert!(!controller.delete_custom_card(&first).unwrap());
    assert_eq!(controller.custom_cards().len(), 1);

    // The collection survives a reset.
    controller.reset();
    controller.open_custom_cards().unwrap();
    assert_eq!(controller.custom_cards().len(), 1);
}

#[tokio::test]
async fn transitions_without_a_session_are_rejected() {
    let mut controller = app(ScriptedModel::new(Vec::new()), 3).controller();
    assert!(matches!(
        controller.report_known().unwrap_err(),
        ControllerError::InvalidTransition {
            action: "answering",
            screen: "topic selection"
        }
    ));
    assert!(controller.retry_generation().await.is_err());
    assert!(controller.back_to_custom_cards().is_err());
    assert!(
        controller
            .add_custom_card(CardDraft::new("Q", "A"))
            .is_err()
    );
}

#[tokio::test]
async fn reset_discards_the_session() {
    let mut controller = app(ScriptedModel::replying(CAPITALS_JSON), 3).controller();
    controller.select_topic("Capitals").await.unwrap();
    controller.report_known().unwrap();
    controller.reset();
    assert_eq!(controller.screen(), &Screen::TopicSelection);
    assert!(controller.topic().is_none());
    assert!(controller.session().is_none());
}

#[tokio::test]
async fn new_cards_only_after_the_deck_is_finished() {
    let model = ScriptedModel::new(vec![
        Ok(CAPITALS_JSON.to_owned()),
        Ok(CAPITALS_JSON.to_owned()),
    ]);
    let mut controller = app(model.clone(), 3).controller();
    controller.select_topic("Capitals").await.unwrap();

    assert!(matches!(
        controller.generate_new_cards().await.unwrap_err(),
        ControllerError::InvalidTransition {
            action: "generating new cards",
            ..
        }
    ));

    for _ in 0..3 {
        controller.report_known().unwrap();
    }
    controller.generate_new_cards().await.unwrap();
    let session = controller.session().unwrap();
    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.known_count(), 0);
    assert_eq!(model.prompts().len(), 2);
}
