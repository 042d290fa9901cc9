use std::sync::Mutex;

use async_trait::async_trait;
use quizcards_core::model::{Face, SavePolicy};
use quizcards_core::page::CsrfToken;
use quizcards_core::wire::{DeckLoadPayload, DeckSavePayload};
use services::{DeckEditor, DeckSubmission, EditorError, FormSubmitter, SubmitError, SubmitReceipt};
use url::Url;

#[derive(Default)]
struct RecordingSubmitter {
    sent: Mutex<Vec<(DeckSubmission, Option<String>)>>,
}

struct RejectingSubmitter;

#[async_trait]
impl FormSubmitter for RejectingSubmitter {
    async fn submit(
        &self,
        _submission: &DeckSubmission,
        _csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, SubmitError> {
        Err(SubmitError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY))
    }
}

#[async_trait]
impl FormSubmitter for RecordingSubmitter {
    async fn submit(
        &self,
        submission: &DeckSubmission,
        csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, SubmitError> {
        self.sent
            .lock()
            .unwrap()
            .push((submission.clone(), csrf.map(|t| t.as_str().to_string())));
        Ok(SubmitReceipt {
            landed_on: Url::parse("http://localhost:8000/user/").unwrap(),
        })
    }
}

fn media_root() -> Url {
    Url::parse("http://localhost:8000/media/").unwrap()
}

#[tokio::test]
async fn new_deck_is_created_with_two_cards() {
    let mut editor = DeckEditor::new_deck(SavePolicy::default(), media_root());
    editor.set_name("Capitals");
    let first = editor.cards()[0].key();
    editor.set_text(first, Face::Term, "France").unwrap();
    editor.set_text(first, Face::Definition, "Paris").unwrap();
    assert!(!editor.can_save(), "one card is below the minimum");

    let second = editor.add_card();
    editor.set_text(second, Face::Term, "Italy").unwrap();
    editor.set_text(second, Face::Definition, "Rome").unwrap();
    assert!(editor.can_save());

    let submitter = RecordingSubmitter::default();
    let token = CsrfToken::new("abc");
    let receipt = editor.save(&submitter, token.as_ref()).await.unwrap();
    assert_eq!(receipt.landed_on.path(), "/user/");
    assert!(!editor.warn_on_leave());

    let sent = submitter.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (submission, csrf) = &sent[0];
    assert_eq!(csrf.as_deref(), Some("abc"));
    assert!(submission.uploads.is_empty());

    let json: serde_json::Value = serde_json::from_str(&submission.deck_json).unwrap();
    assert_eq!(json["name"], "Capitals");
    assert_eq!(json["uuid"], "");
    assert_eq!(json["cards"].as_array().unwrap().len(), 2);
    assert!(json["cards"][0].get("pk").is_none());
    assert_eq!(json["cards"][1]["term"], "Italy");
}

#[tokio::test]
async fn blocked_save_sends_nothing() {
    let mut editor = DeckEditor::new_deck(SavePolicy::default(), media_root());
    editor.add_card();
    let submitter = RecordingSubmitter::default();

    let err = editor.save(&submitter, None).await.unwrap_err();
    assert!(matches!(err, EditorError::CannotSave(_)));
    assert!(editor.warn_on_leave());
    assert!(submitter.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn loaded_deck_keeps_pks_through_reorder_and_save() {
    let deck = r#"[{"model": "main.deck", "pk": 4, "fields": {
        "name": "Capitals", "description": "",
        "uuid": "6f1c2a7e-0c1e-4a53-9c43-2f0f6a4b2d11"}}]"#;
    let cards = r#"[
        {"model": "main.card", "pk": 10, "fields": {"term": "France", "term_image": "", "definition": "Paris", "definition_image": "uploads/paris.png"}},
        {"model": "main.card", "pk": 11, "fields": {"term": "Italy", "term_image": null, "definition": "Rome", "definition_image": ""}}
    ]"#;
    let payload = DeckLoadPayload::from_parts(deck, cards).unwrap();
    let mut editor = DeckEditor::load(payload, SavePolicy::default(), media_root());
    assert!(editor.is_update());

    let italy = editor.cards()[1].key();
    editor.move_card(italy, 0).unwrap();
    let added = editor.add_card();
    editor.set_text(added, Face::Term, "Spain").unwrap();
    editor.set_text(added, Face::Definition, "Madrid").unwrap();

    let submitter = RecordingSubmitter::default();
    editor.save(&submitter, None).await.unwrap();

    let sent = submitter.sent.lock().unwrap();
    let saved = DeckSavePayload::from_json(&sent[0].0.deck_json).unwrap();
    assert!(saved.is_update());
    let summary: Vec<_> = saved
        .cards
        .iter()
        .map(|card| (card.term.as_str(), card.pk))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Italy", Some(Some(quizcards_core::model::CardPk::new(11)))),
            ("France", Some(Some(quizcards_core::model::CardPk::new(10)))),
            ("Spain", Some(None)),
        ]
    );
    assert_eq!(saved.cards[1].definition_image, "paris.png");
}

fn two_card_deck() -> DeckEditor {
    let mut editor = DeckEditor::new_deck(SavePolicy::default(), media_root());
    editor.set_name("Capitals");
    let first = editor.cards()[0].key();
    editor.set_text(first, Face::Term, "France").unwrap();
    let second = editor.add_card();
    editor.set_text(second, Face::Term, "Italy").unwrap();
    editor
}

#[tokio::test]
async fn saved_deck_is_never_created_twice() {
    let mut editor = two_card_deck();
    let submitter = RecordingSubmitter::default();

    editor.save(&submitter, None).await.unwrap();
    assert!(editor.is_saved());
    assert!(!editor.can_save());

    let err = editor.save(&submitter, None).await.unwrap_err();
    assert!(matches!(err, EditorError::AlreadySaved));
    assert_eq!(submitter.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_submission_keeps_the_draft_savable() {
    let mut editor = two_card_deck();

    let err = editor.save(&RejectingSubmitter, None).await.unwrap_err();
    assert!(matches!(err, EditorError::Submit(_)));
    assert!(editor.warn_on_leave());
    assert!(!editor.is_saved());
    assert!(editor.can_save());

    let submitter = RecordingSubmitter::default();
    editor.save(&submitter, None).await.unwrap();
    assert_eq!(submitter.sent.lock().unwrap().len(), 1);
}
