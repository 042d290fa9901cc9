use chrono::NaiveDate;
use quizcards_core::model::{DeckPk, DeckSummary};

use super::test_harness::{ViewKind, capitals, setup_view_harness};
use crate::vm::NEUTRAL_CLASS;

fn summary(pk: i64, name: &str, description: &str) -> DeckSummary {
    DeckSummary {
        pk: DeckPk::new(pk),
        name: name.to_string(),
        description: description.to_string(),
        uuid: None,
        date_created: NaiveDate::from_ymd_opt(2024, 1, 2),
        last_modified: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn decks_view_smoke_lists_every_deck() {
    let decks = vec![summary(1, "Capitals", "Europe"), summary(2, "Verbs", "Spanish")];
    let mut harness = setup_view_harness(ViewKind::Decks, None, decks);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Capitals"), "missing deck in {html}");
    assert!(html.contains("Verbs"), "missing deck in {html}");
    assert!(html.contains("Created Jan 2, 2024"), "missing date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn decks_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Decks, None, Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No results found."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn editor_view_smoke_renders_loaded_deck() {
    let mut harness = setup_view_harness(ViewKind::Editor, Some(capitals()), Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Edit deck"), "missing title in {html}");
    assert!(html.contains("Capitals"), "missing name in {html}");
    assert!(html.contains("Paris"), "missing card text in {html}");
    assert!(html.contains("contenteditable"), "missing face editor in {html}");
    assert!(!html.contains("save-hint"), "unexpected save hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn editor_view_smoke_blocks_empty_new_deck() {
    let mut harness = setup_view_harness(ViewKind::Editor, None, Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("New deck"), "missing title in {html}");
    assert!(html.contains("deck name cannot be empty"), "missing hint in {html}");
    assert!(html.contains("Unsaved changes are kept"), "missing leave warning in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_smoke_shows_first_term() {
    let mut harness = setup_view_harness(ViewKind::Flashcards, Some(capitals()), Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("France"), "missing term in {html}");
    assert!(!html.contains("Paris"), "definition shown too early in {html}");
    assert!(html.contains("1 / 2"), "missing position in {html}");
    assert!(html.contains("flashcards/6f1c2a7e"), "missing share link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_neutral_answers() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(capitals()), Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert_eq!(html.matches(NEUTRAL_CLASS).count(), 2, "expected two answers in {html}");
    assert!(!html.contains("Next"), "navigation visible before answering in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_deck() {
    let mut harness = setup_view_harness(ViewKind::Quiz, None, Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("There are no questions to ask."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sign_in_view_smoke_reports_missing_cipher() {
    let mut harness = setup_view_harness(ViewKind::SignIn, None, Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign-in is unavailable"), "missing notice in {html}");
    assert!(html.contains("type=\"password\""), "missing password input in {html}");
    assert!(!html.contains("class=\"text-muted hidden\""), "notice hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn register_view_smoke_renders_all_fields() {
    let mut harness = setup_view_harness(ViewKind::Register, None, Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Create account"), "missing title in {html}");
    for name in ["username", "email", "password1", "password2"] {
        assert!(html.contains(&format!("name=\"{name}\"")), "missing {name} in {html}");
    }
    assert!(html.contains("Registration is unavailable"), "missing notice in {html}");
}
