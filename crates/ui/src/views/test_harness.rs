use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quizcards_core::model::{Card, Deck, DeckSummary};
use quizcards_core::page::CsrfToken;
use quizcards_core::wire::DeckLoadPayload;
use services::{
    ClientConfig, CredentialEncryptor, DeckSubmission, FormSubmitter, SubmitError, SubmitReceipt,
};
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::views::{DecksView, EditorView, FlashcardsView, QuizView, RegisterView, SignInView};

pub(crate) struct NoopSubmitter;

#[async_trait]
impl FormSubmitter for NoopSubmitter {
    async fn submit(
        &self,
        _submission: &DeckSubmission,
        _csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, SubmitError> {
        Ok(SubmitReceipt {
            landed_on: Url::parse("http://localhost:8000/user/").unwrap(),
        })
    }
}

#[derive(Clone)]
struct TestApp {
    config: ClientConfig,
    deck: Option<DeckLoadPayload>,
    decks: Vec<DeckSummary>,
}

impl UiApp for TestApp {
    fn config(&self) -> ClientConfig {
        self.config.clone()
    }

    fn deck(&self) -> Option<DeckLoadPayload> {
        self.deck.clone()
    }

    fn deck_list(&self) -> Vec<DeckSummary> {
        self.decks.clone()
    }

    fn submitter(&self) -> Arc<dyn FormSubmitter> {
        Arc::new(NoopSubmitter)
    }

    fn credentials(&self) -> Option<CredentialEncryptor> {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Decks,
    Editor,
    Flashcards,
    Quiz,
    SignIn,
    Register,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Decks => rsx! { DecksView {} },
        ViewKind::Editor => rsx! { EditorView {} },
        ViewKind::Flashcards => rsx! { FlashcardsView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::SignIn => rsx! { SignInView {} },
        ViewKind::Register => rsx! { RegisterView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// The deck most smoke tests open: two capitals, saved before.
pub fn capitals() -> Deck {
    Deck::new("Capitals", "European capitals")
        .with_cards(vec![Card::new("France", "Paris"), Card::new("Italy", "Rome")])
        .with_uuid(
            "6f1c2a7e-0c1e-4a53-9c43-2f0f6a4b2d11"
                .parse()
                .expect("valid uuid"),
        )
}

fn test_app_with(deck: Option<Deck>, decks: Vec<DeckSummary>) -> Arc<TestApp> {
    let config = ClientConfig::for_server(Url::parse("http://localhost:8000/").unwrap())
        .expect("config");
    Arc::new(TestApp {
        config,
        deck: deck.as_ref().map(DeckLoadPayload::from_deck),
        decks,
    })
}

/// The app behind the harness, for tests that build a context directly.
pub(crate) fn test_app(deck: Option<Deck>) -> Arc<dyn UiApp> {
    test_app_with(deck, Vec::new())
}

pub fn setup_view_harness(view: ViewKind, deck: Option<Deck>, decks: Vec<DeckSummary>) -> ViewHarness {
    let app = test_app_with(deck, decks);
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
