use dioxus::prelude::*;
use quizcards_core::model::{Deck, Face};
use services::{Navigation, QuizRunner, generate_questions};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::vm::build_quiz_vm;

/// A freshly shuffled quiz over `deck`, already on its first question.
fn start_quiz(deck: Option<&Deck>, prompt_face: Face) -> QuizRunner {
    let cards = deck.map_or(&[][..], |deck| deck.cards.as_slice());
    let questions = match generate_questions(cards, prompt_face, &mut rand::rng()) {
        Ok(questions) => questions,
        Err(err) => {
            debug!(error = %err, "no quiz to run");
            Vec::new()
        }
    };
    let mut runner = QuizRunner::new(questions);
    if let Err(err) = runner.show_next() {
        debug!(error = %err, "quiz has no first question");
    }
    runner
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let deck = use_hook(|| ctx.deck());
    let prompt_face = ctx.config().start_with;
    let retry_deck = deck.clone();
    let mut runner = use_signal(|| start_quiz(deck.as_ref(), prompt_face));

    let media_url = ctx.config().media_url.clone();
    let vm = build_quiz_vm(&runner.read(), &media_url);
    let title = deck.as_ref().map_or("Quiz".to_string(), |deck| deck.name.clone());

    rsx! {
        div { class: "page quiz",
            h2 { "{title}" }
            match vm {
                None => rsx! {
                    p { class: "text-muted", "There are no questions to ask." }
                },
                Some(vm) => rsx! {
                    p { class: "quiz-position text-muted", "Question {vm.position} of {vm.total}" }
                    div { class: "question",
                        div { class: "prompt", dangerous_inner_html: "{vm.prompt_html}" }
                        if let Some(url) = vm.prompt_image.clone() {
                            img { src: "{url}" }
                        }
                    }
                    div { class: "answers",
                        for answer in vm.answers.clone() {
                            button {
                                key: "{answer.index}",
                                class: "{answer.class}",
                                onclick: move |_| {
                                    let outcome = runner.write().answer(answer.index);
                                    match outcome {
                                        Ok(outcome) => debug!(?outcome, "answer clicked"),
                                        Err(err) => warn!(error = %err, "answer rejected"),
                                    }
                                },
                                div { dangerous_inner_html: "{answer.html}" }
                                if let Some(url) = answer.image_url.clone() {
                                    img { src: "{url}" }
                                }
                            }
                        }
                    }
                    match vm.navigation {
                        Navigation::Hidden => rsx! {},
                        Navigation::Next => rsx! {
                            button {
                                id: "next",
                                class: "btn btn-primary",
                                onclick: move |_| {
                                    let moved = runner.write().show_next().map(|_| ());
                                    if let Err(err) = moved {
                                        warn!(error = %err, "cannot advance quiz");
                                    }
                                },
                                "Next"
                            }
                        },
                        Navigation::Retry => rsx! {
                            p { class: "quiz-score", "Score: {vm.score} / {vm.total}" }
                            button {
                                id: "retry",
                                class: "btn btn-primary",
                                onclick: move |_| runner.set(start_quiz(retry_deck.as_ref(), prompt_face)),
                                "Retry"
                            }
                        },
                    }
                },
            }
        }
    }
}
