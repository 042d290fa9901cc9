use dioxus::prelude::*;
use quizcards_core::page::{PageElement, copy_input_value};
use services::FlashcardViewer;
use tracing::warn;

use crate::context::AppContext;
use crate::views::scripts::WebviewClipboard;
use crate::vm::{map_flashcards, share_url};

#[component]
pub fn FlashcardsView() -> Element {
    let ctx = use_context::<AppContext>();
    let deck = use_hook(|| ctx.deck());
    let start_with = ctx.config().start_with;
    let card_count = deck.as_ref().map_or(0, |deck| deck.cards.len());
    let mut viewer = use_signal(|| FlashcardViewer::new(card_count, start_with));

    let Some(deck) = deck else {
        return rsx! {
            div { class: "page flashcards",
                h2 { "Flashcards" }
                p { class: "text-muted", "No deck loaded." }
            }
        };
    };

    let media_url = ctx.config().media_url.clone();
    let cards = map_flashcards(&deck.cards, &viewer.read(), &media_url);
    let active = viewer.read().active();
    let total = cards.len();
    let link = deck.uuid.and_then(|uuid| share_url(&ctx.config().server_url, uuid));
    let copy_link = link.clone();

    rsx! {
        div { class: "page flashcards",
            h2 { "{deck.name}" }
            if !deck.description.is_empty() {
                p { class: "text-muted", "{deck.description}" }
            }

            match active.and_then(|index| cards.get(index).cloned()) {
                None => rsx! {
                    p { class: "text-muted", "This deck has no cards." }
                },
                Some(card) => {
                    let card_class = if card.flipped { "flashcard flipped" } else { "flashcard" };
                    rsx! {
                        div { class: "carousel",
                            button {
                                class: "carousel-prev",
                                onclick: move |_| viewer.write().previous(),
                                "‹"
                            }
                            div {
                                class: "{card_class}",
                                "data-label": "card",
                                onclick: move |_| viewer.write().flip(card.index),
                                span { class: "face-label", "{card.face_label}" }
                                div { class: "face-text", dangerous_inner_html: "{card.html}" }
                                if let Some(url) = card.image_url.clone() {
                                    img { src: "{url}" }
                                }
                            }
                            button {
                                class: "carousel-next",
                                onclick: move |_| viewer.write().next(),
                                "›"
                            }
                        }
                        p { class: "carousel-position", "{card.index + 1} / {total}" }
                    }
                }
            }

            if let Some(url) = link {
                div { class: "share",
                    input { id: "share-link", readonly: true, value: "{url}" }
                    button {
                        class: "btn btn-sm",
                        onclick: move |_| {
                            let Some(url) = copy_link.clone() else {
                                return;
                            };
                            let input = PageElement::input("text", "share-link", url);
                            if let Err(err) = copy_input_value(&input, &WebviewClipboard) {
                                warn!(error = %err, "share link not copied");
                            }
                        },
                        "Copy link"
                    }
                }
            }
        }
    }
}
