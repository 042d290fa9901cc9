use dioxus::prelude::*;
use services::filter_decks;

use crate::context::AppContext;
use crate::vm::{map_deck_list, truncate_preview};

#[component]
pub fn DecksView() -> Element {
    let ctx = use_context::<AppContext>();
    let decks = ctx.deck_list();
    let mut query = use_signal(String::new);

    let rows = map_deck_list(&filter_decks(&decks, &query()), &ctx.config().server_url);

    rsx! {
        div { class: "page decks",
            h2 { "Decks" }
            input {
                id: "local-deck-search",
                r#type: "search",
                placeholder: "Search decks",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }
            div { id: "holder",
                if rows.is_empty() {
                    p { class: "text-muted", "No results found." }
                } else {
                    ul { class: "deck-list",
                        for row in rows {
                            li { key: "{row.pk}", class: "deck-row",
                                h3 { "{row.name}" }
                                p { class: "deck-description", "{truncate_preview(&row.description, 80)}" }
                                p { class: "deck-dates text-muted",
                                    "Created {row.created}"
                                    if !row.modified.is_empty() {
                                        " · Modified {row.modified}"
                                    }
                                }
                                if let Some(url) = row.share_url.clone() {
                                    a { class: "share-link", href: "{url}", "Share" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
