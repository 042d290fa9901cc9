use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quizcards_core::model::Face;
use services::DeckEditor;
use services::editor::FaceTarget;
use tracing::{debug, warn};

use super::card::CardEditor;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::scripts::read_editable_html;
use crate::views::{ViewError, ViewState};
use crate::vm::{EditorVm, build_editor_vm};

#[component]
pub fn EditorView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut editor = use_signal(|| ctx.resume_editor());
    let mut save_state = use_signal(|| ViewState::<String>::Idle);
    let navigator = use_navigator();

    let drafts = ctx.clone();
    use_effect(move || drafts.park_editor(&editor.read()));

    let EditorVm {
        title,
        name,
        description,
        cards,
        can_delete,
        can_save,
        save_hint,
        warn_on_leave,
    } = build_editor_vm(&editor.read());

    let submitter = ctx.submitter();
    let csrf = ctx.config().csrf_token.clone();
    let on_save = move |_| {
        let submitter = submitter.clone();
        let csrf = csrf.clone();
        spawn(async move {
            save_state.set(ViewState::Loading);
            sync_faces_from_page(editor).await;
            let mut draft = editor.read().clone();
            let result = draft.save(submitter.as_ref(), csrf.as_ref()).await;
            editor.set(draft);
            match result {
                Ok(receipt) => {
                    debug!(landed_on = %receipt.landed_on, "deck saved");
                    save_state.set(ViewState::Ready(receipt.landed_on.to_string()));
                    navigator.push(Route::Decks {});
                }
                Err(err) => {
                    warn!(error = %err, "deck save failed");
                    save_state.set(ViewState::Error(ViewError::from(&err)));
                }
            }
        });
    };

    let saving = save_state() == ViewState::Loading;

    rsx! {
        div { class: "page editor",
            h2 { "{title}" }

            div { class: "deck-fields",
                label { r#for: "deck-name", "Name" }
                input {
                    id: "deck-name",
                    value: "{name}",
                    oninput: move |evt| editor.write().set_name(evt.value()),
                }
                label { r#for: "deck-description", "Description" }
                textarea {
                    id: "deck-description",
                    value: "{description}",
                    oninput: move |evt| editor.write().set_description(evt.value()),
                }
            }

            div { id: "container", class: "cards",
                for card in cards {
                    CardEditor {
                        key: "{card.key.value()}",
                        card: card.clone(),
                        can_delete,
                        editor,
                    }
                }
            }

            div { class: "editor-actions",
                button {
                    class: "btn btn-outline-secondary",
                    onclick: move |_| {
                        let key = editor.write().add_card();
                        debug!(?key, "card added");
                    },
                    "Add card"
                }
                button {
                    id: "save",
                    class: "btn btn-primary",
                    disabled: !can_save || saving,
                    onclick: on_save,
                    "Save"
                }
            }

            if let Some(hint) = save_hint {
                p { class: "save-hint text-muted", "{hint}" }
            }
            if warn_on_leave {
                p { class: "leave-warning", "Unsaved changes are kept until you save this deck." }
            }

            match save_state() {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "save-status", "Saving..." }
                },
                ViewState::Ready(landed_on) => rsx! {
                    p { class: "save-status", "Saved. The server answered with {landed_on}." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "save-status error", "{err.message()}" }
                },
            }
        }
    }
}

/// Copies the current markup of every face editor into the deck state.
async fn sync_faces_from_page(mut editor: Signal<DeckEditor>) {
    let keys: Vec<_> = editor.read().cards().iter().map(|card| card.key()).collect();
    for key in keys {
        for face in Face::ALL {
            let element_id = FaceTarget { card: key, face }.element_id();
            let Some(html) = read_editable_html(&element_id).await else {
                continue;
            };
            if let Err(err) = editor.write().set_text(key, face, html) {
                warn!(error = %err, "face sync skipped");
            }
        }
    }
}
