use std::path::Path;

use dioxus::prelude::*;
use quizcards_core::page::visibility_class;
use services::{CardKey, DeckEditor, FormatCommand};
use tracing::warn;

use super::widget::ScriptWidget;
use crate::views::scripts::{read_editable_html, run_scripts};
use crate::vm::{EditorCardVm, FaceEditorVm};

#[component]
pub fn CardEditor(card: EditorCardVm, can_delete: bool, editor: Signal<DeckEditor>) -> Element {
    let mut editor = editor;
    let card_key = card.key;
    let position = card.position;

    rsx! {
        div { class: "card-editor", "data-label": "card",
            div { class: "card-header",
                span { class: "card-number", "#{position + 1}" }
                button {
                    class: "btn btn-sm",
                    disabled: !card.can_move_up,
                    onclick: move |_| move_card(editor, card_key, position.saturating_sub(1)),
                    "Up"
                }
                button {
                    class: "btn btn-sm",
                    disabled: !card.can_move_down,
                    onclick: move |_| move_card(editor, card_key, position + 1),
                    "Down"
                }
                button {
                    class: "btn btn-sm btn-outline-danger {visibility_class(can_delete)}",
                    onclick: move |_| {
                        editor.write().delete_card(card_key);
                    },
                    "Delete"
                }
            }
            div { class: "card-faces",
                for face in card.faces.clone() {
                    FaceEditor {
                        key: "{face.element_id}",
                        card: card_key,
                        face: face.clone(),
                        editor,
                    }
                }
            }
        }
    }
}

fn move_card(mut editor: Signal<DeckEditor>, key: CardKey, to: usize) {
    if let Err(err) = editor.write().move_card(key, to) {
        warn!(error = %err, "card move ignored");
    }
}

#[component]
fn FaceEditor(card: CardKey, face: FaceEditorVm, editor: Signal<DeckEditor>) -> Element {
    let mut editor = editor;
    // The editable region owns its markup after the first render.
    let initial_html = use_hook(|| face.html.clone());
    let mut picked_path = use_signal(String::new);
    let mut image_error = use_signal(|| None::<String>);

    let side = face.face;
    let element_id = face.element_id.clone();
    let controls = face.controls;

    let apply = move |command: FormatCommand| {
        let mut widget = ScriptWidget::default();
        if let Err(err) = editor
            .read()
            .apply_formatting(card, side, &command, &mut widget)
        {
            warn!(error = %err, "formatting ignored");
            return;
        }
        spawn(run_scripts(widget.into_scripts()));
    };

    let sync_id = element_id.clone();
    let on_input = move |_| {
        let element_id = sync_id.clone();
        spawn(async move {
            if let Some(html) = read_editable_html(&element_id).await {
                if let Err(err) = editor.write().set_text(card, side, html) {
                    warn!(error = %err, "face edit dropped");
                }
            }
        });
    };

    let on_attach = move |_| {
        let path = picked_path();
        let result = editor.write().attach_image(card, side, Path::new(path.trim()));
        match result {
            Ok(()) => {
                image_error.set(None);
                picked_path.set(String::new());
            }
            Err(err) => image_error.set(Some(err.to_string())),
        }
    };

    rsx! {
        div { class: "face-editor", "data-label": "{side.as_str()}",
            label { "{side.label()}" }
            div { class: "toolbar",
                button { onclick: move |_| apply(FormatCommand::Bold), b { "B" } }
                button { onclick: move |_| apply(FormatCommand::Italic), i { "I" } }
                button { onclick: move |_| apply(FormatCommand::Underline), u { "U" } }
                input {
                    r#type: "color",
                    title: "Text colour",
                    onchange: move |evt| apply(FormatCommand::ForeColor(evt.value())),
                }
                input {
                    r#type: "color",
                    title: "Highlight",
                    value: "#ffff00",
                    onchange: move |evt| apply(FormatCommand::BackColor(evt.value())),
                }
                button { onclick: move |_| apply(FormatCommand::Undo), "Undo" }
                button { onclick: move |_| apply(FormatCommand::Redo), "Redo" }
            }
            div {
                id: "{element_id}",
                class: "face-text",
                contenteditable: "true",
                dangerous_inner_html: "{initial_html}",
                oninput: on_input,
            }

            div { class: "image-upload {visibility_class(controls.show_upload)}",
                input {
                    r#type: "text",
                    placeholder: "Image file path",
                    value: "{picked_path}",
                    oninput: move |evt| picked_path.set(evt.value()),
                }
                button { class: "btn btn-sm", onclick: on_attach, "Attach image" }
            }
            if let Some(err) = image_error() {
                p { class: "image-error", "{err}" }
            }
            div { class: "image-preview {visibility_class(controls.show_preview)}",
                if let Some(url) = face.preview_url.clone() {
                    img { src: "{url}", alt: "{face.image_name.clone().unwrap_or_default()}" }
                }
            }
            button {
                class: "btn btn-sm btn-outline-danger {visibility_class(controls.show_delete)}",
                onclick: move |_| {
                    if let Err(err) = editor.write().detach_image(card, side) {
                        warn!(error = %err, "image removal ignored");
                    }
                },
                "Remove image"
            }
        }
    }
}
