use quizcards_core::model::Face;
use services::editor::{EditorCard, FaceTarget, ImageControls};
use services::{CardKey, DeckEditor};

use super::sanitize_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceEditorVm {
    pub face: Face,
    pub element_id: String,
    pub html: String,
    pub controls: ImageControls,
    pub preview_url: Option<String>,
    pub image_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorCardVm {
    pub key: CardKey,
    pub position: usize,
    pub faces: [FaceEditorVm; 2],
    pub can_move_up: bool,
    pub can_move_down: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorVm {
    pub title: &'static str,
    pub name: String,
    pub description: String,
    pub cards: Vec<EditorCardVm>,
    pub can_delete: bool,
    pub can_save: bool,
    pub save_hint: Option<String>,
    pub warn_on_leave: bool,
}

#[must_use]
pub fn build_editor_vm(editor: &DeckEditor) -> EditorVm {
    let count = editor.card_count();
    let cards = editor
        .cards()
        .iter()
        .enumerate()
        .map(|(position, card)| build_card_vm(card, position, count))
        .collect();

    EditorVm {
        title: if editor.is_update() { "Edit deck" } else { "New deck" },
        name: editor.name().to_string(),
        description: editor.description().to_string(),
        cards,
        can_delete: count > 1,
        can_save: editor.can_save(),
        save_hint: editor.check_save().err().map(|err| err.to_string()),
        warn_on_leave: editor.warn_on_leave(),
    }
}

fn build_card_vm(card: &EditorCard, position: usize, count: usize) -> EditorCardVm {
    let face = |face: Face| {
        let draft = card.face(face);
        FaceEditorVm {
            face,
            element_id: FaceTarget { card: card.key(), face }.element_id(),
            html: sanitize_html(draft.text.as_html()),
            controls: ImageControls::for_slot(&draft.image),
            preview_url: draft.image.preview_url().map(ToString::to_string),
            image_name: draft.image.filename().map(|name| name.as_str().to_string()),
        }
    };
    EditorCardVm {
        key: card.key(),
        position,
        faces: [face(Face::Term), face(Face::Definition)],
        can_move_up: position > 0,
        can_move_down: position + 1 < count,
    }
}
