mod card_vm;
mod deck_vm;
mod editor_vm;
mod quiz_vm;
mod rich_text;

pub use card_vm::{FlashcardVm, build_flashcard, image_url, map_flashcards};
pub use deck_vm::{DeckListItemVm, map_deck_list, share_url};
pub use editor_vm::{EditorCardVm, EditorVm, FaceEditorVm, build_editor_vm};
pub use quiz_vm::{
    AnswerVm, CORRECT_CLASS, INCORRECT_CLASS, NEUTRAL_CLASS, QuizVm, answer_class, build_quiz_vm,
};
pub use rich_text::{sanitize_html, truncate_preview};
