mod account;
mod decks;
pub mod editor;
mod flashcards;
mod quiz;
pub mod scripts;
mod state;

#[cfg(test)]
pub(crate) mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use account::{
    AccountForm, REGISTER_ACTION, RegisterView, SIGN_IN_ACTION, SignInView, build_account_form,
};
pub use decks::DecksView;
pub use editor::EditorView;
pub use flashcards::FlashcardsView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState};
