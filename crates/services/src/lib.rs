#![forbid(unsafe_code)]

pub mod config;
pub mod credentials;
pub mod deck_search;
pub mod editor;
pub mod error;
pub mod quiz;
pub mod quiz_gen;
pub mod submit;
pub mod viewer;

pub use config::ClientConfig;
pub use credentials::{
    CredentialEncryptor, HttpKeyClient, KeyClient, PasswordCipher, PreparedCredentials, PublicKey,
    returned_to_form,
};
pub use deck_search::filter_decks;
pub use editor::{CardKey, DeckEditor, FormatCommand, ImageControls, RichTextWidget};
pub use error::{ConfigError, CredentialsError, EditorError, QuizRunnerError, SubmitError};
pub use quiz::{AnswerColor, AnswerOutcome, Navigation, QuizRunner};
pub use quiz_gen::generate_questions;
pub use submit::{DeckSubmission, FormSubmitter, HttpFormSubmitter, ImageUpload, SubmitReceipt};
pub use viewer::FlashcardViewer;
