//! Shared error types for the services crate.

use thiserror::Error;

use quizcards_core::model::{DeckError, MediaValidationError, ParseFaceError, QuizError};
use quizcards_core::wire::PayloadError;

use url::Url;

use crate::editor::CardKey;

/// Errors emitted by form submitters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("form submission failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not read image {path}: {source}")]
    ReadImage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted by `DeckEditor`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditorError {
    #[error("cannot save: {0}")]
    CannotSave(#[from] DeckError),
    #[error("this deck has already been saved")]
    AlreadySaved,
    #[error("card {0:?} is not part of this deck")]
    UnknownCard(CardKey),
    #[error(transparent)]
    Media(#[from] MediaValidationError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Errors emitted by `QuizRunner` and quiz generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizRunnerError {
    #[error("quiz has no questions")]
    Empty,
    #[error("no question is being shown")]
    NoActiveQuestion,
    #[error("answer the current question first")]
    NotAnswered,
    #[error("quiz is finished")]
    Finished,
    #[error("question has no answer #{0}")]
    UnknownChoice(usize),
    #[error(transparent)]
    Question(#[from] QuizError),
}

/// Errors emitted by the credential encryption flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("key request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server returned an empty public key")]
    EmptyKey,
    #[error("the server sent the form back ({0})")]
    Rejected(Url),
    #[error("form action is not a valid URL: {0}")]
    InvalidAction(String),
    #[error("encryption failed: {0}")]
    Cipher(String),
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {raw}")]
    InvalidUrl { name: &'static str, raw: String },
    #[error("{name} must be a positive number: {raw}")]
    InvalidNumber { name: &'static str, raw: String },
    #[error(transparent)]
    Face(#[from] ParseFaceError),
}
