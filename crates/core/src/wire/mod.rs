//! JSON contracts exchanged with the Quizcards server.

mod load;
mod save;

use thiserror::Error;

pub use load::{CardFields, DeckFields, DeckLoadPayload, Envelope, parse_deck_list};
pub use save::{CardSavePayload, DeckSavePayload};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("deck record list is empty")]
    EmptyDeckRecord,

    #[error("record has no primary key")]
    MissingPk,
}
