mod card;
pub mod content;
mod deck;
mod face;
mod ids;
mod quiz;

pub use content::{Filename, MediaValidationError, RichText, local_preview_url};
pub use ids::{CardPk, DeckPk, DeckUuid, ParseIdError, optional_uuid};

pub use card::{Card, CardSide};
pub use deck::{Deck, DeckError, DeckSummary, SavePolicy, check_save};
pub use face::{Face, ParseFaceError};
pub use quiz::{Answer, QuizError, QuizQuestion};
