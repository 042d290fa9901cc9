use chrono::NaiveDate;
use thiserror::Error;

use crate::model::card::Card;
use crate::model::ids::{DeckPk, DeckUuid};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck name cannot be empty")]
    EmptyName,

    #[error("a deck needs at least {min} cards to be saved (has {actual})")]
    TooFewCards { min: usize, actual: usize },
}

//
// ─── SAVE POLICY ───────────────────────────────────────────────────────────────
//

/// Client-side gate for saving a deck.
///
/// The minimum card count differed between releases of the editor (1 vs 2),
/// so it is a setting rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    min_cards: usize,
}

impl SavePolicy {
    pub const DEFAULT_MIN_CARDS: usize = 2;

    /// A threshold of zero is raised to one: an empty deck is never savable.
    #[must_use]
    pub fn new(min_cards: usize) -> Self {
        Self {
            min_cards: min_cards.max(1),
        }
    }

    #[must_use]
    pub fn min_cards(&self) -> usize {
        self.min_cards
    }
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CARDS)
    }
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// A named collection of flashcards.
///
/// `uuid` is `None` until the server has stored the deck once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub description: String,
    pub uuid: Option<DeckUuid>,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uuid: None,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: DeckUuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Saving an existing deck updates it instead of creating a new one.
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.uuid.is_some()
    }

    /// # Errors
    ///
    /// Returns `DeckError::EmptyName` for a blank name and
    /// `DeckError::TooFewCards` below the policy's threshold.
    pub fn check_save(&self, policy: &SavePolicy) -> Result<(), DeckError> {
        check_save(&self.name, self.cards.len(), policy)
    }

    #[must_use]
    pub fn can_save(&self, policy: &SavePolicy) -> bool {
        self.check_save(policy).is_ok()
    }
}

/// Save gate over the raw inputs the editor keeps.
///
/// # Errors
///
/// See [`Deck::check_save`].
pub fn check_save(name: &str, card_count: usize, policy: &SavePolicy) -> Result<(), DeckError> {
    if name.trim().is_empty() {
        return Err(DeckError::EmptyName);
    }
    if card_count < policy.min_cards() {
        return Err(DeckError::TooFewCards {
            min: policy.min_cards(),
            actual: card_count,
        });
    }
    Ok(())
}

//
// ─── LISTING ───────────────────────────────────────────────────────────────────
//

/// Row of the user's deck list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    pub pk: DeckPk,
    pub name: String,
    pub description: String,
    pub uuid: Option<DeckUuid>,
    pub date_created: Option<NaiveDate>,
    pub last_modified: Option<NaiveDate>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
