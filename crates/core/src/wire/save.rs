use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Card, CardPk, CardSide, Deck, DeckUuid, Filename, RichText, optional_uuid};
use crate::wire::PayloadError;

/// One card of the `deck` form field.
///
/// Images are basenames, or `""` when the face has none. The `pk` key is
/// only written for updates; a card added while editing an existing deck
/// carries `"pk": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSavePayload {
    pub term: String,
    #[serde(default)]
    pub term_image: String,
    pub definition: String,
    #[serde(default)]
    pub definition_image: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_field"
    )]
    pub pk: Option<Option<CardPk>>,
}

/// JSON document submitted in the hidden `deck` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSavePayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "optional_uuid")]
    pub uuid: Option<DeckUuid>,
    pub cards: Vec<CardSavePayload>,
}

// Distinguishes an absent `pk` key from an explicit `null`.
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn image_field(image: Option<&Filename>) -> String {
    image.map(|name| name.as_str().to_string()).unwrap_or_default()
}

impl CardSavePayload {
    #[must_use]
    pub fn from_card(card: &Card, is_update: bool) -> Self {
        Self {
            term: card.term.text.as_html().to_string(),
            term_image: image_field(card.term.image.as_ref()),
            definition: card.definition.text.as_html().to_string(),
            definition_image: image_field(card.definition.image.as_ref()),
            pk: is_update.then_some(card.pk),
        }
    }

    #[must_use]
    pub fn into_card(self) -> Card {
        Card {
            term: CardSide::new(
                RichText::new(self.term),
                Filename::from_optional_path(&self.term_image),
            ),
            definition: CardSide::new(
                RichText::new(self.definition),
                Filename::from_optional_path(&self.definition_image),
            ),
            pk: self.pk.flatten(),
        }
    }
}

impl DeckSavePayload {
    /// Cards keep their order; primary keys are attached only when
    /// `is_update` is set.
    #[must_use]
    pub fn from_deck(deck: &Deck, is_update: bool) -> Self {
        Self {
            name: deck.name.clone(),
            description: deck.description.clone(),
            uuid: deck.uuid,
            cards: deck
                .cards
                .iter()
                .map(|card| CardSavePayload::from_card(card, is_update))
                .collect(),
        }
    }

    #[must_use]
    pub fn into_deck(self) -> Deck {
        Deck {
            name: self.name,
            description: self.description,
            uuid: self.uuid,
            cards: self.cards.into_iter().map(CardSavePayload::into_card).collect(),
        }
    }

    #[must_use]
    pub fn is_update(&self) -> bool {
        self.uuid.is_some()
    }

    /// # Errors
    ///
    /// Returns `PayloadError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns `PayloadError::Json` for malformed documents.
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }
}
