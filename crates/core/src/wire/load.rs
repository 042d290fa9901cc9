use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{
    Card, CardPk, CardSide, Deck, DeckPk, DeckSummary, DeckUuid, Filename, RichText,
    optional_uuid,
};
use crate::wire::PayloadError;

/// Record shape produced by the server ORM's default serializer:
/// `{"model": "...", "pk": 1, "fields": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub pk: Option<i64>,
    pub fields: T,
}

impl<T> Envelope<T> {
    pub fn new(pk: Option<i64>, fields: T) -> Self {
        Self {
            model: None,
            pk,
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "optional_uuid")]
    pub uuid: Option<DeckUuid>,
    #[serde(default)]
    pub date_created: Option<NaiveDate>,
    #[serde(default)]
    pub last_modified: Option<NaiveDate>,
}

/// Stored image fields hold the server-side path (possibly with
/// directories), an empty string, or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    pub term: String,
    #[serde(default)]
    pub term_image: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub definition_image: Option<String>,
}

/// Inline data the editor is initialised from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLoadPayload {
    #[serde(deserialize_with = "one_or_first")]
    pub deck: Envelope<DeckFields>,
    #[serde(default)]
    pub cards: Vec<Envelope<CardFields>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

// The deck record arrives either bare or as the one-element list the ORM
// serializer emits for a queryset.
fn one_or_first<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match OneOrMany::<T>::deserialize(deserializer)? {
        OneOrMany::One(value) => Ok(value),
        OneOrMany::Many(values) => values
            .into_iter()
            .next()
            .ok_or_else(|| serde::de::Error::custom("deck record list is empty")),
    }
}

fn stored_image(raw: Option<&String>) -> Option<Filename> {
    raw.and_then(Filename::from_optional_path)
}

impl DeckLoadPayload {
    /// # Errors
    ///
    /// Returns `PayloadError::Json` for malformed documents.
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the payload from the two separate data blobs a page embeds:
    /// the deck record(s) and the card records.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Json` for malformed documents and
    /// `PayloadError::EmptyDeckRecord` when the deck list holds no record.
    pub fn from_parts(deck_json: &str, cards_json: &str) -> Result<Self, PayloadError> {
        let deck = match serde_json::from_str::<OneOrMany<Envelope<DeckFields>>>(deck_json)? {
            OneOrMany::One(deck) => deck,
            OneOrMany::Many(decks) => decks
                .into_iter()
                .next()
                .ok_or(PayloadError::EmptyDeckRecord)?,
        };
        let cards = serde_json::from_str(cards_json)?;
        Ok(Self { deck, cards })
    }

    /// Inverse of [`DeckLoadPayload::into_deck`]; images are written as
    /// basenames.
    #[must_use]
    pub fn from_deck(deck: &Deck) -> Self {
        let cards = deck
            .cards
            .iter()
            .map(|card| {
                Envelope::new(
                    card.pk.map(|pk| pk.value()),
                    CardFields {
                        term: card.term.text.as_html().to_string(),
                        term_image: card.term.image.as_ref().map(|f| f.as_str().to_string()),
                        definition: card.definition.text.as_html().to_string(),
                        definition_image: card
                            .definition
                            .image
                            .as_ref()
                            .map(|f| f.as_str().to_string()),
                    },
                )
            })
            .collect();
        Self {
            deck: Envelope::new(
                None,
                DeckFields {
                    name: deck.name.clone(),
                    description: Some(deck.description.clone()),
                    uuid: deck.uuid,
                    date_created: None,
                    last_modified: None,
                },
            ),
            cards,
        }
    }

    #[must_use]
    pub fn into_deck(self) -> Deck {
        let cards = self
            .cards
            .into_iter()
            .map(|record| Card {
                term: CardSide::new(
                    RichText::new(record.fields.term),
                    stored_image(record.fields.term_image.as_ref()),
                ),
                definition: CardSide::new(
                    RichText::new(record.fields.definition),
                    stored_image(record.fields.definition_image.as_ref()),
                ),
                pk: record.pk.map(CardPk::new),
            })
            .collect();

        Deck {
            name: self.deck.fields.name,
            description: self.deck.fields.description.unwrap_or_default(),
            uuid: self.deck.fields.uuid,
            cards,
        }
    }
}

/// Parses the deck list embedded in the user's overview page.
///
/// # Errors
///
/// Returns `PayloadError::Json` for malformed documents and
/// `PayloadError::MissingPk` for records without a primary key.
pub fn parse_deck_list(raw: &str) -> Result<Vec<DeckSummary>, PayloadError> {
    let records: Vec<Envelope<DeckFields>> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .map(|record| {
            let pk = record.pk.ok_or(PayloadError::MissingPk)?;
            Ok(DeckSummary {
                pk: DeckPk::new(pk),
                name: record.fields.name,
                description: record.fields.description.unwrap_or_default(),
                uuid: record.fields.uuid,
                date_created: record.fields.date_created,
                last_modified: record.fields.last_modified,
            })
        })
        .collect()
}
