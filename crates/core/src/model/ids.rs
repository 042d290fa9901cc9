use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Server-assigned primary key of a stored card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardPk(i64);

impl CardPk {
    /// Creates a new `CardPk`
    #[must_use]
    pub fn new(pk: i64) -> Self {
        Self(pk)
    }

    /// Returns the underlying value
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Server-assigned primary key of a stored deck.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckPk(i64);

impl DeckPk {
    /// Creates a new `DeckPk`
    #[must_use]
    pub fn new(pk: i64) -> Self {
        Self(pk)
    }

    /// Returns the underlying value
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Public identity of a saved deck.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeckUuid(Uuid);

impl DeckUuid {
    #[must_use]
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parses the form-field representation, where an empty string means
    /// "not saved yet".
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` when the value is neither empty nor a uuid.
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ParseIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Debug for CardPk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardPk({})", self.0)
    }
}

impl fmt::Debug for DeckPk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeckPk({})", self.0)
    }
}

impl fmt::Debug for DeckUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeckUuid({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CardPk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DeckPk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DeckUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for CardPk {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(CardPk::new)
            .map_err(|_| ParseIdError {
                kind: "CardPk".to_string(),
            })
    }
}

impl FromStr for DeckPk {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(DeckPk::new)
            .map_err(|_| ParseIdError {
                kind: "DeckPk".to_string(),
            })
    }
}

impl FromStr for DeckUuid {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(DeckUuid::new)
            .map_err(|_| ParseIdError {
                kind: "DeckUuid".to_string(),
            })
    }
}

// ─── Serde ─────────────────────────────────────────────────────────────────────

impl Serialize for DeckUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DeckUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<DeckUuid>` stored as a string that is empty for
/// unsaved decks.
pub mod optional_uuid {
    use super::DeckUuid;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DeckUuid>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(uuid) => serializer.collect_str(uuid),
            None => serializer.serialize_str(""),
        }
    }

    /// # Errors
    ///
    /// Fails when the string is neither empty nor a valid uuid.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DeckUuid>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        DeckUuid::parse_optional(&raw).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_pk_display_and_parse() {
        let pk: CardPk = " 123 ".parse().unwrap();
        assert_eq!(pk, CardPk::new(123));
        assert_eq!(pk.to_string(), "123");
    }

    #[test]
    fn card_pk_from_str_invalid() {
        let result = "not-a-number".parse::<CardPk>();
        assert!(result.is_err());
    }

    #[test]
    fn deck_pk_from_str() {
        let pk: DeckPk = "456".parse().unwrap();
        assert_eq!(pk.value(), 456);
    }

    #[test]
    fn empty_uuid_means_unsaved() {
        assert_eq!(DeckUuid::parse_optional("").unwrap(), None);
        assert_eq!(DeckUuid::parse_optional("   ").unwrap(), None);
    }

    #[test]
    fn uuid_roundtrip_through_string() {
        let uuid = DeckUuid::new_v4();
        let parsed = DeckUuid::parse_optional(&uuid.to_string()).unwrap();
        assert_eq!(parsed, Some(uuid));
    }

    #[test]
    fn malformed_uuid_is_rejected() {
        assert!(DeckUuid::parse_optional("deck-1").is_err());
    }
}
