use chrono::NaiveDate;
use quizcards_core::model::{DeckSummary, DeckUuid};
use url::Url;

/// UI-ready row of the deck list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckListItemVm {
    pub pk: i64,
    pub name: String,
    pub description: String,
    pub created: String,
    pub modified: String,
    pub share_url: Option<String>,
}

#[must_use]
pub fn map_deck_list(decks: &[&DeckSummary], server_url: &Url) -> Vec<DeckListItemVm> {
    decks
        .iter()
        .map(|deck| DeckListItemVm {
            pk: deck.pk.value(),
            name: deck.name.clone(),
            description: deck.description.clone(),
            created: format_date(deck.date_created),
            modified: format_date(deck.last_modified),
            share_url: deck.uuid.and_then(|uuid| share_url(server_url, uuid)),
        })
        .collect()
}

/// Public flashcards page of a deck: `{server}/flashcards/{uuid}`.
#[must_use]
pub fn share_url(server_url: &Url, uuid: DeckUuid) -> Option<String> {
    server_url
        .join(&format!("flashcards/{uuid}"))
        .ok()
        .map(|url| url.to_string())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(String::new, |d| d.format("%b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_core::model::DeckPk;

    #[test]
    fn rows_carry_dates_and_share_link() {
        let uuid: DeckUuid = "6f1c2a7e-0c1e-4a53-9c43-2f0f6a4b2d11".parse().unwrap();
        let deck = DeckSummary {
            pk: DeckPk::new(3),
            name: "Capitals".into(),
            description: "Europe".into(),
            uuid: Some(uuid),
            date_created: NaiveDate::from_ymd_opt(2024, 3, 9),
            last_modified: None,
        };
        let server = Url::parse("http://localhost:8000/").unwrap();

        let rows = map_deck_list(&[&deck], &server);
        assert_eq!(rows[0].pk, 3);
        assert_eq!(rows[0].created, "Mar 9, 2024");
        assert_eq!(rows[0].modified, "");
        assert_eq!(
            rows[0].share_url.as_deref(),
            Some("http://localhost:8000/flashcards/6f1c2a7e-0c1e-4a53-9c43-2f0f6a4b2d11")
        );
    }
}
