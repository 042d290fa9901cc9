use quizcards_core::model::DeckSummary;

/// Decks whose name or description contains `query`, ignoring case.
///
/// A blank query matches every deck. Input order is preserved.
#[must_use]
pub fn filter_decks<'a>(decks: &'a [DeckSummary], query: &str) -> Vec<&'a DeckSummary> {
    let query = query.trim().to_lowercase();
    decks
        .iter()
        .filter(|deck| {
            query.is_empty()
                || deck.name.to_lowercase().contains(&query)
                || deck.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_core::model::DeckPk;

    fn deck(pk: i64, name: &str, description: &str) -> DeckSummary {
        DeckSummary {
            pk: DeckPk::new(pk),
            name: name.to_string(),
            description: description.to_string(),
            uuid: None,
            date_created: None,
            last_modified: None,
        }
    }

    #[test]
    fn matches_name_or_description_case_insensitively() {
        let decks = vec![
            deck(1, "Capitals", "European cities"),
            deck(2, "Verbs", "Irregular SPANISH verbs"),
            deck(3, "Rivers", "Longest rivers"),
        ];

        let hits: Vec<_> = filter_decks(&decks, "spanish").iter().map(|d| d.pk).collect();
        assert_eq!(hits, vec![DeckPk::new(2)]);

        let hits: Vec<_> = filter_decks(&decks, "CAP").iter().map(|d| d.pk).collect();
        assert_eq!(hits, vec![DeckPk::new(1)]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let decks = vec![deck(1, "a", ""), deck(2, "b", "")];
        assert_eq!(filter_decks(&decks, "  ").len(), 2);
    }

    #[test]
    fn no_match_returns_empty() {
        let decks = vec![deck(1, "Capitals", "")];
        assert!(filter_decks(&decks, "zzz").is_empty());
    }
}
