use crate::model::{
    content::{Filename, RichText},
    face::Face,
    ids::CardPk,
};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Text and optional illustration of one face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSide {
    pub text: RichText,
    pub image: Option<Filename>,
}

impl CardSide {
    pub fn new(text: impl Into<RichText>, image: Option<Filename>) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }
}

/// A term/definition pair, each side optionally illustrated.
///
/// `pk` is only known for cards that were loaded from a saved deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub term: CardSide,
    pub definition: CardSide,
    pub pk: Option<CardPk>,
}

impl Card {
    pub fn new(term: impl Into<RichText>, definition: impl Into<RichText>) -> Self {
        Self {
            term: CardSide::new(term, None),
            definition: CardSide::new(definition, None),
            pk: None,
        }
    }

    #[must_use]
    pub fn with_pk(mut self, pk: CardPk) -> Self {
        self.pk = Some(pk);
        self
    }

    #[must_use]
    pub fn with_image(mut self, face: Face, image: Filename) -> Self {
        self.side_mut(face).image = Some(image);
        self
    }

    #[must_use]
    pub fn side(&self, face: Face) -> &CardSide {
        match face {
            Face::Term => &self.term,
            Face::Definition => &self.definition,
        }
    }

    pub fn side_mut(&mut self, face: Face) -> &mut CardSide {
        match face {
            Face::Term => &mut self.term,
            Face::Definition => &mut self.definition,
        }
    }

    #[must_use]
    pub fn text(&self, face: Face) -> &RichText {
        &self.side(face).text
    }

    #[must_use]
    pub fn image(&self, face: Face) -> Option<&Filename> {
        self.side(face).image.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_are_addressed_by_face() {
        let card = Card::new("France", "Paris")
            .with_image(Face::Definition, Filename::from_path("paris.png").unwrap());

        assert_eq!(card.text(Face::Term).as_html(), "France");
        assert_eq!(card.text(Face::Definition).as_html(), "Paris");
        assert!(card.image(Face::Term).is_none());
        assert_eq!(card.image(Face::Definition).unwrap().as_str(), "paris.png");
    }

    #[test]
    fn new_cards_have_no_pk() {
        let card = Card::new("a", "b");
        assert!(card.pk.is_none());
        assert_eq!(card.with_pk(CardPk::new(7)).pk, Some(CardPk::new(7)));
    }
}
