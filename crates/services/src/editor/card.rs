use std::fmt;
use std::path::{Path, PathBuf};

use quizcards_core::model::{
    Card, CardPk, CardSide, Face, Filename, MediaValidationError, RichText, local_preview_url,
};
use url::Url;

/// Editor-local handle of a card, stable while the editor is open.
///
/// Unlike the card's position it survives reordering and deletion of other
/// cards, so UI callbacks can hold on to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey(u64);

impl CardKey {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardKey({})", self.0)
    }
}

/// A file chosen in the picker but not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    pub source: PathBuf,
    pub filename: Filename,
    pub preview_url: Url,
}

impl PickedImage {
    /// # Errors
    ///
    /// Returns `MediaValidationError` when the path has no file name or is
    /// not absolute.
    pub fn from_path(path: &Path) -> Result<Self, MediaValidationError> {
        let filename = Filename::from_path(path.to_string_lossy())?;
        let preview_url = local_preview_url(path)?;
        Ok(Self {
            source: path.to_path_buf(),
            filename,
            preview_url,
        })
    }
}

/// Image state of one face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageSlot {
    #[default]
    Empty,
    /// Image already saved on the server.
    Stored {
        filename: Filename,
        preview_url: Option<Url>,
    },
    /// Freshly picked file; replaces any stored image on save.
    Picked(PickedImage),
}

impl ImageSlot {
    #[must_use]
    pub fn stored(filename: Filename, media_root: &Url) -> Self {
        let preview_url = filename.media_url(media_root).ok();
        Self::Stored {
            filename,
            preview_url,
        }
    }

    #[must_use]
    pub fn filename(&self) -> Option<&Filename> {
        match self {
            ImageSlot::Empty => None,
            ImageSlot::Stored { filename, .. } => Some(filename),
            ImageSlot::Picked(picked) => Some(&picked.filename),
        }
    }

    #[must_use]
    pub fn preview_url(&self) -> Option<&Url> {
        match self {
            ImageSlot::Empty => None,
            ImageSlot::Stored { preview_url, .. } => preview_url.as_ref(),
            ImageSlot::Picked(picked) => Some(&picked.preview_url),
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, ImageSlot::Empty)
    }
}

/// Which image controls of a face are visible.
///
/// The upload control and the preview/delete pair are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageControls {
    pub show_upload: bool,
    pub show_preview: bool,
    pub show_delete: bool,
}

impl ImageControls {
    #[must_use]
    pub fn for_slot(slot: &ImageSlot) -> Self {
        let has_image = slot.is_present();
        Self {
            show_upload: !has_image,
            show_preview: has_image,
            show_delete: has_image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceDraft {
    pub text: RichText,
    pub image: ImageSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCard {
    key: CardKey,
    pk: Option<CardPk>,
    term: FaceDraft,
    definition: FaceDraft,
}

impl EditorCard {
    pub(crate) fn blank(key: CardKey) -> Self {
        Self {
            key,
            pk: None,
            term: FaceDraft::default(),
            definition: FaceDraft::default(),
        }
    }

    pub(crate) fn from_card(key: CardKey, card: Card, media_root: &Url) -> Self {
        let draft = |side: CardSide| FaceDraft {
            text: side.text,
            image: side
                .image
                .map_or(ImageSlot::Empty, |name| ImageSlot::stored(name, media_root)),
        };
        Self {
            key,
            pk: card.pk,
            term: draft(card.term),
            definition: draft(card.definition),
        }
    }

    #[must_use]
    pub fn key(&self) -> CardKey {
        self.key
    }

    #[must_use]
    pub fn pk(&self) -> Option<CardPk> {
        self.pk
    }

    #[must_use]
    pub fn face(&self, face: Face) -> &FaceDraft {
        match face {
            Face::Term => &self.term,
            Face::Definition => &self.definition,
        }
    }

    pub(crate) fn face_mut(&mut self, face: Face) -> &mut FaceDraft {
        match face {
            Face::Term => &mut self.term,
            Face::Definition => &mut self.definition,
        }
    }

    #[must_use]
    pub fn to_card(&self) -> Card {
        let side = |draft: &FaceDraft| CardSide::new(draft.text.clone(), draft.image.filename().cloned());
        Card {
            term: side(&self.term),
            definition: side(&self.definition),
            pk: self.pk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_root() -> Url {
        Url::parse("http://localhost:8000/media/").unwrap()
    }

    #[test]
    fn stored_image_gets_media_preview() {
        let slot = ImageSlot::stored(Filename::from_path("paris.png").unwrap(), &media_root());
        assert_eq!(
            slot.preview_url().unwrap().as_str(),
            "http://localhost:8000/media/paris.png"
        );
        assert_eq!(slot.filename().unwrap().as_str(), "paris.png");
    }

    #[test]
    fn controls_follow_image_presence() {
        let empty = ImageControls::for_slot(&ImageSlot::Empty);
        assert!(empty.show_upload && !empty.show_preview && !empty.show_delete);

        let slot = ImageSlot::stored(Filename::from_path("a.png").unwrap(), &media_root());
        let present = ImageControls::for_slot(&slot);
        assert!(!present.show_upload && present.show_preview && present.show_delete);
    }

    #[test]
    fn loaded_card_keeps_pk_and_images() {
        let card = Card::new("France", "Paris")
            .with_pk(CardPk::new(4))
            .with_image(Face::Term, Filename::from_path("fr.png").unwrap());
        let draft = EditorCard::from_card(CardKey::new(1), card.clone(), &media_root());

        assert_eq!(draft.pk(), Some(CardPk::new(4)));
        assert_eq!(draft.to_card(), card);
    }
}
