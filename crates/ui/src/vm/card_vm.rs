use quizcards_core::model::{Card, Face, Filename};
use services::FlashcardViewer;
use url::Url;

use super::sanitize_html;

/// One side of a flashcard, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardVm {
    pub index: usize,
    pub face_label: &'static str,
    pub html: String,
    pub image_url: Option<String>,
    pub flipped: bool,
}

/// Media URL of a stored image, if any.
#[must_use]
pub fn image_url(image: Option<&Filename>, media_url: &Url) -> Option<String> {
    image
        .and_then(|name| name.media_url(media_url).ok())
        .map(|url| url.to_string())
}

/// Maps every card to the face the viewer currently shows for it.
#[must_use]
pub fn map_flashcards(cards: &[Card], viewer: &FlashcardViewer, media_url: &Url) -> Vec<FlashcardVm> {
    cards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let face = viewer.shown_face(index);
            build_flashcard(index, card, face, viewer.is_flipped(index), media_url)
        })
        .collect()
}

#[must_use]
pub fn build_flashcard(
    index: usize,
    card: &Card,
    face: Face,
    flipped: bool,
    media_url: &Url,
) -> FlashcardVm {
    FlashcardVm {
        index,
        face_label: face.label(),
        html: sanitize_html(card.text(face).as_html()),
        image_url: image_url(card.image(face), media_url),
        flipped,
    }
}
