use quizcards_core::model::Face;

/// Flip state of a flashcard carousel.
///
/// Each card remembers whether it was flipped; the face on display is the
/// configured start face, or its opposite for flipped cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardViewer {
    start_with: Face,
    flipped: Vec<bool>,
    active: usize,
}

impl FlashcardViewer {
    #[must_use]
    pub fn new(card_count: usize, start_with: Face) -> Self {
        Self {
            start_with,
            flipped: vec![false; card_count],
            active: 0,
        }
    }

    #[must_use]
    pub fn start_with(&self) -> Face {
        self.start_with
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flipped.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flipped.is_empty()
    }

    /// Toggles one card. Out-of-range indices are ignored.
    pub fn flip(&mut self, index: usize) {
        if let Some(flipped) = self.flipped.get_mut(index) {
            *flipped = !*flipped;
        }
    }

    #[must_use]
    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn shown_face(&self, index: usize) -> Face {
        if self.is_flipped(index) {
            self.start_with.opposite()
        } else {
            self.start_with
        }
    }

    /// Index of the card on display; `None` for an empty deck.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.active)
    }

    /// Advances the carousel, wrapping after the last card.
    pub fn next(&mut self) {
        if !self.is_empty() {
            self.active = (self.active + 1) % self.len();
        }
    }

    /// Steps back, wrapping before the first card.
    pub fn previous(&mut self) {
        if !self.is_empty() {
            self.active = (self.active + self.len() - 1) % self.len();
        }
    }
}
