//! Deck editor state: the card list of one deck and its save contract.

mod card;
mod format;

use std::path::Path;

use quizcards_core::model::{Deck, DeckError, DeckUuid, Face, RichText, SavePolicy, check_save};
use quizcards_core::page::CsrfToken;
use quizcards_core::wire::{DeckLoadPayload, DeckSavePayload};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::EditorError;
use crate::submit::{DeckSubmission, FormSubmitter, ImageUpload, SubmitReceipt};

pub use card::{CardKey, EditorCard, FaceDraft, ImageControls, ImageSlot, PickedImage};
pub use format::{FaceTarget, FormatCommand, RichTextWidget};

/// Client-side model of the deck editing form.
///
/// Cards are kept in display order; each carries its own primary key, so
/// reordering never detaches a key from its card.
#[derive(Debug, Clone)]
pub struct DeckEditor {
    name: String,
    description: String,
    uuid: Option<DeckUuid>,
    cards: Vec<EditorCard>,
    next_key: u64,
    policy: SavePolicy,
    media_root: Url,
    warn_on_leave: bool,
    saved: bool,
}

impl DeckEditor {
    /// An unsaved deck with one empty card.
    #[must_use]
    pub fn new_deck(policy: SavePolicy, media_root: Url) -> Self {
        let mut editor = Self {
            name: String::new(),
            description: String::new(),
            uuid: None,
            cards: Vec::new(),
            next_key: 0,
            policy,
            media_root,
            warn_on_leave: true,
            saved: false,
        };
        editor.add_card();
        editor
    }

    /// Populates the editor from the deck the server embedded in the page.
    #[must_use]
    pub fn load(payload: DeckLoadPayload, policy: SavePolicy, media_root: Url) -> Self {
        Self::from_deck(payload.into_deck(), policy, media_root)
    }

    #[must_use]
    pub fn from_deck(deck: Deck, policy: SavePolicy, media_root: Url) -> Self {
        let mut editor = Self {
            name: deck.name,
            description: deck.description,
            uuid: deck.uuid,
            cards: Vec::with_capacity(deck.cards.len()),
            next_key: 0,
            policy,
            media_root,
            warn_on_leave: true,
            saved: false,
        };
        for card in deck.cards {
            let key = editor.allocate_key();
            editor
                .cards
                .push(EditorCard::from_card(key, card, &editor.media_root));
        }
        if editor.cards.is_empty() {
            editor.add_card();
        }
        debug!(cards = editor.cards.len(), update = editor.is_update(), "editor loaded");
        editor
    }

    fn allocate_key(&mut self) -> CardKey {
        let key = CardKey::new(self.next_key);
        self.next_key += 1;
        key
    }

    fn card_mut(&mut self, key: CardKey) -> Result<&mut EditorCard, EditorError> {
        self.cards
            .iter_mut()
            .find(|card| card.key() == key)
            .ok_or(EditorError::UnknownCard(key))
    }

    fn position(&self, key: CardKey) -> Result<usize, EditorError> {
        self.cards
            .iter()
            .position(|card| card.key() == key)
            .ok_or(EditorError::UnknownCard(key))
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn uuid(&self) -> Option<DeckUuid> {
        self.uuid
    }

    #[must_use]
    pub fn is_update(&self) -> bool {
        self.uuid.is_some()
    }

    #[must_use]
    pub fn cards(&self) -> &[EditorCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, key: CardKey) -> Option<&EditorCard> {
        self.cards.iter().find(|card| card.key() == key)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    /// Whether leaving the editor should ask for confirmation.
    #[must_use]
    pub fn warn_on_leave(&self) -> bool {
        self.warn_on_leave
    }

    /// True once the server has accepted this deck; the editor is spent.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    // ─── Editing ──────────────────────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends an empty card and returns its key.
    pub fn add_card(&mut self) -> CardKey {
        let key = self.allocate_key();
        self.cards.push(EditorCard::blank(key));
        key
    }

    /// Removes a card. The last remaining card is never removed; returns
    /// whether anything changed.
    pub fn delete_card(&mut self, key: CardKey) -> bool {
        if self.cards.len() <= 1 {
            return false;
        }
        let before = self.cards.len();
        self.cards.retain(|card| card.key() != key);
        before != self.cards.len()
    }

    /// Moves a card to `to_index`, clamped to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key.
    pub fn move_card(&mut self, key: CardKey, to_index: usize) -> Result<(), EditorError> {
        let from = self.position(key)?;
        let card = self.cards.remove(from);
        let to = to_index.min(self.cards.len());
        self.cards.insert(to, card);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key.
    pub fn set_text(
        &mut self,
        key: CardKey,
        face: Face,
        html: impl Into<RichText>,
    ) -> Result<(), EditorError> {
        self.card_mut(key)?.face_mut(face).text = html.into();
        Ok(())
    }

    /// Attaches a locally picked image; it is uploaded on save.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key and
    /// `EditorError::Media` for paths without a usable file name.
    pub fn attach_image(&mut self, key: CardKey, face: Face, path: &Path) -> Result<(), EditorError> {
        let picked = PickedImage::from_path(path)?;
        self.card_mut(key)?.face_mut(face).image = ImageSlot::Picked(picked);
        Ok(())
    }

    /// Clears the face's image, whether picked or stored.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key.
    pub fn detach_image(&mut self, key: CardKey, face: Face) -> Result<(), EditorError> {
        self.card_mut(key)?.face_mut(face).image = ImageSlot::Empty;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key.
    pub fn image_controls(&self, key: CardKey, face: Face) -> Result<ImageControls, EditorError> {
        let card = self.card(key).ok_or(EditorError::UnknownCard(key))?;
        Ok(ImageControls::for_slot(&card.face(face).image))
    }

    /// Forwards a formatting command to the widget editing `face` of `key`.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::UnknownCard` for a stale key.
    pub fn apply_formatting(
        &self,
        key: CardKey,
        face: Face,
        command: &FormatCommand,
        widget: &mut dyn RichTextWidget,
    ) -> Result<(), EditorError> {
        self.position(key)?;
        widget.focus(FaceTarget { card: key, face });
        widget.exec(command);
        Ok(())
    }

    // ─── Save ─────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns the `DeckError` that blocks saving.
    pub fn check_save(&self) -> Result<(), DeckError> {
        check_save(&self.name, self.cards.len(), &self.policy)
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.saved && self.check_save().is_ok()
    }

    /// Snapshot of the edited deck; picked images take precedence over
    /// stored ones.
    #[must_use]
    pub fn to_deck(&self) -> Deck {
        Deck {
            name: self.name.clone(),
            description: self.description.clone(),
            uuid: self.uuid,
            cards: self.cards.iter().map(EditorCard::to_card).collect(),
        }
    }

    #[must_use]
    pub fn serialize(&self, is_update: bool) -> DeckSavePayload {
        DeckSavePayload::from_deck(&self.to_deck(), is_update)
    }

    /// Picked files in the order the server assigns them to cards.
    ///
    /// A new deck takes its files in card order. An update hands them to the
    /// stored cards first, by primary key, and then to the added cards in
    /// card order. Within a card the term comes before the definition.
    #[must_use]
    pub fn pending_uploads(&self) -> Vec<ImageUpload> {
        let mut order: Vec<&EditorCard> = self.cards.iter().collect();
        if self.is_update() {
            order.sort_by_key(|card| card.pk().map_or((1, 0), |pk| (0, pk.value())));
        }
        order
            .into_iter()
            .flat_map(|card| {
                Face::ALL.into_iter().filter_map(move |face| match &card.face(face).image {
                    ImageSlot::Picked(picked) => Some(ImageUpload {
                        face,
                        source: picked.source.clone(),
                        filename: picked.filename.clone(),
                    }),
                    _ => None,
                })
            })
            .collect()
    }

    /// Builds the form submission without sending it.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::AlreadySaved` after a successful save and
    /// `EditorError::CannotSave` when the save gate fails.
    pub fn prepare_submission(&self) -> Result<DeckSubmission, EditorError> {
        if self.saved {
            return Err(EditorError::AlreadySaved);
        }
        self.check_save()?;
        let payload = self.serialize(self.is_update());
        Ok(DeckSubmission {
            deck_json: payload.to_json()?,
            uploads: self.pending_uploads(),
        })
    }

    /// Validates, serializes and submits the deck form.
    ///
    /// A deck is submitted at most once: after the server accepts it the
    /// leave warning is cleared and further saves are refused, so a second
    /// click can never create the deck twice.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::AlreadySaved` for a spent editor,
    /// `EditorError::CannotSave` when the deck fails the save gate and
    /// `EditorError::Submit` when the submission fails.
    #[instrument(skip_all, fields(cards = self.cards.len(), update = self.is_update()))]
    pub async fn save(
        &mut self,
        submitter: &dyn FormSubmitter,
        csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, EditorError> {
        let submission = self.prepare_submission()?;
        info!(uploads = submission.uploads.len(), "submitting deck");
        let receipt = submitter.submit(&submission, csrf).await?;
        self.saved = true;
        self.warn_on_leave = false;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_core::model::{Card, CardPk, Filename};
    use std::path::PathBuf;

    fn media_root() -> Url {
        Url::parse("http://localhost:8000/media/").unwrap()
    }

    fn editor() -> DeckEditor {
        DeckEditor::new_deck(SavePolicy::default(), media_root())
    }

    fn picked_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[derive(Default)]
    struct RecordingWidget {
        calls: Vec<String>,
    }

    impl RichTextWidget for RecordingWidget {
        fn focus(&mut self, target: FaceTarget) {
            self.calls.push(format!("focus {}", target.element_id()));
        }

        fn exec(&mut self, command: &FormatCommand) {
            self.calls.push(format!("exec {}", command.exec_args().0));
        }
    }

    #[test]
    fn new_deck_starts_with_one_empty_card() {
        let editor = editor();
        assert_eq!(editor.card_count(), 1);
        assert!(!editor.is_update());
        assert!(editor.warn_on_leave());
        assert!(editor.cards()[0].face(Face::Term).text.is_blank());
    }

    #[test]
    fn deleting_the_only_card_is_a_noop() {
        let mut editor = editor();
        let only = editor.cards()[0].key();
        assert!(!editor.delete_card(only));
        assert_eq!(editor.card_count(), 1);
    }

    #[test]
    fn delete_removes_the_addressed_card() {
        let mut editor = editor();
        let first = editor.cards()[0].key();
        let second = editor.add_card();
        editor.set_text(second, Face::Term, "Italy").unwrap();

        assert!(editor.delete_card(first));
        assert_eq!(editor.card_count(), 1);
        assert_eq!(editor.cards()[0].key(), second);
        assert!(!editor.delete_card(first));
    }

    #[test]
    fn added_cards_get_fresh_keys_and_no_pk() {
        let mut editor = editor();
        let a = editor.add_card();
        let b = editor.add_card();
        assert_ne!(a, b);
        assert!(editor.card(a).unwrap().pk().is_none());
    }

    #[test]
    fn can_save_needs_name_and_minimum_cards() {
        let mut editor = editor();
        assert_eq!(editor.check_save(), Err(DeckError::EmptyName));

        editor.set_name("Capitals");
        assert_eq!(
            editor.check_save(),
            Err(DeckError::TooFewCards { min: 2, actual: 1 })
        );

        editor.add_card();
        assert!(editor.can_save());

        editor.set_name("  ");
        assert!(!editor.can_save());
    }

    #[test]
    fn attach_then_detach_image_toggles_controls() {
        let mut editor = editor();
        let key = editor.cards()[0].key();

        editor.attach_image(key, Face::Term, &picked_path("eiffel.png")).unwrap();
        let controls = editor.image_controls(key, Face::Term).unwrap();
        assert!(controls.show_preview && controls.show_delete && !controls.show_upload);
        let slot = &editor.card(key).unwrap().face(Face::Term).image;
        assert_eq!(slot.preview_url().unwrap().scheme(), "file");

        editor.detach_image(key, Face::Term).unwrap();
        let controls = editor.image_controls(key, Face::Term).unwrap();
        assert!(controls.show_upload && !controls.show_preview);
        assert_eq!(editor.serialize(false).cards[0].term_image, "");
    }

    #[test]
    fn picked_image_wins_over_stored_image() {
        let deck = Deck::new("Art", "").with_cards(vec![
            Card::new("Mona Lisa", "Leonardo")
                .with_image(Face::Term, Filename::from_path("old.png").unwrap()),
        ]);
        let mut editor = DeckEditor::from_deck(deck, SavePolicy::default(), media_root());
        let key = editor.cards()[0].key();
        assert_eq!(editor.serialize(false).cards[0].term_image, "old.png");
        assert!(editor.pending_uploads().is_empty());

        editor.attach_image(key, Face::Term, &picked_path("new.png")).unwrap();
        assert_eq!(editor.serialize(false).cards[0].term_image, "new.png");

        let uploads = editor.pending_uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].field(), "term-image");
        assert_eq!(uploads[0].filename.as_str(), "new.png");
    }

    #[test]
    fn primary_keys_follow_cards_when_reordered() {
        let deck = Deck::new("Capitals", "")
            .with_uuid(DeckUuid::new_v4())
            .with_cards(vec![
                Card::new("France", "Paris").with_pk(CardPk::new(1)),
                Card::new("Italy", "Rome").with_pk(CardPk::new(2)),
            ]);
        let mut editor = DeckEditor::from_deck(deck, SavePolicy::default(), media_root());
        let italy = editor.cards()[1].key();
        editor.move_card(italy, 0).unwrap();

        let payload = editor.serialize(true);
        assert_eq!(payload.cards[0].term, "Italy");
        assert_eq!(payload.cards[0].pk, Some(Some(CardPk::new(2))));
        assert_eq!(payload.cards[1].term, "France");
        assert_eq!(payload.cards[1].pk, Some(Some(CardPk::new(1))));
    }

    #[test]
    fn serialize_attaches_pks_only_for_updates() {
        let mut editor = editor();
        editor.add_card();
        assert!(editor.serialize(false).cards.iter().all(|c| c.pk.is_none()));
        assert!(editor.serialize(true).cards.iter().all(|c| c.pk == Some(None)));
    }

    #[test]
    fn formatting_is_forwarded_to_the_widget() {
        let editor = editor();
        let key = editor.cards()[0].key();
        let mut widget = RecordingWidget::default();

        editor
            .apply_formatting(key, Face::Definition, &FormatCommand::Bold, &mut widget)
            .unwrap();
        assert_eq!(
            widget.calls,
            vec![format!("focus card-{}-definition", key.value()), "exec bold".to_string()]
        );

        let stale = CardKey::new(999);
        assert!(matches!(
            editor.apply_formatting(stale, Face::Term, &FormatCommand::Italic, &mut widget),
            Err(EditorError::UnknownCard(_))
        ));
    }

    #[test]
    fn update_uploads_follow_the_server_card_order() {
        let deck = Deck::new("Capitals", "")
            .with_uuid(DeckUuid::new_v4())
            .with_cards(vec![
                Card::new("France", "Paris").with_pk(CardPk::new(10)),
                Card::new("Italy", "Rome").with_pk(CardPk::new(11)),
            ]);
        let mut editor = DeckEditor::from_deck(deck, SavePolicy::default(), media_root());
        let france = editor.cards()[0].key();
        let spain = editor.add_card();
        editor.set_text(spain, Face::Term, "Spain").unwrap();
        editor.attach_image(spain, Face::Term, &picked_path("spain.png")).unwrap();
        editor.attach_image(france, Face::Term, &picked_path("france.png")).unwrap();
        editor.move_card(spain, 0).unwrap();

        let names: Vec<_> = editor
            .pending_uploads()
            .iter()
            .map(|upload| upload.filename.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["france.png", "spain.png"]);
    }

    #[test]
    fn update_uploads_sort_stored_cards_by_pk() {
        let deck = Deck::new("Capitals", "")
            .with_uuid(DeckUuid::new_v4())
            .with_cards(vec![
                Card::new("Italy", "Rome").with_pk(CardPk::new(11)),
                Card::new("France", "Paris").with_pk(CardPk::new(10)),
            ]);
        let mut editor = DeckEditor::from_deck(deck, SavePolicy::default(), media_root());
        let italy = editor.cards()[0].key();
        let france = editor.cards()[1].key();
        editor.attach_image(italy, Face::Definition, &picked_path("rome.png")).unwrap();
        editor.attach_image(france, Face::Definition, &picked_path("paris.png")).unwrap();

        let names: Vec<_> = editor
            .pending_uploads()
            .iter()
            .map(|upload| upload.filename.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["paris.png", "rome.png"]);
    }

    #[test]
    fn new_deck_uploads_keep_card_order() {
        let mut editor = editor();
        let first = editor.cards()[0].key();
        let second = editor.add_card();
        editor.attach_image(first, Face::Term, &picked_path("a.png")).unwrap();
        editor.attach_image(second, Face::Term, &picked_path("b.png")).unwrap();
        editor.move_card(second, 0).unwrap();

        let names: Vec<_> = editor
            .pending_uploads()
            .iter()
            .map(|upload| upload.filename.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["b.png", "a.png"]);
    }

    #[test]
    fn move_card_clamps_to_end() {
        let mut editor = editor();
        let first = editor.cards()[0].key();
        editor.add_card();
        editor.move_card(first, 10).unwrap();
        assert_eq!(editor.cards()[1].key(), first);
    }
}
