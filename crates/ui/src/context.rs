use std::sync::{Arc, Mutex};

use quizcards_core::model::{Deck, DeckSummary};
use quizcards_core::wire::DeckLoadPayload;
use services::{ClientConfig, CredentialEncryptor, DeckEditor, FormSubmitter};

pub trait UiApp: Send + Sync {
    fn config(&self) -> ClientConfig;

    /// Deck the page was opened on; `None` opens the editor on a new deck.
    fn deck(&self) -> Option<DeckLoadPayload>;
    fn deck_list(&self) -> Vec<DeckSummary>;

    fn submitter(&self) -> Arc<dyn FormSubmitter>;
    fn credentials(&self) -> Option<CredentialEncryptor>;
}

#[derive(Clone)]
pub struct AppContext {
    config: Arc<ClientConfig>,
    deck: Option<Arc<DeckLoadPayload>>,
    deck_list: Arc<Vec<DeckSummary>>,
    submitter: Arc<dyn FormSubmitter>,
    credentials: Option<CredentialEncryptor>,
    draft: Arc<Mutex<Option<DeckEditor>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: Arc::new(app.config()),
            deck: app.deck().map(Arc::new),
            deck_list: Arc::new(app.deck_list()),
            submitter: app.submitter(),
            credentials: app.credentials(),
            draft: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The loaded deck with images reduced to file names.
    #[must_use]
    pub fn deck(&self) -> Option<Deck> {
        self.deck.as_deref().cloned().map(DeckLoadPayload::into_deck)
    }

    /// A fresh editor over the loaded deck, or over a new one.
    #[must_use]
    pub fn open_editor(&self) -> DeckEditor {
        let policy = self.config.save_policy;
        let media = self.config.media_url.clone();
        match self.deck.as_deref() {
            Some(payload) => DeckEditor::load(payload.clone(), policy, media),
            None => DeckEditor::new_deck(policy, media),
        }
    }

    /// The editor the user left with unsaved changes, or a fresh one.
    #[must_use]
    pub fn resume_editor(&self) -> DeckEditor {
        let parked = self.draft.lock().ok().and_then(|slot| slot.clone());
        parked.unwrap_or_else(|| self.open_editor())
    }

    /// Keeps `editor` for [`AppContext::resume_editor`] while it has unsaved
    /// changes; a saved editor clears the slot.
    pub fn park_editor(&self, editor: &DeckEditor) {
        if let Ok(mut slot) = self.draft.lock() {
            *slot = editor.warn_on_leave().then(|| editor.clone());
        }
    }

    /// Whether a draft with unsaved changes is waiting in the editor.
    #[must_use]
    pub fn has_unsaved_draft(&self) -> bool {
        self.draft.lock().is_ok_and(|slot| slot.is_some())
    }

    #[must_use]
    pub fn deck_list(&self) -> Arc<Vec<DeckSummary>> {
        Arc::clone(&self.deck_list)
    }

    #[must_use]
    pub fn submitter(&self) -> Arc<dyn FormSubmitter> {
        Arc::clone(&self.submitter)
    }

    #[must_use]
    pub fn credentials(&self) -> Option<CredentialEncryptor> {
        self.credentials.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_harness::{NoopSubmitter, test_app};

    #[test]
    fn unsaved_draft_survives_leaving_the_editor() {
        let ctx = build_app_context(&test_app(None));
        let mut editor = ctx.resume_editor();
        editor.set_name("Draft");
        editor.add_card();
        ctx.park_editor(&editor);

        assert!(ctx.has_unsaved_draft());
        let resumed = ctx.resume_editor();
        assert_eq!(resumed.name(), "Draft");
        assert_eq!(resumed.card_count(), 2);
    }

    #[tokio::test]
    async fn saved_editor_clears_the_draft() {
        let ctx = build_app_context(&test_app(None));
        let mut editor = ctx.resume_editor();
        editor.set_name("Capitals");
        editor.add_card();
        ctx.park_editor(&editor);

        editor.save(&NoopSubmitter, None).await.unwrap();
        ctx.park_editor(&editor);

        assert!(!ctx.has_unsaved_draft());
        let fresh = ctx.resume_editor();
        assert_eq!(fresh.name(), "");
        assert!(!fresh.is_saved());
    }
}
