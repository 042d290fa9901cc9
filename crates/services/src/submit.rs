use std::path::PathBuf;

use async_trait::async_trait;
use quizcards_core::model::{Face, Filename};
use quizcards_core::page::{CSRF_FIELD, CSRF_HEADER, CsrfToken};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};
use url::Url;

use crate::config::with_trailing_slash;
use crate::error::SubmitError;

/// Name of the form field holding the JSON deck document.
pub const DECK_FIELD: &str = "deck";

/// A picked image travelling with the deck form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub face: Face,
    pub source: PathBuf,
    pub filename: Filename,
}

impl ImageUpload {
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.face.image_field()
    }
}

/// Everything the editor form posts on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSubmission {
    pub deck_json: String,
    pub uploads: Vec<ImageUpload>,
}

/// Where the server sent the browser after accepting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub landed_on: Url,
}

#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// # Errors
    ///
    /// Returns `SubmitError` when the form cannot be sent or is rejected.
    async fn submit(
        &self,
        submission: &DeckSubmission,
        csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, SubmitError>;
}

/// Posts the editor form as `multipart/form-data` to `{server}/editor/`.
#[derive(Clone)]
pub struct HttpFormSubmitter {
    client: Client,
    endpoint: Url,
}

impl HttpFormSubmitter {
    /// # Errors
    ///
    /// Returns `url::ParseError` if the editor endpoint cannot be derived.
    pub fn new(server_url: &Url) -> Result<Self, url::ParseError> {
        let endpoint = with_trailing_slash(server_url.clone()).join("editor/")?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn build_form(
        submission: &DeckSubmission,
        csrf: Option<&CsrfToken>,
    ) -> Result<Form, SubmitError> {
        let mut form = Form::new().text(DECK_FIELD, submission.deck_json.clone());
        if let Some(token) = csrf {
            form = form.text(CSRF_FIELD, token.as_str().to_string());
        }
        for upload in &submission.uploads {
            let bytes = tokio::fs::read(&upload.source)
                .await
                .map_err(|source| SubmitError::ReadImage {
                    path: upload.source.display().to_string(),
                    source,
                })?;
            let part = Part::bytes(bytes).file_name(upload.filename.as_str().to_string());
            form = form.part(upload.field(), part);
        }
        Ok(form)
    }
}

#[async_trait]
impl FormSubmitter for HttpFormSubmitter {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, uploads = submission.uploads.len()))]
    async fn submit(
        &self,
        submission: &DeckSubmission,
        csrf: Option<&CsrfToken>,
    ) -> Result<SubmitReceipt, SubmitError> {
        let form = Self::build_form(submission, csrf).await?;
        let mut request = self.client.post(self.endpoint.clone()).multipart(form);
        if let Some(token) = csrf {
            request = request.header(CSRF_HEADER, token.as_str());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SubmitError::HttpStatus(response.status()));
        }
        debug!(landed_on = %response.url(), "deck form accepted");
        Ok(SubmitReceipt {
            landed_on: response.url().clone(),
        })
    }
}
