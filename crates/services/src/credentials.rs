//! Password encryption for sign-in style forms.
//!
//! Before a sensitive form is posted, the client fetches the server's public
//! key and replaces the value of every password input with its ciphertext.
//! The cipher itself is supplied by the caller.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use quizcards_core::page::{
    CSRF_FIELD, CSRF_HEADER, CsrfToken, PageElement, csrf_token, descendants,
    for_each_descendant_mut,
};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::with_trailing_slash;
use crate::error::CredentialsError;

/// Public key as served by `PUT {server}/key/`.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(String);

impl PublicKey {
    /// # Errors
    ///
    /// Returns `CredentialsError::EmptyKey` for a blank body.
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialsError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CredentialsError::EmptyKey);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({} bytes)", self.0.len())
    }
}

#[async_trait]
pub trait KeyClient: Send + Sync {
    /// # Errors
    ///
    /// Returns `CredentialsError` if the key cannot be fetched.
    async fn fetch_public_key(&self, csrf: Option<&CsrfToken>) -> Result<PublicKey, CredentialsError>;

    /// Posts the prepared fields to the form's `action`, relative to the
    /// server root. Returns the page the server redirected to.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if the post fails or is rejected.
    async fn submit_form(
        &self,
        action: &str,
        fields: &[(String, String)],
        csrf: Option<&CsrfToken>,
    ) -> Result<Url, CredentialsError>;
}

/// Encrypts one plaintext value with the server's public key.
pub trait PasswordCipher: Send + Sync {
    /// # Errors
    ///
    /// Returns `CredentialsError::Cipher` when the key or plaintext is rejected.
    fn encrypt(&self, key: &PublicKey, plaintext: &str) -> Result<String, CredentialsError>;
}

/// Fetches the key with `PUT {server}/key/`.
#[derive(Clone)]
pub struct HttpKeyClient {
    client: Client,
    server_url: Url,
    endpoint: Url,
}

impl HttpKeyClient {
    /// # Errors
    ///
    /// Returns `url::ParseError` if the key endpoint cannot be derived.
    pub fn new(server_url: &Url) -> Result<Self, url::ParseError> {
        let server_url = with_trailing_slash(server_url.clone());
        let endpoint = server_url.join("key/")?;
        Ok(Self {
            client: Client::new(),
            server_url,
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl KeyClient for HttpKeyClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn fetch_public_key(&self, csrf: Option<&CsrfToken>) -> Result<PublicKey, CredentialsError> {
        let mut request = self.client.put(self.endpoint.clone());
        if let Some(token) = csrf {
            request = request.header(CSRF_HEADER, token.as_str());
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CredentialsError::HttpStatus(response.status()));
        }
        PublicKey::new(response.text().await?)
    }

    #[instrument(skip_all, fields(action = %action))]
    async fn submit_form(
        &self,
        action: &str,
        fields: &[(String, String)],
        csrf: Option<&CsrfToken>,
    ) -> Result<Url, CredentialsError> {
        let target = self
            .server_url
            .join(action)
            .map_err(|err| CredentialsError::InvalidAction(err.to_string()))?;
        let mut request = self.client.post(target).form(fields);
        if let Some(token) = csrf {
            request = request.header(CSRF_HEADER, token.as_str());
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CredentialsError::HttpStatus(response.status()));
        }
        Ok(response.url().clone())
    }
}

/// The form after encryption, flattened to the fields it will post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCredentials {
    pub fields: Vec<(String, String)>,
    pub encrypted: usize,
}

#[derive(Clone)]
pub struct CredentialEncryptor {
    keys: Arc<dyn KeyClient>,
    cipher: Arc<dyn PasswordCipher>,
}

impl CredentialEncryptor {
    #[must_use]
    pub fn new(keys: Arc<dyn KeyClient>, cipher: Arc<dyn PasswordCipher>) -> Self {
        Self { keys, cipher }
    }

    /// Encrypts every password input of `form` in place.
    ///
    /// The key is requested once, carrying the form's CSRF token. On any
    /// failure the form is left untouched and nothing should be submitted.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if the key request or an encryption fails.
    #[instrument(skip_all)]
    pub async fn prepare(&self, form: &mut PageElement) -> Result<PreparedCredentials, CredentialsError> {
        let csrf = csrf_token(form);
        let key = self.keys.fetch_public_key(csrf.as_ref()).await.map_err(|err| {
            warn!(error = %err, "public key request failed");
            err
        })?;

        let mut encrypted_form = form.clone();
        let mut encrypted = 0;
        let mut failure = None;
        for_each_descendant_mut(&mut encrypted_form, &mut |input: &mut PageElement| {
            if failure.is_some() || !input.is_input_of_type("password") {
                return;
            }
            match self.cipher.encrypt(&key, input.value()) {
                Ok(ciphertext) => {
                    input.set_value(ciphertext);
                    encrypted += 1;
                }
                Err(err) => failure = Some(err),
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }

        *form = encrypted_form;
        debug!(encrypted, "credentials encrypted");
        Ok(PreparedCredentials {
            fields: form_fields(form),
            encrypted,
        })
    }

    /// Prepares `form` and posts it once to its `action`.
    ///
    /// Nothing is posted when preparation fails. The server answers a
    /// rejected form by redirecting back to it, which is reported as
    /// `CredentialsError::Rejected`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` from preparation or from the post.
    pub async fn submit(&self, form: &mut PageElement) -> Result<Url, CredentialsError> {
        let prepared = self.prepare(form).await?;
        if !has_csrf_field(&prepared.fields) {
            warn!("sensitive form carries no CSRF field");
        }
        let action = form.attr("action").unwrap_or_default().to_string();
        let csrf = csrf_token(form);
        let landed_on = self
            .keys
            .submit_form(&action, &prepared.fields, csrf.as_ref())
            .await?;
        if returned_to_form(&action, &landed_on) {
            debug!(%landed_on, "form sent back by the server");
            return Err(CredentialsError::Rejected(landed_on));
        }
        Ok(landed_on)
    }
}

/// `(name, value)` pairs of every named input below `form`, CSRF included.
#[must_use]
pub fn form_fields(form: &PageElement) -> Vec<(String, String)> {
    descendants(form)
        .into_iter()
        .filter(|element| element.tag.eq_ignore_ascii_case("input"))
        .filter_map(|input| {
            input
                .name()
                .map(|name| (name.to_string(), input.value().to_string()))
        })
        .collect()
}

/// Whether `fields` carries the anti-forgery token.
#[must_use]
pub fn has_csrf_field(fields: &[(String, String)]) -> bool {
    fields.iter().any(|(name, _)| name == CSRF_FIELD)
}

/// Whether the redirect after posting to `action` led back to the form.
#[must_use]
pub fn returned_to_form(action: &str, landed_on: &Url) -> bool {
    let action = action.trim_matches('/');
    if action.is_empty() {
        return false;
    }
    let path = landed_on.path().trim_end_matches('/');
    path == action || path.ends_with(&format!("/{action}"))
}
