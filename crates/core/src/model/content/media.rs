use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaValidationError {
    #[error("Image path has no file name.")]
    EmptyFilename,

    #[error("Media root cannot hold {0}.")]
    InvalidMediaUrl(String),

    #[error("Preview needs an absolute path: {0}")]
    RelativePreviewPath(String),
}

//
// ─── FILENAME ──────────────────────────────────────────────────────────────────
//

/// Basename of an image file, as stored by the server.
///
/// Directory components are never kept: the server resolves basenames against
/// its media root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filename(String);

impl Filename {
    /// Extracts the basename from a file-picker path or a stored image URL.
    ///
    /// Everything up to and including the last `/` or `\` is dropped.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::EmptyFilename` when nothing remains.
    pub fn from_path(raw: impl AsRef<str>) -> Result<Self, MediaValidationError> {
        let raw = raw.as_ref().trim();
        let base = raw
            .rfind(['/', '\\'])
            .map_or(raw, |idx| &raw[idx + 1..]);
        if base.is_empty() {
            return Err(MediaValidationError::EmptyFilename);
        }
        Ok(Self(base.to_string()))
    }

    /// Like [`Filename::from_path`], but maps blank inputs to `None`.
    #[must_use]
    pub fn from_optional_path(raw: impl AsRef<str>) -> Option<Self> {
        Self::from_path(raw).ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuilds the URL under which the server publishes this file.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::InvalidMediaUrl` if the root cannot
    /// carry a path.
    pub fn media_url(&self, media_root: &Url) -> Result<Url, MediaValidationError> {
        let mut url = media_root.clone();
        url.path_segments_mut()
            .map_err(|()| MediaValidationError::InvalidMediaUrl(self.0.clone()))?
            .pop_if_empty()
            .push(&self.0);
        Ok(url)
    }
}

/// Local `file://` URL used to preview a picked image before upload.
///
/// # Errors
///
/// Returns `MediaValidationError::RelativePreviewPath` for relative paths.
pub fn local_preview_url(path: &Path) -> Result<Url, MediaValidationError> {
    Url::from_file_path(path)
        .map_err(|()| MediaValidationError::RelativePreviewPath(path.display().to_string()))
}
