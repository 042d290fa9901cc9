use std::env;

use quizcards_core::model::{Face, SavePolicy};
use quizcards_core::page::CsrfToken;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/";

/// Runtime settings shared by the client components.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub server_url: Url,
    pub media_url: Url,
    pub save_policy: SavePolicy,
    pub start_with: Face,
    pub csrf_token: Option<CsrfToken>,
}

impl ClientConfig {
    /// Defaults derived from a server base URL; media lives under `media/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the media root cannot be derived.
    pub fn for_server(server_url: Url) -> Result<Self, ConfigError> {
        let server_url = with_trailing_slash(server_url);
        let media_url = server_url
            .join("media/")
            .map_err(|_| ConfigError::InvalidUrl {
                name: "media url",
                raw: server_url.to_string(),
            })?;
        Ok(Self {
            server_url,
            media_url,
            save_policy: SavePolicy::default(),
            start_with: Face::Term,
            csrf_token: None,
        })
    }

    /// Reads `QUIZCARDS_*` variables, falling back to defaults for unset ones.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_raw =
            env::var("QUIZCARDS_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.into());
        let mut config = Self::for_server(parse_url("QUIZCARDS_SERVER_URL", &server_raw)?)?;

        if let Ok(raw) = env::var("QUIZCARDS_MEDIA_URL") {
            config.media_url = with_trailing_slash(parse_url("QUIZCARDS_MEDIA_URL", &raw)?);
        }
        if let Ok(raw) = env::var("QUIZCARDS_MIN_CARDS") {
            config.save_policy = parse_save_policy("QUIZCARDS_MIN_CARDS", &raw)?;
        }
        if let Ok(raw) = env::var("QUIZCARDS_START_WITH") {
            config.start_with = raw.parse()?;
        }
        config.csrf_token = env::var("QUIZCARDS_CSRF_TOKEN").ok().and_then(CsrfToken::new);

        Ok(config)
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidUrl` when `raw` is not an absolute URL.
pub fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
        name,
        raw: raw.to_string(),
    })
}

/// # Errors
///
/// Returns `ConfigError::InvalidNumber` unless `raw` is a positive integer.
pub fn parse_save_policy(name: &'static str, raw: &str) -> Result<SavePolicy, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(min) if min > 0 => Ok(SavePolicy::new(min)),
        _ => Err(ConfigError::InvalidNumber {
            name,
            raw: raw.to_string(),
        }),
    }
}

// `Url::join` treats the last segment as a file unless the path ends in '/'.
#[must_use]
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
