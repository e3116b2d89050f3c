//! API endpoint configuration.
//!
//! One base URL covers every call the suite makes. Sources, highest
//! priority first:
//!
//! 1. `GARDA_API_BASE_URL` environment variable
//! 2. `[api]` section of a TOML config document
//! 3. Caller-provided fallback

use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "GARDA_API_BASE_URL";

/// Resolved endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ConfigDoc {
    api: Option<ApiSection>,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    base_url: String,
}

impl ApiConfig {
    /// Normalizes and stores a base URL; trailing slashes are stripped so
    /// [`endpoint`](Self::endpoint) joins cleanly.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolves from the environment, falling back to `fallback`.
    #[must_use]
    pub fn from_env_or(fallback: impl Into<String>) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.is_empty() => Self::new(value),
            _ => Self::new(fallback),
        }
    }

    /// Reads the `[api]` section of a TOML document, if present.
    ///
    /// # Errors
    ///
    /// Propagates the TOML parse error for a document that exists but does
    /// not parse; a well-formed document without an `[api]` section is
    /// `Ok(None)`.
    pub fn from_toml(doc: &str) -> Result<Option<Self>, toml::de::Error> {
        let doc: ConfigDoc = toml::from_str(doc)?;
        Ok(doc.api.map(|section| Self::new(section.base_url)))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
