//! Connection settings for the storefront backend.

use crate::model::UserName;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Missing setting: {0}")]
    Missing(&'static str),

    #[error("Invalid base url: {0}")]
    InvalidUrl(String),
}

/// Who is talking to which backend. Passed to [`RestClient::new`](super::RestClient::new).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    pub user: UserName,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: Option<String>, user: UserName) -> Result<Self, SessionError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SessionError::InvalidUrl(base_url));
        }
        Ok(Self { base_url, token, user })
    }

    /// Reads `STOREFRONT_API_URL`, `STOREFRONT_TOKEN` and `STOREFRONT_USER`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SessionError> {
        let present = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());
        let base_url = present("STOREFRONT_API_URL").ok_or(SessionError::Missing("STOREFRONT_API_URL"))?;
        let user = present("STOREFRONT_USER").ok_or(SessionError::Missing("STOREFRONT_USER"))?;
        Self::new(base_url, present("STOREFRONT_TOKEN"), UserName::from(user.trim()))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
