//! Check-in links: the fixed roll-call base URL plus a `token` query parameter

use crate::error::{Error, Result};
use crate::token::CheckinToken;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Base address every check-in link points at
pub const BASE_URL: &str = "https://cu-roll-call.vercel.app/";

/// Name of the query parameter carrying the token
pub const TOKEN_PARAM: &str = "token";

/// A generated check-in link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinLink {
    url: String,
    token: CheckinToken,
}

impl CheckinLink {
    /// Build the link for `token` on top of [`BASE_URL`].
    pub fn new(token: CheckinToken) -> Result<Self> {
        let mut url = Url::parse(BASE_URL)?;
        url.query_pairs_mut()
            .append_pair(TOKEN_PARAM, &token.to_string());

        Ok(Self {
            url: url.into(),
            token,
        })
    }

    /// Build a link around a freshly generated token.
    pub fn generate() -> Result<Self> {
        Self::new(CheckinToken::generate())
    }

    /// Parse a link previously produced by [`CheckinLink::new`].
    ///
    /// The link must start with [`BASE_URL`] and carry exactly one `token`
    /// parameter holding a valid token. Other parameters are ignored.
    pub fn parse(value: &str) -> Result<Self> {
        if !value.starts_with(BASE_URL) {
            return Err(Error::InvalidLink(format!(
                "'{value}' does not start with {BASE_URL}"
            )));
        }

        let url = Url::parse(value)?;
        let mut tokens = url
            .query_pairs()
            .filter(|(key, _)| key == TOKEN_PARAM)
            .map(|(_, v)| v.into_owned());

        let token = match (tokens.next(), tokens.next()) {
            (Some(token), None) => CheckinToken::parse(&token)?,
            (None, _) => {
                return Err(Error::InvalidLink(format!(
                    "'{value}' has no {TOKEN_PARAM} parameter"
                )));
            }
            (Some(_), Some(_)) => {
                return Err(Error::InvalidLink(format!(
                    "'{value}' has more than one {TOKEN_PARAM} parameter"
                )));
            }
        };

        Ok(Self {
            url: value.to_string(),
            token,
        })
    }

    /// The full URL
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The token embedded in the URL
    pub fn token(&self) -> CheckinToken {
        self.token
    }

    /// Consume the link, returning the URL string
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for CheckinLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
