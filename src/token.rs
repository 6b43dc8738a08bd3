//! Random check-in tokens
//!
//! A token is a UUID v4 (122 random bits) rendered as 32 lowercase hex
//! characters. Tokens are never stored; each one lives only for
//! the call that embeds it into a link.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of hex characters in a rendered token
pub const TOKEN_HEX_LEN: usize = 32;

/// A random identifier that makes each check-in link unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheckinToken(Uuid);

impl CheckinToken {
    /// Draw a fresh token from the OS random source.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token from its 32-character lowercase hex form.
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != TOKEN_HEX_LEN {
            return Err(Error::InvalidToken(format!(
                "expected {TOKEN_HEX_LEN} hex characters, got {}",
                value.len()
            )));
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(Error::InvalidToken(format!(
                "'{value}' is not lowercase hex"
            )));
        }

        let mut bytes = [0u8; 16];
        hex::decode_to_slice(value, &mut bytes)?;
        Ok(Self(Uuid::from_bytes(bytes)))
    }

    /// Raw 16 bytes of the token
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CheckinToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for CheckinToken {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CheckinToken {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CheckinToken> for String {
    fn from(token: CheckinToken) -> Self {
        token.to_string()
    }
}
