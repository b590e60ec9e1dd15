use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{UserError, UserResult};

const ID_BYTES: usize = 16;
const MIN_ID_LEN: usize = 8;

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh identifier: 16 random bytes, hex-encoded
    pub fn generate() -> Self {
        let bytes: [u8; ID_BYTES] = rand::random();
        Self(const_hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the identifier is well formed before using it for a lookup
    pub fn validate(&self) -> UserResult<()> {
        if self.is_empty() {
            return Err(UserError::Validation("ID cannot be empty".to_string()));
        }
        if self.0.len() < MIN_ID_LEN {
            return Err(UserError::Validation(format!(
                "ID must be at least {} characters long",
                MIN_ID_LEN
            )));
        }
        Ok(())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
