use serde::{Deserialize, Serialize};
use std::sync::PoisonError;
use thiserror::Error;

use crate::id::UserId;

/// Stable error category callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid user name")]
    InvalidName,

    #[error("Invalid user email")]
    InvalidEmail,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Adds a layer of context while keeping the wrapped error as the source
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<UserError>,
    },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Wrap `self` with a message describing the failed step
    pub fn wrap(self, context: impl Into<String>) -> Self {
        UserError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Category of the innermost error; context layers are transparent.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidName | UserError::InvalidEmail | UserError::Validation(_) => {
                ErrorKind::Validation
            }
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::DuplicateEmail(_) => ErrorKind::Conflict,
            UserError::Internal(_) => ErrorKind::Internal,
            UserError::Context { source, .. } => source.kind(),
        }
    }

    /// The innermost error beneath all context layers
    pub fn root(&self) -> &UserError {
        let mut current = self;
        while let UserError::Context { source, .. } = current {
            current = &**source;
        }
        current
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }
}

impl<T> From<PoisonError<T>> for UserError {
    fn from(err: PoisonError<T>) -> Self {
        tracing::error!("User store lock poisoned: {}", err);
        UserError::Internal("user store lock poisoned".to_string())
    }
}

/// Context wrapping for [`UserResult`]
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> UserResult<T>;
}

impl<T> ResultExt<T> for UserResult<T> {
    fn context(self, context: impl Into<String>) -> UserResult<T> {
        self.map_err(|e| e.wrap(context))
    }
}
