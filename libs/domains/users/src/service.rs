use std::sync::Arc;

use crate::error::{ResultExt, UserError, UserResult};
use crate::id::UserId;
use crate::models::User;
use crate::repository::UserRepository;

/// Business rules for users that need more than the entity itself
pub trait UserService: Send + Sync {
    /// Rules a new user must satisfy
    fn validate_creation(&self, user: &User) -> UserResult<()>;

    /// Rules an updated user must satisfy; currently the creation rules
    fn validate_update(&self, user: &User) -> UserResult<()>;

    /// Whether no user other than `exclude_id` owns `email`
    fn is_email_unique(&self, email: &str, exclude_id: Option<&UserId>) -> UserResult<bool>;
}

/// [`UserService`] backed by a [`UserRepository`] lookup
pub struct RepositoryUserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> RepositoryUserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: UserRepository> UserService for RepositoryUserService<R> {
    fn validate_creation(&self, user: &User) -> UserResult<()> {
        if user.name.trim().is_empty() {
            return Err(UserError::InvalidName);
        }

        if !user.email.contains('@') || !user.email.contains('.') {
            return Err(UserError::InvalidEmail);
        }

        Ok(())
    }

    fn validate_update(&self, user: &User) -> UserResult<()> {
        self.validate_creation(user)
    }

    fn is_email_unique(&self, email: &str, exclude_id: Option<&UserId>) -> UserResult<bool> {
        let existing = self
            .repository
            .get_by_email(email)
            .context("failed to look up user by email")?;

        Ok(match existing {
            None => true,
            Some(user) => exclude_id == Some(&user.id),
        })
    }
}
