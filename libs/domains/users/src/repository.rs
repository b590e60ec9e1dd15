use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{UserError, UserResult};
use crate::id::UserId;
use crate::models::User;

/// Repository trait for User persistence
///
/// Reads hand back owned copies; nothing returned aliases stored state.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Insert a user keyed by its id, overwriting any entry with the same id
    fn create(&self, user: User) -> UserResult<()>;

    /// Get a user by ID
    fn get_by_id(&self, id: &UserId) -> UserResult<Option<User>>;

    /// Get the first user with exactly this email
    fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Replace an existing user; `NotFound` if the id is absent
    fn update(&self, user: User) -> UserResult<()>;

    /// Remove a user; `NotFound` if the id is absent
    fn delete(&self, id: &UserId) -> UserResult<()>;

    /// A page of users, clipped to the stored range, with the total count
    ///
    /// Both come from the same snapshot.
    fn list(&self, limit: usize, offset: usize) -> UserResult<(Vec<User>, usize)>;

    /// Number of stored users
    fn count(&self) -> UserResult<usize>;
}

/// In-memory implementation of UserRepository
///
/// Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, user: User) -> UserResult<()> {
        let mut users = self.users.write()?;

        let user_id = user.id.clone();
        if users.insert(user_id.clone(), user).is_some() {
            tracing::warn!(user_id = %user_id, "User id collision, previous entry overwritten");
        }

        tracing::debug!(user_id = %user_id, "Stored user");
        Ok(())
    }

    fn get_by_id(&self, id: &UserId) -> UserResult<Option<User>> {
        let users = self.users.read()?;
        Ok(users.get(id).cloned())
    }

    fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read()?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    fn update(&self, user: User) -> UserResult<()> {
        let mut users = self.users.write()?;

        match users.get_mut(&user.id) {
            Some(existing) => {
                tracing::debug!(user_id = %user.id, "Updated user");
                *existing = user;
                Ok(())
            }
            None => Err(UserError::NotFound(user.id)),
        }
    }

    fn delete(&self, id: &UserId) -> UserResult<()> {
        let mut users = self.users.write()?;

        if users.remove(id).is_some() {
            tracing::debug!(user_id = %id, "Deleted user");
            Ok(())
        } else {
            Err(UserError::NotFound(id.clone()))
        }
    }

    fn list(&self, limit: usize, offset: usize) -> UserResult<(Vec<User>, usize)> {
        let users = self.users.read()?;

        let mut page: Vec<&User> = users.values().collect();
        page.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let page = page
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, users.len()))
    }

    fn count(&self) -> UserResult<usize> {
        let users = self.users.read()?;
        Ok(users.len())
    }
}
