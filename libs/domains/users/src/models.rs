use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{UserError, UserResult};
use crate::id::UserId;

/// Format a timestamp the way results expose it, e.g. `2024-05-01T12:30:00Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, fixed at creation
    pub id: UserId,
    /// User display name
    pub name: String,
    /// User email (unique)
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier; both timestamps share one clock reading
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn update_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.updated_at = Utc::now();
    }

    /// Structural check: name and email must be present
    pub fn validate(&self) -> UserResult<()> {
        if self.name.is_empty() {
            return Err(UserError::InvalidName);
        }
        if self.email.is_empty() {
            return Err(UserError::InvalidEmail);
        }
        Ok(())
    }
}

/// Command to create a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
}

/// Result of creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResult {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for CreateUserResult {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

/// Command to update a user; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserCommand {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Command to delete a user
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserCommand {
    pub id: UserId,
}

/// Query for a single user
#[derive(Debug, Clone, Deserialize)]
pub struct GetUserQuery {
    pub id: UserId,
}

/// Full public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserResult {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for GetUserResult {
    fn from(user: User) -> Self {
        Self {
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Result of updating a user
pub type UpdateUserResult = GetUserResult;

/// Query for a page of users
#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> usize {
    50
}

/// A page of users plus the store population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResult {
    pub users: Vec<GetUserResult>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
