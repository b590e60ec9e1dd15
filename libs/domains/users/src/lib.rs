//! Users Domain
//!
//! In-memory user registry with an email-uniqueness rule, organised as
//! command and query handlers over a repository.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────┐
//! │  ApplicationService   │  ← Facade the shell binds to
//! └──────────┬────────────┘
//!            │
//! ┌──────────▼────────────┐
//! │ Commands / Queries    │  ← One handler per use case
//! └──────────┬────────────┘
//!            │
//! ┌──────────▼────────────┐
//! │   UserService         │  ← Validation, email uniqueness
//! └──────────┬────────────┘
//!            │
//! ┌──────────▼────────────┐
//! │   UserRepository      │  ← Storage (trait + in-memory implementation)
//! └──────────┬────────────┘
//!            │
//! ┌──────────▼────────────┐
//! │   Models              │  ← Entity, commands, queries, results
//! └───────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_users::{
//!     ApplicationService, CreateUserCommand, GetUserQuery, InMemoryUserRepository,
//!     RepositoryUserService,
//! };
//!
//! let repository = Arc::new(InMemoryUserRepository::new());
//! let service = Arc::new(RepositoryUserService::new(Arc::clone(&repository)));
//! let app = ApplicationService::new(repository, service);
//!
//! let created = app.commands.create_user.handle(CreateUserCommand {
//!     name: "Ada".to_string(),
//!     email: "ada@example.com".to_string(),
//! })?;
//! let fetched = app.queries.get_user.handle(GetUserQuery { id: created.id })?;
//! assert_eq!(fetched.name, "Ada");
//! # Ok::<(), domain_users::UserError>(())
//! ```

pub mod application;
pub mod commands;
pub mod error;
pub mod id;
pub mod models;
pub mod queries;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use application::{ApplicationService, CommandHandlers, QueryHandlers};
pub use commands::WriteGate;
pub use error::{ErrorKind, ResultExt, UserError, UserResult};
pub use id::UserId;
pub use models::{
    CreateUserCommand, CreateUserResult, DeleteUserCommand, GetUserQuery, GetUserResult,
    ListUsersQuery, ListUsersResult, UpdateUserCommand, UpdateUserResult, User,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{RepositoryUserService, UserService};
