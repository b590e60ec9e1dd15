use std::sync::{Arc, Mutex};

use crate::error::{ResultExt, UserError, UserResult};
use crate::models::{
    CreateUserCommand, CreateUserResult, DeleteUserCommand, UpdateUserCommand, UpdateUserResult,
    User,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Held from the uniqueness check until the write lands.
///
/// Handlers that can race on the same email must share one gate.
pub type WriteGate = Arc<Mutex<()>>;

/// Creates users, enforcing validation and email uniqueness
pub struct CreateUserHandler<R: UserRepository, S: UserService> {
    repository: Arc<R>,
    service: Arc<S>,
    gate: WriteGate,
}

impl<R: UserRepository, S: UserService> CreateUserHandler<R, S> {
    pub fn new(repository: Arc<R>, service: Arc<S>) -> Self {
        Self {
            repository,
            service,
            gate: WriteGate::default(),
        }
    }

    /// Share `gate` with the other write handlers on the same store
    pub fn with_write_gate(mut self, gate: WriteGate) -> Self {
        self.gate = gate;
        self
    }

    #[tracing::instrument(skip(self, cmd), fields(email = %cmd.email))]
    pub fn handle(&self, cmd: CreateUserCommand) -> UserResult<CreateUserResult> {
        let user = User::new(cmd.name, cmd.email);

        user.validate().context("invalid user data")?;

        self.service
            .validate_creation(&user)
            .context("user creation validation failed")?;

        let _guard = self.gate.lock()?;
        let is_unique = self
            .service
            .is_email_unique(&user.email, None)
            .context("failed to check email uniqueness")?;
        if !is_unique {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let result = CreateUserResult::from(&user);
        self.repository
            .create(user)
            .context("failed to create user")?;

        tracing::info!(user_id = %result.id, "Created user");
        Ok(result)
    }
}

/// Applies partial updates, keeping emails unique
pub struct UpdateUserHandler<R: UserRepository, S: UserService> {
    repository: Arc<R>,
    service: Arc<S>,
    gate: WriteGate,
}

impl<R: UserRepository, S: UserService> UpdateUserHandler<R, S> {
    pub fn new(repository: Arc<R>, service: Arc<S>) -> Self {
        Self {
            repository,
            service,
            gate: WriteGate::default(),
        }
    }

    pub fn with_write_gate(mut self, gate: WriteGate) -> Self {
        self.gate = gate;
        self
    }

    #[tracing::instrument(skip(self, cmd), fields(user_id = %cmd.id))]
    pub fn handle(&self, cmd: UpdateUserCommand) -> UserResult<UpdateUserResult> {
        cmd.id.validate()?;

        // Read-modify-write: concurrent updates of one user must not interleave
        let _guard = self.gate.lock()?;
        let mut user = self
            .repository
            .get_by_id(&cmd.id)
            .context("failed to get user")?
            .ok_or_else(|| UserError::NotFound(cmd.id.clone()))?;

        if let Some(name) = cmd.name {
            user.update_name(name);
        }
        if let Some(email) = cmd.email {
            user.update_email(email);
        }

        user.validate().context("invalid user data")?;

        self.service
            .validate_update(&user)
            .context("user update validation failed")?;

        let is_unique = self
            .service
            .is_email_unique(&user.email, Some(&user.id))
            .context("failed to check email uniqueness")?;
        if !is_unique {
            return Err(UserError::DuplicateEmail(user.email));
        }

        self.repository
            .update(user.clone())
            .context("failed to update user")?;

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user.into())
    }
}

/// Removes users permanently
pub struct DeleteUserHandler<R: UserRepository> {
    repository: Arc<R>,
    gate: WriteGate,
}

impl<R: UserRepository> DeleteUserHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            gate: WriteGate::default(),
        }
    }

    pub fn with_write_gate(mut self, gate: WriteGate) -> Self {
        self.gate = gate;
        self
    }

    #[tracing::instrument(skip(self, cmd), fields(user_id = %cmd.id))]
    pub fn handle(&self, cmd: DeleteUserCommand) -> UserResult<()> {
        cmd.id.validate()?;

        let _guard = self.gate.lock()?;
        self.repository
            .delete(&cmd.id)
            .context("failed to delete user")?;

        tracing::info!(user_id = %cmd.id, "Deleted user");
        Ok(())
    }
}
