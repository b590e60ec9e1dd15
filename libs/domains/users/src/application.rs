use std::sync::Arc;

use crate::commands::{CreateUserHandler, DeleteUserHandler, UpdateUserHandler, WriteGate};
use crate::queries::{GetUserHandler, ListUsersHandler};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Handlers that mutate the store
pub struct CommandHandlers<R: UserRepository, S: UserService> {
    pub create_user: CreateUserHandler<R, S>,
    pub update_user: UpdateUserHandler<R, S>,
    pub delete_user: DeleteUserHandler<R>,
}

/// Read-only handlers
pub struct QueryHandlers<R: UserRepository> {
    pub get_user: GetUserHandler<R>,
    pub list_users: ListUsersHandler<R>,
}

/// Every use case, wired to one shared repository and service
pub struct ApplicationService<R: UserRepository, S: UserService> {
    pub commands: CommandHandlers<R, S>,
    pub queries: QueryHandlers<R>,
}

impl<R: UserRepository, S: UserService> ApplicationService<R, S> {
    pub fn new(repository: Arc<R>, service: Arc<S>) -> Self {
        let gate = WriteGate::default();

        Self {
            commands: CommandHandlers {
                create_user: CreateUserHandler::new(Arc::clone(&repository), Arc::clone(&service))
                    .with_write_gate(Arc::clone(&gate)),
                update_user: UpdateUserHandler::new(Arc::clone(&repository), service)
                    .with_write_gate(Arc::clone(&gate)),
                delete_user: DeleteUserHandler::new(Arc::clone(&repository)).with_write_gate(gate),
            },
            queries: QueryHandlers {
                get_user: GetUserHandler::new(Arc::clone(&repository)),
                list_users: ListUsersHandler::new(repository),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUserCommand, GetUserQuery};
    use crate::repository::InMemoryUserRepository;
    use crate::service::RepositoryUserService;

    #[test]
    fn test_handlers_share_one_store() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(RepositoryUserService::new(Arc::clone(&repo)));
        let app = ApplicationService::new(repo, service);

        let created = app
            .commands
            .create_user
            .handle(CreateUserCommand {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .unwrap();

        let fetched = app
            .queries
            .get_user
            .handle(GetUserQuery { id: created.id })
            .unwrap();
        assert_eq!(fetched.email, "ada@example.com");
    }
}
