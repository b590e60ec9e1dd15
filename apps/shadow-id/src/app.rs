use std::sync::Arc;

use core_config::{AppInfo, StorageDriver};
use domain_users::{
    ApplicationService, CreateUserCommand, CreateUserResult, DeleteUserCommand, GetUserQuery,
    GetUserResult, InMemoryUserRepository, ListUsersQuery, ListUsersResult,
    RepositoryUserService, UpdateUserCommand, UpdateUserResult, UserId, UserResult,
};
use tracing::{error, info};

use crate::config::Config;

type Repository = InMemoryUserRepository;
type Service = RepositoryUserService<Repository>;

/// Methods the GUI shell can invoke
pub struct App {
    config: Config,
    app_service: ApplicationService<Repository, Service>,
}

impl App {
    /// Wire repository, service and handlers for the configured storage driver
    pub fn new(config: Config) -> Self {
        let repository = match config.storage.driver {
            StorageDriver::Memory => Arc::new(InMemoryUserRepository::new()),
        };
        let service = Arc::new(RepositoryUserService::new(Arc::clone(&repository)));
        let app_service = ApplicationService::new(repository, service);

        Self {
            config,
            app_service,
        }
    }

    /// Called once the shell is ready to dispatch calls
    pub fn startup(&self) {
        info!(
            name = %self.config.app.name,
            version = %self.config.app.version,
            "Application started successfully"
        );
    }

    pub fn greet(&self, name: &str) -> String {
        info!(name, "Greet method called");
        format!("Hello {}, It's show time!", name)
    }

    pub fn create_user(&self, name: String, email: String) -> UserResult<CreateUserResult> {
        info!(name = %name, email = %email, "CreateUser method called");

        let result = self
            .app_service
            .commands
            .create_user
            .handle(CreateUserCommand { name, email })
            .inspect_err(|e| error!(error = %e, "Failed to create user"))?;

        info!(id = %result.id, "User created successfully");
        Ok(result)
    }

    pub fn get_user(&self, id: String) -> UserResult<GetUserResult> {
        info!(id = %id, "GetUser method called");

        let result = self
            .app_service
            .queries
            .get_user
            .handle(GetUserQuery { id: UserId::from(id) })
            .inspect_err(|e| error!(error = %e, "Failed to get user"))?;

        info!(id = %result.id, "User retrieved successfully");
        Ok(result)
    }

    pub fn update_user(
        &self,
        id: String,
        name: Option<String>,
        email: Option<String>,
    ) -> UserResult<UpdateUserResult> {
        info!(id = %id, ?name, ?email, "UpdateUser method called");

        let result = self
            .app_service
            .commands
            .update_user
            .handle(UpdateUserCommand {
                id: UserId::from(id),
                name,
                email,
            })
            .inspect_err(|e| error!(error = %e, "Failed to update user"))?;

        info!(id = %result.id, "User updated successfully");
        Ok(result)
    }

    pub fn delete_user(&self, id: String) -> UserResult<()> {
        info!(id = %id, "DeleteUser method called");

        let id = UserId::from(id);
        self.app_service
            .commands
            .delete_user
            .handle(DeleteUserCommand { id: id.clone() })
            .inspect_err(|e| error!(error = %e, "Failed to delete user"))?;

        info!(id = %id, "User deleted successfully");
        Ok(())
    }

    pub fn list_users(&self, query: ListUsersQuery) -> UserResult<ListUsersResult> {
        info!(limit = query.limit, offset = query.offset, "ListUsers method called");

        let result = self
            .app_service
            .queries
            .list_users
            .handle(query)
            .inspect_err(|e| error!(error = %e, "Failed to list users"))?;

        info!(count = result.users.len(), total = result.total, "Users listed successfully");
        Ok(result)
    }

    pub fn app_info(&self) -> &AppInfo {
        &self.config.app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_greet() {
        assert_eq!(app().greet("Ada"), "Hello Ada, It's show time!");
    }

    #[test]
    fn test_create_and_get_user() {
        let app = app();
        let created = app
            .create_user("Ada".to_string(), "ada@example.com".to_string())
            .unwrap();

        let fetched = app.get_user(created.id.to_string()).unwrap();
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn test_update_and_delete_user() {
        let app = app();
        let created = app
            .create_user("Ada".to_string(), "ada@example.com".to_string())
            .unwrap();
        let id = created.id.to_string();

        let updated = app
            .update_user(id.clone(), Some("Countess".to_string()), None)
            .unwrap();
        assert_eq!(updated.name, "Countess");

        app.delete_user(id.clone()).unwrap();
        assert!(app.get_user(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_users() {
        let app = app();
        app.create_user("Ada".to_string(), "ada@example.com".to_string())
            .unwrap();

        let page = app.list_users(ListUsersQuery::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.users.len(), 1);
    }

    #[test]
    fn test_app_info_reflects_config() {
        let info = app().app_info().clone();
        assert_eq!(info.name, "shadow-id");
        assert_eq!(info.version, "1.0.0");
    }
}
