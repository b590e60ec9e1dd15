use std::sync::Arc;

use crate::error::{ResultExt, UserError, UserResult};
use crate::models::{GetUserQuery, GetUserResult, ListUsersQuery, ListUsersResult};
use crate::repository::UserRepository;

/// Fetches a single user by id
pub struct GetUserHandler<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> GetUserHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// A missing user is reported as `NotFound`, distinct from a storage failure
    pub fn handle(&self, query: GetUserQuery) -> UserResult<GetUserResult> {
        let user = self
            .repository
            .get_by_id(&query.id)
            .context("failed to get user")?
            .ok_or(UserError::NotFound(query.id))?;

        Ok(user.into())
    }
}

/// Pages through stored users
pub struct ListUsersHandler<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> ListUsersHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn handle(&self, query: ListUsersQuery) -> UserResult<ListUsersResult> {
        let (users, total) = self
            .repository
            .list(query.limit, query.offset)
            .context("failed to list users")?;

        Ok(ListUsersResult {
            users: users.into_iter().map(Into::into).collect(),
            total,
            limit: query.limit,
            offset: query.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UserId;
    use crate::models::User;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    #[test]
    fn test_get_existing_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = User::new("Ada", "ada@example.com");
        repo.create(user.clone()).unwrap();

        let handler = GetUserHandler::new(repo);
        let result = handler
            .handle(GetUserQuery {
                id: user.id.clone(),
            })
            .unwrap();

        assert_eq!(result.id, user.id);
        assert_eq!(result.name, "Ada");
        assert_eq!(result.created_at, result.updated_at);
    }

    #[test]
    fn test_get_missing_user_is_not_found() {
        let handler = GetUserHandler::new(Arc::new(InMemoryUserRepository::new()));
        let id = UserId::generate();

        let err = handler.handle(GetUserQuery { id: id.clone() }).unwrap_err();

        assert!(matches!(err, UserError::NotFound(ref missing) if *missing == id));
    }

    #[test]
    fn test_get_storage_failure_is_not_not_found() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_id()
            .returning(|_| Err(UserError::Internal("read failed".to_string())));

        let handler = GetUserHandler::new(Arc::new(mock));
        let err = handler
            .handle(GetUserQuery {
                id: UserId::generate(),
            })
            .unwrap_err();

        assert!(err.is_internal());
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("failed to get user"));
    }

    #[test]
    fn test_list_users_reports_total() {
        let repo = Arc::new(InMemoryUserRepository::new());
        for i in 0..3 {
            repo.create(User::new(format!("User {i}"), format!("u{i}@example.com")))
                .unwrap();
        }

        let handler = ListUsersHandler::new(repo);
        let page = handler
            .handle(ListUsersQuery {
                limit: 2,
                offset: 0,
            })
            .unwrap();

        assert_eq!(page.users.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.limit, 2);

        let past_end = handler
            .handle(ListUsersQuery {
                limit: 2,
                offset: 10,
            })
            .unwrap();
        assert!(past_end.users.is_empty());
        assert_eq!(past_end.total, 3);
    }

    #[test]
    fn test_list_total_comes_from_the_same_read_as_the_page() {
        let mut mock = MockUserRepository::new();
        mock.expect_count().never();
        mock.expect_list()
            .times(1)
            .returning(|_, _| Ok((vec![User::new("Ada", "ada@example.com")], 7)));

        let handler = ListUsersHandler::new(Arc::new(mock));
        let page = handler.handle(ListUsersQuery::default()).unwrap();

        assert_eq!(page.users.len(), 1);
        assert_eq!(page.total, 7);
    }

    #[test]
    fn test_list_storage_failure_has_context() {
        let mut mock = MockUserRepository::new();
        mock.expect_list()
            .returning(|_, _| Err(UserError::Internal("read failed".to_string())));

        let handler = ListUsersHandler::new(Arc::new(mock));
        let err = handler.handle(ListUsersQuery::default()).unwrap_err();

        assert!(err.is_internal());
        assert!(err.to_string().starts_with("failed to list users"));
    }
}
