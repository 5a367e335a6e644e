//! User directory read service.

use std::sync::Arc;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::User;
use crate::domain::Error;

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Read-only service over the user directory.
#[derive(Clone)]
pub struct DirectoryService {
    users: Arc<dyn UserRepository>,
}

impl DirectoryService {
    /// Create a new directory service with the given user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// List all known users ordered by display name.
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::project::UserId;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn lists_directory_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all().return_once(|| {
            Ok(vec![User {
                id: UserId::new("u1").expect("valid id"),
                name: "Alice Zhang".to_owned(),
                email: None,
                avatar_url: None,
            }])
        });

        let service = DirectoryService::new(Arc::new(repo));
        let users = service.list_users().await.expect("list succeeds");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice Zhang");
    }

    #[tokio::test]
    async fn maps_connection_error_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all()
            .return_once(|| Err(UserRepositoryError::connection("pool unavailable")));

        let service = DirectoryService::new(Arc::new(repo));
        let error = service.list_users().await.expect_err("unavailable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
