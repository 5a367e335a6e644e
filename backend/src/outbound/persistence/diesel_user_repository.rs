//! PostgreSQL-backed user directory adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::User;
use crate::domain::UserId;

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user directory.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new user repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    debug!(error = %error_message, "diesel operation failed");

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            UserRepositoryError::query(info.message().to_owned())
        }
        _ => UserRepositoryError::query(error_message),
    }
}

/// Convert a stored row, or `None` when its identifier is unusable.
fn row_to_user(row: UserRow) -> Option<User> {
    match UserId::new(row.id.clone()) {
        Ok(id) => Some(User {
            id,
            name: row.name,
            email: row.email,
            avatar_url: row.avatar_url,
        }),
        Err(err) => {
            warn!(user_id = %row.id, error = %err, "skipping user row with invalid id");
            None
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .select(UserRow::as_select())
            .order(users::name.asc())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().filter_map(row_to_user).collect())
    }
}
