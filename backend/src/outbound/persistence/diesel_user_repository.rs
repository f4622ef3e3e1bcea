//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Uniqueness of usernames and email addresses is enforced by the database;
//! this adapter translates constraint violations into the port's
//! `Duplicate` variant so the domain can answer with a conflict instead of
//! crashing. Account deletion is a single statement; the association tables
//! declare `ON DELETE CASCADE`, so the user row and its favorites go
//! together atomically.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DuplicateField, UserPersistenceError, UserRepository};
use crate::domain::{
    AccountCandidate, EmailAddress, PasswordHash, ProfileUpdate, User, UserId, Username,
};

use super::models::{NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Translate a write failure, resolving unique violations to the colliding
/// column via the constraint name (`users_username_key` / `users_email_key`).
fn map_write_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let constraint = info.constraint_name().unwrap_or_else(|| info.message());
        return if constraint.contains("email") {
            UserPersistenceError::duplicate(DuplicateField::Email)
        } else {
            UserPersistenceError::duplicate(DuplicateField::Username)
        };
    }
    map_diesel_error(error)
}

/// Convert a stored row into the domain user and its credential hash.
fn row_into_parts(row: UserRow) -> Result<(User, PasswordHash), UserPersistenceError> {
    let hash = PasswordHash::new(row.password_hash);
    let username = Username::new(row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username invalid: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok((User::new(UserId::new(row.id), username, email), hash))
}

fn row_into_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row_into_parts(row).map(|(user, _)| user)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, candidate: &AccountCandidate) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: candidate.username().as_ref(),
            email: candidate.email().as_ref(),
            password_hash: candidate.password_hash().as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;

        row_into_user(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_into_parts).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_i32())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_into_user).transpose()
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserProfileChangeset {
            username: update.username().as_ref(),
            email: update.email().as_ref(),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(id.as_i32()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_write_error)?;

        row.map(row_into_user)
            .transpose()?
            .ok_or(UserPersistenceError::NotFound)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Association rows fall with the user via ON DELETE CASCADE; the
        // single statement keeps the removal atomic.
        let affected = diesel::delete(users::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(UserPersistenceError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error translation; queries are exercised
    //! through the domain services with in-memory adapters.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn unique_violation(message: &str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(message.to_owned()),
        )
    }

    #[rstest]
    #[case(
        "duplicate key value violates unique constraint \"users_email_key\"",
        DuplicateField::Email
    )]
    #[case(
        "duplicate key value violates unique constraint \"users_username_key\"",
        DuplicateField::Username
    )]
    fn unique_violations_resolve_the_colliding_column(
        #[case] message: &str,
        #[case] expected: DuplicateField,
    ) {
        let err = map_write_error(unique_violation(message));
        assert_eq!(err, UserPersistenceError::duplicate(expected));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn other_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn rows_with_corrupt_usernames_are_query_errors() {
        let row = UserRow {
            id: 1,
            username: "   ".to_owned(),
            email: "a@x.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: chrono::Utc::now(),
        };
        let err = row_into_user(row).expect_err("corrupt row must fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn valid_rows_convert_to_domain_users() {
        let row = UserRow {
            id: 7,
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: chrono::Utc::now(),
        };
        let (user, hash) = row_into_parts(row).expect("valid row converts");
        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.username().as_ref(), "alice");
        assert_eq!(hash.as_str(), "$argon2id$stub");
    }
}
