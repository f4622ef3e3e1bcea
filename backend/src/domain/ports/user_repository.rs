//! Port abstraction for user persistence adapters and their errors.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{AccountCandidate, PasswordHash, ProfileUpdate, User, UserId, Username};

/// Account column whose uniqueness constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Username,
    Email,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// A uniqueness constraint rejected the row.
    #[error("account {field} is already taken")]
    Duplicate { field: DuplicateField },
    /// The referenced user row does not exist.
    #[error("user not found")]
    NotFound,
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Uniqueness violation on the given column.
    pub fn duplicate(field: DuplicateField) -> Self {
        Self::Duplicate { field }
    }

    /// Connection failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for user rows and their credential hashes.
///
/// The credential hash crosses this boundary only on insert and on
/// username lookup; it never reaches inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a pending account and return the stored user with its
    /// store-assigned identifier.
    async fn insert(&self, candidate: &AccountCandidate) -> Result<User, UserPersistenceError>;

    /// Fetch a user and stored hash by exact username match.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite username and email in place.
    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserPersistenceError>;

    /// Remove the user row and, atomically, the user's favorite
    /// associations. Cached ingredient/recipe rows are untouched.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
