//! Driving port for account registration and authentication use-cases.
//!
//! Inbound adapters call this port without knowing the backing
//! infrastructure, which keeps HTTP handler tests deterministic: they can
//! substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, NewAccount, ProfileUpdate, User, UserId};

/// Domain use-case port for the identity manager.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an account from a validated registration request.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the username or
    /// email is already taken; the details carry the colliding field.
    async fn register(&self, account: NewAccount) -> Result<User, Error>;

    /// Validate credentials and return the matching user.
    ///
    /// `Ok(None)` covers both unknown-username and wrong-password; the two
    /// are observationally identical so account existence does not leak.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error>;

    /// Overwrite the account's username and email.
    async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User, Error>;

    /// Delete the account and, atomically, its favorite associations.
    async fn delete_account(&self, id: UserId) -> Result<(), Error>;

    /// Fetch the account by identifier.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
