//! Identity manager: registration, credential verification, profile
//! maintenance, and account deletion.
//!
//! Candidate construction and hashing are separated from the store insert so
//! validation can be exercised without persistence. Hashing runs on the
//! blocking pool; Argon2 is deliberately slow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, IdentityService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccountCandidate, Error, LoginCredentials, NewAccount, PasswordHash, ProfileUpdate, User,
    UserId, Username,
};

/// Identity service backed by a user repository and a credential hasher.
#[derive(Clone)]
pub struct IdentityManager<R> {
    users: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<R> IdentityManager<R> {
    /// Create a new identity manager.
    pub fn new(users: Arc<R>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Duplicate { field } => Error::conflict("account already exists")
            .with_details(json!({ "field": field.to_string(), "code": "duplicate_account" })),
        UserPersistenceError::NotFound => Error::not_found("no such account"),
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

impl<R> IdentityManager<R>
where
    R: UserRepository,
{
    async fn hash_password(&self, password: Zeroizing<String>) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|error| Error::internal(format!("hashing task failed: {error}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(
        &self,
        password: Zeroizing<String>,
        hash: PasswordHash,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|error| Error::internal(format!("verification task failed: {error}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<R> IdentityService for IdentityManager<R>
where
    R: UserRepository,
{
    async fn register(&self, account: NewAccount) -> Result<User, Error> {
        let hash = self
            .hash_password(Zeroizing::new(account.password().to_owned()))
            .await?;
        let candidate = AccountCandidate::new(&account, hash);

        // On a uniqueness conflict the candidate, and with it the computed
        // hash, is dropped here and never reused.
        self.users
            .insert(&candidate)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        // A name that cannot pass account validation cannot name an account;
        // report the same no-match signal as an unknown username.
        let Ok(username) = Username::new(credentials.username()) else {
            return Ok(None);
        };

        let Some((user, stored_hash)) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
        else {
            return Ok(None);
        };

        let verified = self
            .verify_password(Zeroizing::new(credentials.password().to_owned()), stored_hash)
            .await?;

        Ok(verified.then_some(user))
    }

    async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User, Error> {
        self.users
            .update_profile(id, &update)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn delete_account(&self, id: UserId) -> Result<(), Error> {
        self.users.delete(id).await.map_err(map_user_persistence_error)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}
