//! Port abstraction for credential hashing.
//!
//! Hashing is deliberately slow; hiding it behind a port lets service tests
//! substitute a cheap stub while production uses Argon2id.

use crate::domain::credentials::PasswordHash;

/// Failures raised by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialHashError {
    /// Hashing the supplied password failed.
    #[error("credential hashing failed: {message}")]
    Hash { message: String },
    /// The stored hash could not be parsed or compared.
    #[error("credential verification failed: {message}")]
    Verify { message: String },
}

impl CredentialHashError {
    /// Hashing failure with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Verification failure with the given message.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// Driven port computing and checking salted one-way credential hashes.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Verify a plaintext password against a stored hash. Returns `false`
    /// for a mismatch; errors are reserved for unusable stored hashes.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError>;
}
