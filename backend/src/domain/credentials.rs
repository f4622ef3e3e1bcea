//! Credential hashing primitives.
//!
//! Passwords are stored only as Argon2id hashes in PHC string format; the
//! embedded salt and parameters make verification self-describing. Hashing is
//! CPU-bound and intentionally slow, so the hasher sits behind a port that
//! tests can replace with a cheap stub.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
    rand_core::OsRng,
};

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Salted one-way credential hash in PHC string format.
///
/// ## Invariants
/// - Holds the full PHC string (`$argon2id$v=...$salt$hash`), never the
///   plaintext secret.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored or freshly computed PHC string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Access the PHC string for verification or persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redacted: hashes are not secrets but have no business in logs.
        f.write_str("PasswordHash(..)")
    }
}

/// Argon2id hasher with the crate's default parameters and a fresh random
/// salt per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|error| CredentialHashError::hash(error.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|error| CredentialHashError::verify(error.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(CredentialHashError::verify(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = Argon2CredentialHasher;
        let hash = hasher.hash("secret1").expect("hashing succeeds");

        assert!(hash.as_str().starts_with("$argon2"));
        assert!(hasher.verify("secret1", &hash).expect("verify runs"));
        assert!(!hasher.verify("wrong", &hash).expect("verify runs"));
    }

    #[test]
    fn each_hash_uses_a_fresh_salt() {
        let hasher = Argon2CredentialHasher;
        let first = hasher.hash("secret1").expect("hashing succeeds");
        let second = hasher.hash("secret1").expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn verify_rejects_malformed_stored_hash() {
        let hasher = Argon2CredentialHasher;
        let err = hasher
            .verify("secret1", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed hash must error");
        assert!(matches!(err, CredentialHashError::Verify { .. }));
    }

    #[test]
    fn debug_output_redacts_hash_material() {
        let hash = PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$abc$def");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
