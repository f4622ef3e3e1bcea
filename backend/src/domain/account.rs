//! Account data model.
//!
//! The store assigns numeric identifiers; usernames and email addresses are
//! validated here so adapters and services always handle well-formed values.
//! Password plaintext only ever appears inside [`NewAccount`] and is zeroised
//! on drop.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::credentials::PasswordHash;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    EmptyEmail,
    EmailTooLong { max: usize },
    EmailInvalid,
    EmptyPassword,
    PasswordTooLong { max: usize },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmailInvalid => write!(f, "email must look like local@domain"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Store-assigned user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum accepted password length in bytes (hashing input cap).
pub const PASSWORD_MAX_BYTES: usize = 128;

fn username_char_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Unique login name chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, AccountValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(AccountValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !trimmed.chars().all(username_char_allowed) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unique contact address for the account.
///
/// Validation is structural only (`local@domain`, no whitespace);
/// deliverability is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, AccountValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::EmailInvalid);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AccountValidationError::EmailInvalid);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(AccountValidationError::EmailInvalid);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user as exposed to adapters.
///
/// ## Invariants
/// - `username` and `email` satisfy their constructor validation.
/// - The credential hash never appears here; it stays behind the
///   `UserRepository` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "alice")]
    username: Username,
    #[schema(value_type = String, example = "a@x.com")]
    email: EmailAddress,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, username: Username, email: EmailAddress) -> Self {
        Self {
            id,
            username,
            email,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Validated registration request carrying the plaintext secret exactly once.
///
/// The password is zeroised on drop; the only consumer is the identity
/// service, which exchanges it for a [`PasswordHash`] before persistence.
#[derive(Debug, Clone)]
pub struct NewAccount {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Construct a registration request from raw inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AccountValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(AccountValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext secret supplied once by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Pending user record ready for persistence.
///
/// Built from a validated [`NewAccount`] and the computed hash; this is the
/// pure construction half of registration, separated from the store insert so
/// validation can be exercised without a live database.
#[derive(Debug, Clone)]
pub struct AccountCandidate {
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
}

impl AccountCandidate {
    /// Combine validated account fields with a computed credential hash.
    pub fn new(account: &NewAccount, password_hash: PasswordHash) -> Self {
        Self {
            username: account.username().clone(),
            email: account.email().clone(),
            password_hash,
        }
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Hashed credential in PHC string format.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// Validated username/email replacement for an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    username: Username,
    email: EmailAddress,
}

impl ProfileUpdate {
    /// Construct a profile update from raw inputs.
    pub fn try_from_parts(username: &str, email: &str) -> Result<Self, AccountValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
        })
    }

    /// Replacement username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Replacement email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyUsername)]
    #[case("  ", AccountValidationError::EmptyUsername)]
    #[case("ab", AccountValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("has space", AccountValidationError::UsernameInvalidCharacters)]
    #[case("émile", AccountValidationError::UsernameInvalidCharacters)]
    fn username_validation_rejects_bad_input(
        #[case] raw: &str,
        #[case] expected: AccountValidationError,
    ) {
        let err = Username::new(raw).expect_err("invalid username must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn username_rejects_overlong_input() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        let err = Username::new(raw).expect_err("overlong username must fail");
        assert_eq!(
            err,
            AccountValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    #[case("alice")]
    #[case("a_b-c.d")]
    #[case("  padded  ")]
    fn username_accepts_and_trims_valid_input(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("no-at-sign", AccountValidationError::EmailInvalid)]
    #[case("@domain", AccountValidationError::EmailInvalid)]
    #[case("local@", AccountValidationError::EmailInvalid)]
    #[case("two@@signs", AccountValidationError::EmailInvalid)]
    #[case("spaced @x.com", AccountValidationError::EmailInvalid)]
    fn email_validation_rejects_bad_input(
        #[case] raw: &str,
        #[case] expected: AccountValidationError,
    ) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn email_accepts_plain_address() {
        let email = EmailAddress::new(" a@x.com ").expect("valid email");
        assert_eq!(email.as_ref(), "a@x.com");
    }

    #[test]
    fn new_account_rejects_empty_password() {
        let err = NewAccount::try_from_parts("alice", "a@x.com", "")
            .expect_err("empty password must fail");
        assert_eq!(err, AccountValidationError::EmptyPassword);
    }

    #[test]
    fn new_account_rejects_overlong_password() {
        let password = "p".repeat(PASSWORD_MAX_BYTES + 1);
        let err = NewAccount::try_from_parts("alice", "a@x.com", &password)
            .expect_err("overlong password must fail");
        assert_eq!(
            err,
            AccountValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES
            }
        );
    }

    #[test]
    fn user_serialises_to_camel_case_fields() {
        let user = User::new(
            UserId::new(7),
            Username::new("alice").expect("username"),
            EmailAddress::new("a@x.com").expect("email"),
        );
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value["id"], 7);
        assert_eq!(value["username"], "alice");
        assert_eq!(value["email"], "a@x.com");
        assert!(
            value.get("passwordHash").is_none(),
            "credential material must never serialise"
        );
    }
}
