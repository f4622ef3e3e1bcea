//! Domain primitives, ports, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, the port traits at the hexagonal boundary, and the
//! services implementing the use-cases. Types are immutable; invariants and
//! serialisation contracts are documented on each type.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod catalog_service;
pub mod credentials;
pub mod error;
pub mod favorites_service;
pub mod identity_service;
pub mod ports;

pub use self::account::{
    AccountCandidate, AccountValidationError, EmailAddress, NewAccount, ProfileUpdate, User,
    UserId, Username,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog::{
    ExternalId, FavoritesSnapshot, Ingredient, IngredientHit, IngredientSearch,
    IngredientSearchPage, Recipe, RecipeHit, RecipeSearch, RecipeSearchPage,
};
pub use self::catalog_service::CatalogService;
pub use self::credentials::{Argon2CredentialHasher, PasswordHash};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::favorites_service::FavoritesService;
pub use self::identity_service::IdentityManager;

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
