//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `FavoritesRepository`, `CatalogSource`,
//! `CredentialHasher`) are implemented by outbound adapters; driving ports
//! (`IdentityService`, `FavoritesLedger`, `CatalogQuery`) are implemented by
//! the domain services and consumed by inbound adapters.

mod catalog_query;
mod catalog_source;
mod credential_hasher;
mod favorites;
mod favorites_repository;
mod identity;
mod user_repository;

#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use catalog_source::MockCatalogSource;
pub use catalog_source::{CatalogSource, CatalogSourceError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use favorites::MockFavoritesLedger;
pub use favorites::FavoritesLedger;
#[cfg(test)]
pub use favorites_repository::MockFavoritesRepository;
pub use favorites_repository::{FavoritesPersistenceError, FavoritesRepository};
#[cfg(test)]
pub use identity::MockIdentityService;
pub use identity::IdentityService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{DuplicateField, UserPersistenceError, UserRepository};
