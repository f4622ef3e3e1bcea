//! Driving port for the favorites ledger use-cases.

use async_trait::async_trait;

use crate::domain::{Error, ExternalId, FavoritesSnapshot, Ingredient, Recipe, UserId};

/// Domain use-case port for saving and listing favorites.
///
/// Saving resolves the provider record into a local cache row on first
/// reference; re-saving and re-removing are idempotent no-ops. Cached rows
/// are never refreshed or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesLedger: Send + Sync {
    /// Save an ingredient for the user, materialising it if needed.
    async fn add_ingredient(&self, user: UserId, id: ExternalId) -> Result<Ingredient, Error>;

    /// Save a recipe for the user, materialising it if needed.
    async fn add_recipe(&self, user: UserId, id: ExternalId) -> Result<Recipe, Error>;

    /// Remove a saved ingredient; succeeds even when not saved.
    async fn remove_ingredient(&self, user: UserId, id: ExternalId) -> Result<(), Error>;

    /// Remove a saved recipe; succeeds even when not saved.
    async fn remove_recipe(&self, user: UserId, id: ExternalId) -> Result<(), Error>;

    /// List everything the user has saved.
    async fn list_favorites(&self, user: UserId) -> Result<FavoritesSnapshot, Error>;
}
