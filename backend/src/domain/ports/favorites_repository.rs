//! Port abstraction for favorites persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{ExternalId, Ingredient, Recipe, UserId};

/// Persistence errors raised by favorites repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoritesPersistenceError {
    /// A row with this key already exists. For cache-row inserts this is the
    /// concurrency arbiter: the caller re-reads and uses the winner's row.
    #[error("row already exists: {message}")]
    Duplicate { message: String },
    /// Repository connection could not be established.
    #[error("favorites repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("favorites repository query failed: {message}")]
    Query { message: String },
}

impl FavoritesPersistenceError {
    /// Duplicate-key rejection with the given message.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
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

/// Driven port for cached catalog rows and user↔entity associations.
///
/// Cache rows are keyed by the provider identifier and are never updated or
/// deleted once materialised. Associations are sets: the `add_*` operations
/// must be idempotent, and the `remove_*` operations are no-ops when the
/// association does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Fetch a cached ingredient row by provider identifier.
    async fn find_ingredient(
        &self,
        id: ExternalId,
    ) -> Result<Option<Ingredient>, FavoritesPersistenceError>;

    /// Materialise an ingredient row; fails with `Duplicate` when the key is
    /// already present.
    async fn insert_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), FavoritesPersistenceError>;

    /// Fetch a cached recipe row by provider identifier.
    async fn find_recipe(
        &self,
        id: ExternalId,
    ) -> Result<Option<Recipe>, FavoritesPersistenceError>;

    /// Materialise a recipe row; fails with `Duplicate` when the key is
    /// already present.
    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), FavoritesPersistenceError>;

    /// Record that the user saved this ingredient. Idempotent.
    async fn add_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError>;

    /// Record that the user saved this recipe. Idempotent.
    async fn add_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError>;

    /// Drop the user↔ingredient association; no-op when absent.
    async fn remove_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError>;

    /// Drop the user↔recipe association; no-op when absent.
    async fn remove_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError>;

    /// List the user's saved ingredients.
    async fn list_ingredient_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Ingredient>, FavoritesPersistenceError>;

    /// List the user's saved recipes.
    async fn list_recipe_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Recipe>, FavoritesPersistenceError>;
}
