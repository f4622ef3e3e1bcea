//! Favorites ledger: idempotent user↔entity associations with lazy
//! materialisation of provider records.
//!
//! First reference to an external id fetches the record and inserts a local
//! cache row. Two concurrent first references race on the row's primary key;
//! the store's uniqueness constraint arbitrates and the loser re-reads the
//! winner's row instead of failing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog_service::map_catalog_source_error;
use crate::domain::ports::{
    CatalogSource, FavoritesLedger, FavoritesPersistenceError, FavoritesRepository,
};
use crate::domain::{Error, ExternalId, FavoritesSnapshot, Ingredient, Recipe, UserId};

/// Favorites service backed by a favorites repository and the provider.
#[derive(Clone)]
pub struct FavoritesService<F> {
    favorites: Arc<F>,
    source: Arc<dyn CatalogSource>,
}

impl<F> FavoritesService<F> {
    /// Create a new service.
    pub fn new(favorites: Arc<F>, source: Arc<dyn CatalogSource>) -> Self {
        Self { favorites, source }
    }
}

fn map_favorites_persistence_error(error: FavoritesPersistenceError) -> Error {
    match error {
        // Duplicates are handled inline where they arbitrate races; one
        // reaching this mapping means an adapter broke the idempotence
        // contract.
        FavoritesPersistenceError::Duplicate { message } => {
            Error::internal(format!("unexpected duplicate row: {message}"))
        }
        FavoritesPersistenceError::Connection { message } => Error::service_unavailable(message),
        FavoritesPersistenceError::Query { message } => Error::internal(message),
    }
}

impl<F> FavoritesService<F>
where
    F: FavoritesRepository,
{
    /// Return the cached ingredient row, materialising it on first
    /// reference. Invokes the provider at most once per cached id.
    async fn resolve_ingredient(&self, id: ExternalId) -> Result<Ingredient, Error> {
        if let Some(existing) = self
            .favorites
            .find_ingredient(id)
            .await
            .map_err(map_favorites_persistence_error)?
        {
            return Ok(existing);
        }

        let fetched = self
            .source
            .fetch_ingredient(id)
            .await
            .map_err(map_catalog_source_error)?;

        match self.favorites.insert_ingredient(&fetched).await {
            Ok(()) => Ok(fetched),
            Err(FavoritesPersistenceError::Duplicate { .. }) => {
                // Lost the first-insert race: reuse the winner's row.
                self.favorites
                    .find_ingredient(id)
                    .await
                    .map_err(map_favorites_persistence_error)?
                    .ok_or_else(|| {
                        Error::internal(format!(
                            "ingredient {id} vanished after a duplicate insert"
                        ))
                    })
            }
            Err(error) => Err(map_favorites_persistence_error(error)),
        }
    }

    /// Recipe twin of [`Self::resolve_ingredient`].
    async fn resolve_recipe(&self, id: ExternalId) -> Result<Recipe, Error> {
        if let Some(existing) = self
            .favorites
            .find_recipe(id)
            .await
            .map_err(map_favorites_persistence_error)?
        {
            return Ok(existing);
        }

        let fetched = self
            .source
            .fetch_recipe(id)
            .await
            .map_err(map_catalog_source_error)?;

        match self.favorites.insert_recipe(&fetched).await {
            Ok(()) => Ok(fetched),
            Err(FavoritesPersistenceError::Duplicate { .. }) => {
                self.favorites
                    .find_recipe(id)
                    .await
                    .map_err(map_favorites_persistence_error)?
                    .ok_or_else(|| {
                        Error::internal(format!("recipe {id} vanished after a duplicate insert"))
                    })
            }
            Err(error) => Err(map_favorites_persistence_error(error)),
        }
    }
}

#[async_trait]
impl<F> FavoritesLedger for FavoritesService<F>
where
    F: FavoritesRepository,
{
    async fn add_ingredient(&self, user: UserId, id: ExternalId) -> Result<Ingredient, Error> {
        let ingredient = self.resolve_ingredient(id).await?;
        self.favorites
            .add_ingredient_favorite(user, id)
            .await
            .map_err(map_favorites_persistence_error)?;
        tracing::debug!(%user, ingredient = %id, "saved ingredient");
        Ok(ingredient)
    }

    async fn add_recipe(&self, user: UserId, id: ExternalId) -> Result<Recipe, Error> {
        let recipe = self.resolve_recipe(id).await?;
        self.favorites
            .add_recipe_favorite(user, id)
            .await
            .map_err(map_favorites_persistence_error)?;
        tracing::debug!(%user, recipe = %id, "saved recipe");
        Ok(recipe)
    }

    async fn remove_ingredient(&self, user: UserId, id: ExternalId) -> Result<(), Error> {
        self.favorites
            .remove_ingredient_favorite(user, id)
            .await
            .map_err(map_favorites_persistence_error)
    }

    async fn remove_recipe(&self, user: UserId, id: ExternalId) -> Result<(), Error> {
        self.favorites
            .remove_recipe_favorite(user, id)
            .await
            .map_err(map_favorites_persistence_error)
    }

    async fn list_favorites(&self, user: UserId) -> Result<FavoritesSnapshot, Error> {
        let ingredients = self
            .favorites
            .list_ingredient_favorites(user)
            .await
            .map_err(map_favorites_persistence_error)?;
        let recipes = self
            .favorites
            .list_recipe_favorites(user)
            .await
            .map_err(map_favorites_persistence_error)?;
        Ok(FavoritesSnapshot {
            ingredients,
            recipes,
        })
    }
}
