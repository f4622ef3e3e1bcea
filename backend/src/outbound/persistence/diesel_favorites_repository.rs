//! PostgreSQL-backed `FavoritesRepository` implementation using Diesel.
//!
//! Cache rows use the provider identifier as primary key, so a second
//! materialisation attempt fails fast with a unique violation; the domain
//! service treats that as "someone already created it" and re-reads.
//! Association inserts use `ON CONFLICT DO NOTHING` to keep the favorite
//! sets idempotent without explicit locking.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{FavoritesPersistenceError, FavoritesRepository};
use crate::domain::{ExternalId, Ingredient, Recipe, UserId};

use super::models::{IngredientFavoriteRow, IngredientRow, RecipeFavoriteRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipes, user_ingredients, user_recipes};

/// Diesel-backed implementation of the `FavoritesRepository` port.
#[derive(Clone)]
pub struct DieselFavoritesRepository {
    pool: DbPool,
}

impl DieselFavoritesRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoritesPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FavoritesPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> FavoritesPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            FavoritesPersistenceError::duplicate(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FavoritesPersistenceError::connection("database connection error")
        }
        _ => FavoritesPersistenceError::query("database error"),
    }
}

#[async_trait]
impl FavoritesRepository for DieselFavoritesRepository {
    async fn find_ingredient(
        &self,
        id: ExternalId,
    ) -> Result<Option<Ingredient>, FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .find(id.as_i64())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Ingredient::from))
    }

    async fn insert_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(ingredients::table)
            .values(IngredientRow::from(ingredient))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_recipe(
        &self,
        id: ExternalId,
    ) -> Result<Option<Recipe>, FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .find(id.as_i64())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Recipe::from))
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(recipes::table)
            .values(RecipeRow::from(recipe))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn add_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_ingredients::table)
            .values(IngredientFavoriteRow {
                user_id: user.as_i32(),
                ingredient_id: ingredient.as_i64(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn add_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_recipes::table)
            .values(RecipeFavoriteRow {
                user_id: user.as_i32(),
                recipe_id: recipe.as_i64(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn remove_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            user_ingredients::table.filter(
                user_ingredients::user_id
                    .eq(user.as_i32())
                    .and(user_ingredients::ingredient_id.eq(ingredient.as_i64())),
            ),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn remove_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            user_recipes::table.filter(
                user_recipes::user_id
                    .eq(user.as_i32())
                    .and(user_recipes::recipe_id.eq(recipe.as_i64())),
            ),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn list_ingredient_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Ingredient>, FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = user_ingredients::table
            .inner_join(ingredients::table)
            .filter(user_ingredients::user_id.eq(user.as_i32()))
            .select(IngredientRow::as_select())
            .order(ingredients::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    async fn list_recipe_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Recipe>, FavoritesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = user_recipes::table
            .inner_join(recipes::table)
            .filter(user_recipes::user_id.eq(user.as_i32()))
            .select(RecipeRow::as_select())
            .order(recipes::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
