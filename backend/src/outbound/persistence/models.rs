//! Diesel row structs for the persistence adapters.
//!
//! Internal implementation details of the outbound layer; domain types never
//! leak Diesel derives and these rows never leave this module tree.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{ExternalId, Ingredient, Recipe};

use super::schema::{ingredients, recipes, user_ingredients, user_recipes, users};

/// Full account row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct UserRow {
    pub(super) id: i32,
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password_hash: String,
    #[expect(dead_code, reason = "audit column not exposed through the domain")]
    pub(super) created_at: DateTime<Utc>,
}

/// Insertable account candidate; the store assigns `id` and `created_at`.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(super) struct NewUserRow<'a> {
    pub(super) username: &'a str,
    pub(super) email: &'a str,
    pub(super) password_hash: &'a str,
}

/// In-place username/email replacement.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(super) struct UserProfileChangeset<'a> {
    pub(super) username: &'a str,
    pub(super) email: &'a str,
}

/// Cached ingredient row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct IngredientRow {
    pub(super) id: i64,
    pub(super) name: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: ExternalId::new(row.id),
            name: row.name,
        }
    }
}

impl From<&Ingredient> for IngredientRow {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id.as_i64(),
            name: ingredient.name.clone(),
        }
    }
}

/// Cached recipe row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct RecipeRow {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) image: Option<String>,
    pub(super) ready_in_minutes: Option<i32>,
    pub(super) servings: Option<i32>,
    pub(super) source_name: Option<String>,
    pub(super) source_url: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: ExternalId::new(row.id),
            title: row.title,
            image: row.image,
            ready_in_minutes: row.ready_in_minutes,
            servings: row.servings,
            source_name: row.source_name,
            source_url: row.source_url,
        }
    }
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.as_i64(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            source_name: recipe.source_name.clone(),
            source_url: recipe.source_url.clone(),
        }
    }
}

/// User↔ingredient association row.
#[derive(Debug, Insertable)]
#[diesel(table_name = user_ingredients)]
pub(super) struct IngredientFavoriteRow {
    pub(super) user_id: i32,
    pub(super) ingredient_id: i64,
}

/// User↔recipe association row.
#[derive(Debug, Insertable)]
#[diesel(table_name = user_recipes)]
pub(super) struct RecipeFavoriteRow {
    pub(super) user_id: i32,
    pub(super) recipe_id: i64,
}
