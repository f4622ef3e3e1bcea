//! Driving port for provider search and detail pass-through.

use async_trait::async_trait;

use crate::domain::{
    Error, ExternalId, IngredientSearch, IngredientSearchPage, Recipe, RecipeSearch,
    RecipeSearchPage,
};

/// Domain use-case port for read-only catalog queries.
///
/// Responses pass through from the provider; nothing is materialised
/// locally. Provider outages surface as
/// [`crate::domain::ErrorCode::ServiceUnavailable`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Search ingredients by free-text query.
    async fn search_ingredients(
        &self,
        search: IngredientSearch,
    ) -> Result<IngredientSearchPage, Error>;

    /// Search recipes with optional diet/cuisine filters.
    async fn search_recipes(&self, search: RecipeSearch) -> Result<RecipeSearchPage, Error>;

    /// Fetch a full recipe record for detail views.
    async fn get_recipe(&self, id: ExternalId) -> Result<Recipe, Error>;
}
