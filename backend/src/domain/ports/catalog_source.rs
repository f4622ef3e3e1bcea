//! Port abstraction for the external recipe/ingredient provider.

use async_trait::async_trait;

use crate::domain::{
    ExternalId, Ingredient, IngredientSearch, IngredientSearchPage, Recipe, RecipeSearch,
    RecipeSearchPage,
};

/// Failures raised by provider source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogSourceError {
    /// Connection-level failure reaching the provider.
    #[error("provider transport failed: {message}")]
    Transport { message: String },
    /// The provider did not answer within the configured deadline.
    #[error("provider timed out: {message}")]
    Timeout { message: String },
    /// The provider rejected the call due to quota or rate limits.
    #[error("provider rate limited the request: {message}")]
    RateLimited { message: String },
    /// The provider has no record for the requested identifier.
    #[error("provider has no such record: {message}")]
    NotFound { message: String },
    /// The response body did not match the expected shape.
    #[error("provider response could not be decoded: {message}")]
    Decode { message: String },
    /// The provider judged the request malformed.
    #[error("provider rejected the request: {message}")]
    InvalidRequest { message: String },
}

impl CatalogSourceError {
    /// Transport failure with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Timeout with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Rate-limit rejection with the given message.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Missing-record response with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Decode failure with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Malformed-request rejection with the given message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Driven port for the read-only recipe/ingredient provider.
///
/// Implementations perform at most one outbound call per invocation and must
/// tolerate absent optional fields in provider payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full ingredient record by provider identifier.
    async fn fetch_ingredient(&self, id: ExternalId) -> Result<Ingredient, CatalogSourceError>;

    /// Fetch the full recipe record by provider identifier.
    async fn fetch_recipe(&self, id: ExternalId) -> Result<Recipe, CatalogSourceError>;

    /// Search ingredients by free-text query.
    async fn search_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<IngredientSearchPage, CatalogSourceError>;

    /// Search recipes by free-text query with optional diet/cuisine filters.
    async fn search_recipes(
        &self,
        search: &RecipeSearch,
    ) -> Result<RecipeSearchPage, CatalogSourceError>;
}
