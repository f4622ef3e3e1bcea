//! Catalog data model: externally sourced ingredients and recipes.
//!
//! Rows mirror a subset of the provider's fields. The provider assigns the
//! identifiers; locally materialised rows are immutable after creation (no
//! refresh-from-provider semantics).

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider-assigned identifier for ingredients and recipes.
///
/// Treated as a foreign, non-generated primary key when a record is
/// materialised locally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ExternalId(i64);

impl ExternalId {
    /// Wrap a provider-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locally cached ingredient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Provider-assigned identifier.
    #[schema(value_type = i64, example = 9266)]
    pub id: ExternalId,
    /// Display name reported by the provider.
    #[schema(example = "banana")]
    pub name: String,
}

/// Locally cached recipe record.
///
/// Optional fields reflect the provider's payload: absent values are stored
/// as unset, never treated as a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Provider-assigned identifier.
    #[schema(value_type = i64, example = 42)]
    pub id: ExternalId,
    /// Display title reported by the provider.
    #[schema(example = "Soup")]
    pub title: String,
    /// Image URL, when the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Preparation time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<i32>,
    /// Number of servings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    /// Attribution name for the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Attribution URL for the original source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Ingredient search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientHit {
    /// Provider-assigned identifier.
    #[schema(value_type = i64)]
    pub id: ExternalId,
    /// Display name.
    pub name: String,
    /// Image URL, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Recipe search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeHit {
    /// Provider-assigned identifier.
    #[schema(value_type = i64)]
    pub id: ExternalId,
    /// Display title.
    pub title: String,
    /// Image URL, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Default search page size when the caller does not ask for one.
pub const SEARCH_LIMIT_DEFAULT: u32 = 10;
/// Largest page size forwarded to the provider.
pub const SEARCH_LIMIT_MAX: u32 = 100;

/// Validation errors returned by the search constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    /// The free-text query was missing or blank once trimmed.
    EmptyQuery,
}

impl fmt::Display for SearchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "search query must not be empty"),
        }
    }
}

impl std::error::Error for SearchValidationError {}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(SEARCH_LIMIT_DEFAULT)
        .clamp(1, SEARCH_LIMIT_MAX)
}

/// Validated free-text ingredient search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSearch {
    query: String,
    offset: u32,
    limit: u32,
}

impl IngredientSearch {
    /// Construct a search, trimming the query and clamping the page size.
    pub fn try_new(
        query: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Self, SearchValidationError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchValidationError::EmptyQuery);
        }
        Ok(Self {
            query: trimmed.to_owned(),
            offset,
            limit: clamp_limit(limit),
        })
    }

    /// Free-text query forwarded to the provider.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Pagination offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Validated free-text recipe search with optional diet/cuisine filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSearch {
    query: String,
    diet: Option<String>,
    cuisine: Option<String>,
    offset: u32,
    limit: u32,
}

impl RecipeSearch {
    /// Construct a search, trimming the query and clamping the page size.
    ///
    /// Blank filter values are treated as absent.
    pub fn try_new(
        query: &str,
        diet: Option<&str>,
        cuisine: Option<&str>,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Self, SearchValidationError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchValidationError::EmptyQuery);
        }
        let normalize = |filter: Option<&str>| {
            filter
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        Ok(Self {
            query: trimmed.to_owned(),
            diet: normalize(diet),
            cuisine: normalize(cuisine),
            offset,
            limit: clamp_limit(limit),
        })
    }

    /// Free-text query forwarded to the provider.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Diet filter, when requested.
    pub fn diet(&self) -> Option<&str> {
        self.diet.as_deref()
    }

    /// Cuisine filter, when requested.
    pub fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }

    /// Pagination offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// One page of ingredient search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSearchPage {
    /// Result entries in provider order.
    pub results: Vec<IngredientHit>,
    /// Offset this page starts at.
    pub offset: u32,
    /// Total number of matches reported by the provider.
    pub total_results: u32,
}

/// One page of recipe search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchPage {
    /// Result entries in provider order.
    pub results: Vec<RecipeHit>,
    /// Offset this page starts at.
    pub offset: u32,
    /// Total number of matches reported by the provider.
    pub total_results: u32,
}

/// A user's saved ingredients and recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesSnapshot {
    /// Saved ingredients in insertion-id order.
    pub ingredients: Vec<Ingredient>,
    /// Saved recipes in insertion-id order.
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn searches_reject_blank_queries(#[case] query: &str) {
        assert_eq!(
            IngredientSearch::try_new(query, 0, None).expect_err("blank query"),
            SearchValidationError::EmptyQuery
        );
        assert_eq!(
            RecipeSearch::try_new(query, None, None, 0, None).expect_err("blank query"),
            SearchValidationError::EmptyQuery
        );
    }

    #[rstest]
    #[case(None, SEARCH_LIMIT_DEFAULT)]
    #[case(Some(0), 1)]
    #[case(Some(25), 25)]
    #[case(Some(10_000), SEARCH_LIMIT_MAX)]
    fn limit_is_defaulted_and_clamped(#[case] requested: Option<u32>, #[case] expected: u32) {
        let search = IngredientSearch::try_new("apple", 0, requested).expect("valid search");
        assert_eq!(search.limit(), expected);
    }

    #[test]
    fn recipe_search_drops_blank_filters() {
        let search = RecipeSearch::try_new(" soup ", Some("  "), Some("thai"), 20, None)
            .expect("valid search");
        assert_eq!(search.query(), "soup");
        assert_eq!(search.diet(), None);
        assert_eq!(search.cuisine(), Some("thai"));
        assert_eq!(search.offset(), 20);
    }

    #[test]
    fn recipe_serialisation_omits_absent_fields() {
        let recipe = Recipe {
            id: ExternalId::new(42),
            title: "Soup".to_owned(),
            image: None,
            ready_in_minutes: Some(25),
            servings: None,
            source_name: None,
            source_url: None,
        };
        let value = serde_json::to_value(&recipe).expect("serialise recipe");
        assert_eq!(value["id"], 42);
        assert_eq!(value["title"], "Soup");
        assert_eq!(value["readyInMinutes"], 25);
        assert!(value.get("image").is_none());
        assert!(value.get("sourceUrl").is_none());
    }
}
