//! Read-only catalog queries passed through to the provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CatalogQuery, CatalogSource, CatalogSourceError};
use crate::domain::{
    Error, ExternalId, IngredientSearch, IngredientSearchPage, Recipe, RecipeSearch,
    RecipeSearchPage,
};

/// Map provider source failures to transport-agnostic domain errors.
///
/// Outages and quota rejections all become a retryable "try again later";
/// only a provider 404 keeps its identity as a missing record.
pub(crate) fn map_catalog_source_error(error: CatalogSourceError) -> Error {
    match error {
        CatalogSourceError::NotFound { message } => Error::not_found(message),
        CatalogSourceError::Transport { .. }
        | CatalogSourceError::Timeout { .. }
        | CatalogSourceError::RateLimited { .. }
        | CatalogSourceError::Decode { .. } => {
            tracing::warn!(error = %error, "recipe provider call failed");
            Error::service_unavailable("recipe provider is unavailable, try again later")
        }
        CatalogSourceError::InvalidRequest { message } => {
            Error::internal(format!("provider rejected the request: {message}"))
        }
    }
}

/// Catalog query service delegating to a provider source adapter.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    /// Create a new service backed by the given provider source.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CatalogQuery for CatalogService {
    async fn search_ingredients(
        &self,
        search: IngredientSearch,
    ) -> Result<IngredientSearchPage, Error> {
        self.source
            .search_ingredients(&search)
            .await
            .map_err(map_catalog_source_error)
    }

    async fn search_recipes(&self, search: RecipeSearch) -> Result<RecipeSearchPage, Error> {
        self.source
            .search_recipes(&search)
            .await
            .map_err(map_catalog_source_error)
    }

    async fn get_recipe(&self, id: ExternalId) -> Result<Recipe, Error> {
        self.source
            .fetch_recipe(id)
            .await
            .map_err(map_catalog_source_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for provider error mapping and pass-through.
    use super::*;
    use crate::domain::ports::MockCatalogSource;
    use crate::domain::{ErrorCode, RecipeHit};
    use rstest::rstest;

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id: ExternalId::new(id),
            title: title.to_owned(),
            image: None,
            ready_in_minutes: None,
            servings: None,
            source_name: None,
            source_url: None,
        }
    }

    #[tokio::test]
    async fn get_recipe_passes_the_record_through() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_recipe()
            .times(1)
            .return_once(|id| Ok(recipe(id.as_i64(), "Soup")));

        let service = CatalogService::new(Arc::new(source));
        let fetched = service
            .get_recipe(ExternalId::new(42))
            .await
            .expect("fetch succeeds");
        assert_eq!(fetched.title, "Soup");
    }

    #[rstest]
    #[case(CatalogSourceError::transport("connection refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogSourceError::timeout("deadline elapsed"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogSourceError::rate_limited("quota exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogSourceError::decode("missing id"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogSourceError::not_found("no recipe 42"), ErrorCode::NotFound)]
    #[case(CatalogSourceError::invalid_request("bad query"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn source_failures_map_to_stable_codes(
        #[case] source_error: CatalogSourceError,
        #[case] expected: ErrorCode,
    ) {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_recipe()
            .times(1)
            .return_once(move |_| Err(source_error));

        let service = CatalogService::new(Arc::new(source));
        let err = service
            .get_recipe(ExternalId::new(42))
            .await
            .expect_err("failure surfaces");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn recipe_search_forwards_filters() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search_recipes()
            .withf(|search: &RecipeSearch| {
                search.query() == "soup"
                    && search.diet() == Some("vegan")
                    && search.cuisine().is_none()
            })
            .times(1)
            .return_once(|_| {
                Ok(RecipeSearchPage {
                    results: vec![RecipeHit {
                        id: ExternalId::new(42),
                        title: "Soup".to_owned(),
                        image: None,
                    }],
                    offset: 0,
                    total_results: 1,
                })
            });

        let search =
            RecipeSearch::try_new("soup", Some("vegan"), None, 0, None).expect("valid search");
        let service = CatalogService::new(Arc::new(source));
        let page = service.search_recipes(search).await.expect("search runs");
        assert_eq!(page.total_results, 1);
        assert_eq!(page.results[0].title, "Soup");
    }
}
