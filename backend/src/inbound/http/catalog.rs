//! Catalog search and detail handlers passing provider data through.
//!
//! ```text
//! GET /api/v1/ingredients/search?query=banana&offset=0&limit=10
//! GET /api/v1/recipes/search?query=soup&diet=vegan&cuisine=thai&offset=0
//! GET /api/v1/recipes/{id}
//! ```
//!
//! Search is available to anonymous callers; only saving requires a session.

use actix_web::{get, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    Error, ExternalId, IngredientSearch, IngredientSearchPage, Recipe, RecipeSearch,
    RecipeSearchPage, catalog::SearchValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query parameters for `GET /api/v1/ingredients/search`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSearchQuery {
    /// Free-text query.
    pub query: String,
    /// Pagination offset.
    pub offset: Option<u32>,
    /// Page size (clamped server-side).
    pub limit: Option<u32>,
}

/// Query parameters for `GET /api/v1/recipes/search`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchQuery {
    /// Free-text query.
    pub query: String,
    /// Diet filter (e.g. `vegan`).
    pub diet: Option<String>,
    /// Cuisine filter (e.g. `thai`).
    pub cuisine: Option<String>,
    /// Pagination offset.
    pub offset: Option<u32>,
    /// Page size (clamped server-side).
    pub limit: Option<u32>,
}

fn map_search_validation_error(err: SearchValidationError) -> Error {
    match err {
        SearchValidationError::EmptyQuery => Error::invalid_request("search query must not be empty")
            .with_details(json!({ "field": "query", "code": "empty_query" })),
    }
}

/// Search ingredients at the provider.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/search",
    params(IngredientSearchQuery),
    responses(
        (status = 200, description = "Search results", body = IngredientSearchPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Provider unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "searchIngredients",
    security([])
)]
#[get("/ingredients/search")]
pub async fn search_ingredients(
    state: web::Data<HttpState>,
    query: web::Query<IngredientSearchQuery>,
) -> ApiResult<web::Json<IngredientSearchPage>> {
    let request = query.into_inner();
    let search = IngredientSearch::try_new(
        &request.query,
        request.offset.unwrap_or_default(),
        request.limit,
    )
    .map_err(map_search_validation_error)?;
    let page = state.catalog.search_ingredients(search).await?;
    Ok(web::Json(page))
}

/// Search recipes at the provider with optional diet/cuisine filters.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/search",
    params(RecipeSearchQuery),
    responses(
        (status = 200, description = "Search results", body = RecipeSearchPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Provider unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "searchRecipes",
    security([])
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    query: web::Query<RecipeSearchQuery>,
) -> ApiResult<web::Json<RecipeSearchPage>> {
    let request = query.into_inner();
    let search = RecipeSearch::try_new(
        &request.query,
        request.diet.as_deref(),
        request.cuisine.as_deref(),
        request.offset.unwrap_or_default(),
        request.limit,
    )
    .map_err(map_search_validation_error)?;
    let page = state.catalog.search_recipes(search).await?;
    Ok(web::Json(page))
}

/// Fetch a full recipe record from the provider for a detail view.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Provider recipe identifier")),
    responses(
        (status = 200, description = "Recipe detail", body = Recipe),
        (status = 404, description = "Provider has no such recipe", body = Error),
        (status = 503, description = "Provider unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Recipe>> {
    let recipe = state
        .catalog
        .get_recipe(ExternalId::new(path.into_inner()))
        .await?;
    Ok(web::Json(recipe))
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage against a mocked catalog query port.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockCatalogQuery, MockFavoritesLedger, MockIdentityService};
    use crate::domain::{IngredientHit, RecipeHit};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    fn test_app(
        catalog: MockCatalogQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(
            Arc::new(MockIdentityService::new()),
            Arc::new(MockFavoritesLedger::new()),
            Arc::new(catalog),
        );
        App::new()
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/v1")
                    .service(search_ingredients)
                    .service(search_recipes)
                    .service(get_recipe),
            )
    }

    #[actix_web::test]
    async fn recipe_search_forwards_query_and_filters() {
        let mut catalog = MockCatalogQuery::new();
        catalog
            .expect_search_recipes()
            .withf(|search: &RecipeSearch| {
                search.query() == "soup"
                    && search.diet() == Some("vegan")
                    && search.cuisine() == Some("thai")
                    && search.offset() == 20
            })
            .times(1)
            .return_once(|_| {
                Ok(RecipeSearchPage {
                    results: vec![RecipeHit {
                        id: ExternalId::new(42),
                        title: "Soup".to_owned(),
                        image: None,
                    }],
                    offset: 20,
                    total_results: 21,
                })
            });

        let app = actix_test::init_service(test_app(catalog)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/recipes/search?query=soup&diet=vegan&cuisine=thai&offset=20")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["totalResults"], 21);
        assert_eq!(body["results"][0]["title"], "Soup");
    }

    #[actix_web::test]
    async fn ingredient_search_rejects_a_blank_query() {
        let app = actix_test::init_service(test_app(MockCatalogQuery::new())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients/search?query=%20%20")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "empty_query");
    }

    #[actix_web::test]
    async fn ingredient_search_returns_hits() {
        let mut catalog = MockCatalogQuery::new();
        catalog
            .expect_search_ingredients()
            .withf(|search: &IngredientSearch| search.query() == "banana")
            .times(1)
            .return_once(|_| {
                Ok(IngredientSearchPage {
                    results: vec![IngredientHit {
                        id: ExternalId::new(9266),
                        name: "banana".to_owned(),
                        image: Some("banana.jpg".to_owned()),
                    }],
                    offset: 0,
                    total_results: 1,
                })
            });

        let app = actix_test::init_service(test_app(catalog)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients/search?query=banana")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["results"][0]["id"], 9266);
        assert_eq!(body["results"][0]["image"], "banana.jpg");
    }

    #[actix_web::test]
    async fn missing_recipe_is_not_found() {
        let mut catalog = MockCatalogQuery::new();
        catalog
            .expect_get_recipe()
            .times(1)
            .return_once(|_| Err(Error::not_found("provider has no such record: recipe 404")));

        let app = actix_test::init_service(test_app(catalog)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/recipes/404")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
