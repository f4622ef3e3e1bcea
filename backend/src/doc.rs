//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all HTTP endpoints from the inbound layer, the shared
//! schemas, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, FavoritesSnapshot, Ingredient, IngredientHit, IngredientSearchPage, Recipe,
    RecipeHit, RecipeSearchPage, User,
};
use crate::inbound::http::accounts::{LoginRequest, ProfileUpdateRequest, RegisterRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe box backend API",
        description = "HTTP interface for account management, provider search, and favorites."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_account,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::catalog::search_ingredients,
        crate::inbound::http::catalog::search_recipes,
        crate::inbound::http::catalog::get_recipe,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::save_ingredient,
        crate::inbound::http::favorites::remove_ingredient,
        crate::inbound::http::favorites::save_recipe,
        crate::inbound::http::favorites::remove_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        Ingredient,
        Recipe,
        IngredientHit,
        RecipeHit,
        IngredientSearchPage,
        RecipeSearchPage,
        FavoritesSnapshot,
        RegisterRequest,
        LoginRequest,
        ProfileUpdateRequest,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and account maintenance"),
        (name = "catalog", description = "Provider search and detail pass-through"),
        (name = "favorites", description = "Saved ingredients and recipes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
