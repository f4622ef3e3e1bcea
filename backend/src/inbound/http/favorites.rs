//! Favorites API handlers.
//!
//! ```text
//! GET /api/v1/favorites
//! POST /api/v1/favorites/ingredients/{id}
//! DELETE /api/v1/favorites/ingredients/{id}
//! POST /api/v1/favorites/recipes/{id}
//! DELETE /api/v1/favorites/recipes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Error, ExternalId, FavoritesSnapshot, Ingredient, Recipe};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List the authenticated user's saved ingredients and recipes.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Saved favorites", body = FavoritesSnapshot),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FavoritesSnapshot>> {
    let user_id = session.require_user_id()?;
    let snapshot = state.favorites.list_favorites(user_id).await?;
    Ok(web::Json(snapshot))
}

/// Save an ingredient, materialising the provider record on first reference.
///
/// Saving an already saved ingredient is a no-op that returns the cached row.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/ingredients/{id}",
    params(("id" = i64, Path, description = "Provider ingredient identifier")),
    responses(
        (status = 200, description = "Saved ingredient", body = Ingredient),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Provider has no such ingredient", body = Error),
        (status = 503, description = "Provider unavailable", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "saveIngredient"
)]
#[post("/favorites/ingredients/{id}")]
pub async fn save_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Ingredient>> {
    let user_id = session.require_user_id()?;
    let ingredient = state
        .favorites
        .add_ingredient(user_id, ExternalId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ingredient))
}

/// Remove a saved ingredient. Removing an unsaved ingredient also succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/ingredients/{id}",
    params(("id" = i64, Path, description = "Provider ingredient identifier")),
    responses(
        (status = 204, description = "Ingredient no longer saved"),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "removeIngredient"
)]
#[delete("/favorites/ingredients/{id}")]
pub async fn remove_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .favorites
        .remove_ingredient(user_id, ExternalId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Save a recipe, materialising the provider record on first reference.
///
/// Saving an already saved recipe is a no-op that returns the cached row.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/recipes/{id}",
    params(("id" = i64, Path, description = "Provider recipe identifier")),
    responses(
        (status = 200, description = "Saved recipe", body = Recipe),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Provider has no such recipe", body = Error),
        (status = 503, description = "Provider unavailable", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "saveRecipe"
)]
#[post("/favorites/recipes/{id}")]
pub async fn save_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Recipe>> {
    let user_id = session.require_user_id()?;
    let recipe = state
        .favorites
        .add_recipe(user_id, ExternalId::new(path.into_inner()))
        .await?;
    Ok(web::Json(recipe))
}

/// Remove a saved recipe. Removing an unsaved recipe also succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/recipes/{id}",
    params(("id" = i64, Path, description = "Provider recipe identifier")),
    responses(
        (status = 204, description = "Recipe no longer saved"),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "removeRecipe"
)]
#[delete("/favorites/recipes/{id}")]
pub async fn remove_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .favorites
        .remove_recipe(user_id, ExternalId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
