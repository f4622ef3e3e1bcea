//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{Argon2CredentialHasher, CatalogService, FavoritesService, IdentityManager};
use crate::inbound::http::accounts::{
    current_account, delete_account, login, logout, register, update_profile,
};
use crate::inbound::http::catalog::{get_recipe, search_ingredients, search_recipes};
use crate::inbound::http::favorites::{
    list_favorites, remove_ingredient, remove_recipe, save_ingredient, save_recipe,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{DieselFavoritesRepository, DieselUserRepository};

/// Wire the domain services onto the Diesel and provider adapters.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let user_repository = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let favorites_repository = Arc::new(DieselFavoritesRepository::new(config.db_pool.clone()));

    let identity = Arc::new(IdentityManager::new(
        user_repository,
        Arc::new(Argon2CredentialHasher),
    ));
    let favorites = Arc::new(FavoritesService::new(
        favorites_repository,
        Arc::clone(&config.catalog_source),
    ));
    let catalog = Arc::new(CatalogService::new(Arc::clone(&config.catalog_source)));

    HttpState::new(identity, favorites, catalog)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // `/recipes/search` must register before `/recipes/{id}`.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(current_account)
        .service(update_profile)
        .service(delete_account)
        .service(search_ingredients)
        .service(search_recipes)
        .service(get_recipe)
        .service(list_favorites)
        .service(save_ingredient)
        .service(remove_ingredient)
        .service(save_recipe)
        .service(remove_recipe);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        catalog_source: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
