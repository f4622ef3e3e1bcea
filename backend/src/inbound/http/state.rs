//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogQuery, FavoritesLedger, IdentityService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account registration, login, and maintenance.
    pub identity: Arc<dyn IdentityService>,
    /// Favorites ledger for saved ingredients and recipes.
    pub favorites: Arc<dyn FavoritesLedger>,
    /// Read-only provider search and detail queries.
    pub catalog: Arc<dyn CatalogQuery>,
}

impl HttpState {
    /// Bundle the driving ports for the HTTP layer.
    pub fn new(
        identity: Arc<dyn IdentityService>,
        favorites: Arc<dyn FavoritesLedger>,
        catalog: Arc<dyn CatalogQuery>,
    ) -> Self {
        Self {
            identity,
            favorites,
            catalog,
        }
    }
}
