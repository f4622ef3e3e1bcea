//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never escape this module tree.
//! - **Strongly typed errors**: database failures map onto the port error
//!   enums, with unique violations kept distinct so the domain can arbitrate
//!   races and answer conflicts.

mod diesel_favorites_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use diesel_favorites_repository::DieselFavoritesRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations over a short-lived synchronous connection.
///
/// Called once at startup before the async pool is built.
///
/// # Errors
///
/// Returns the underlying connection or migration error.
pub fn run_migrations(
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = diesel::PgConnection::establish(database_url)?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}
