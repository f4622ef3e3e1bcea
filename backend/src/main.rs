//! Backend entry-point: wires configuration, persistence, the provider
//! source, and the REST server.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use backend::outbound::provider::{ProviderHttpConfig, ProviderHttpSource};
use backend::server::{ServerConfig, create_server};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.spoonacular.com";

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn required_env(name: &str) -> std::io::Result<String> {
    env::var(name).map_err(|_| std::io::Error::other(format!("{name} must be set")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let database_url = required_env("DATABASE_URL")?;
    run_migrations(&database_url)
        .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
    let db_pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;

    let provider_base_url: Url = env::var("PROVIDER_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid PROVIDER_BASE_URL: {e}")))?;
    let provider_api_key = required_env("PROVIDER_API_KEY")?;
    let provider_timeout = env::var("PROVIDER_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map_or(Duration::from_secs(10), Duration::from_secs);
    let catalog_source = ProviderHttpSource::new(
        ProviderHttpConfig::new(provider_base_url, provider_api_key)
            .with_timeout(provider_timeout),
    )
    .map_err(|e| std::io::Error::other(format!("provider client setup failed: {e}")))?;

    let config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        bind_addr,
        db_pool,
        Arc::new(catalog_source),
    );

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
