//! Backend entry-point: wires REST endpoints, storage, and OpenAPI docs.

mod server;

use std::io;
use std::net::SocketAddr;

use actix_web::web;
use mockable::{DefaultEnv, Env};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fansite::inbound::http::health::HealthState;
use fansite::inbound::http::session_config::{BuildMode, session_settings_from_env};
use fansite::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&env, mode).map_err(io::Error::other)?;
    let bind_addr = bind_addr_from_env(&env)?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool) = db_pool_from_env(&env, mode).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

fn bind_addr_from_env<E: Env>(env: &E) -> io::Result<SocketAddr> {
    let raw = env
        .string("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    raw.parse().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid BIND_ADDR '{raw}': {e}"),
        )
    })
}

/// Migrate and connect when `DATABASE_URL` is set. Debug builds fall back to
/// in-memory storage without it.
async fn db_pool_from_env<E: Env>(env: &E, mode: BuildMode) -> io::Result<Option<DbPool>> {
    let Some(database_url) = env.string("DATABASE_URL").filter(|url| !url.trim().is_empty())
    else {
        if mode == BuildMode::Release {
            return Err(io::Error::other(
                "missing required environment variable: DATABASE_URL",
            ));
        }
        warn!("DATABASE_URL not set; guestbook entries will not survive a restart");
        return Ok(None);
    };

    run_pending_migrations(&database_url)
        .await
        .map_err(io::Error::other)?;

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(raw) = env.string("DB_POOL_MAX_SIZE") {
        let max_size = raw.trim().parse::<u32>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid DB_POOL_MAX_SIZE '{raw}': {e}"),
            )
        })?;
        pool_config = pool_config.with_max_size(max_size);
    }

    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    info!("connected to guestbook database");
    Ok(Some(pool))
}
