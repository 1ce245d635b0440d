//! Backend entry-point: migrations, pool, and HTTP server bootstrap.

mod server;

use std::env;
use std::net::SocketAddr;

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::auth::TokenVerifier;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{create_server, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    run_migrations(database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let verifier = TokenVerifier::new(&jwt_secret()?);

    info!(%bind_addr, "starting placement portal backend");
    create_server(ServerConfig::new(bind_addr, verifier, pool))?.await
}

/// Load the bearer-token secret from `JWT_SECRET_FILE`.
///
/// Debug builds (or `JWT_ALLOW_EPHEMERAL=1`) fall back to a random secret
/// so local runs work without provisioning; every restart then invalidates
/// outstanding tokens.
fn jwt_secret() -> std::io::Result<Vec<u8>> {
    let path =
        env::var("JWT_SECRET_FILE").unwrap_or_else(|_| "/var/run/secrets/jwt_secret".into());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let allow_dev = env::var("JWT_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %path, error = %e, "using ephemeral JWT secret (dev only)");
                Ok(uuid::Uuid::new_v4().into_bytes().to_vec())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read JWT secret at {path}: {e}"
                )))
            }
        }
    }
}

/// Run pending migrations on a blocking connection before serving.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        Ok(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task panicked: {e}")))?
}
