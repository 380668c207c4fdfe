// src/db.rs

use std::time::Duration;

use sqlx::{
    AnyPool,
    any::{AnyPoolOptions, install_default_drivers},
    migrate::MigrateError,
};

const CONNECT_RETRIES: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Database flavours the service can run on.
/// Queries stay in the subset both dialects accept; only the migrations differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Some(Backend::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}

/// An in-memory SQLite database lives inside a single connection, so the pool
/// must never open a second one or recycle the first.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn pool_options(database_url: &str) -> AnyPoolOptions {
    let options = AnyPoolOptions::new().acquire_timeout(Duration::from_secs(3));
    if is_in_memory(database_url) {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(5)
    }
}

/// Opens the connection pool, retrying while the database comes up.
pub async fn connect(database_url: &str) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();

    let mut retry_count = 0;
    loop {
        match pool_options(database_url).connect(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > CONNECT_RETRIES {
                    return Err(e);
                }
                tracing::warn!(
                    "Database not ready, retrying in {}s... (Attempt {})",
                    RETRY_DELAY.as_secs(),
                    retry_count
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

/// Applies the embedded migrations for the given backend.
pub async fn migrate(pool: &AnyPool, backend: Backend) -> Result<(), MigrateError> {
    match backend {
        Backend::Postgres => sqlx::migrate!("./migrations/postgres").run(pool).await,
        Backend::Sqlite => sqlx::migrate!("./migrations/sqlite").run(pool).await,
    }
}
