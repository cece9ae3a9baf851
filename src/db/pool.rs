//! Database connection pool management
//!
//! Pooled connections are probed before reuse and recycled hourly, so a
//! long-lived store does not hand out connections that died with a
//! database restart. The schema migrations shipped in `migrations/` are
//! embedded here and applied through [`run_migrations`].

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{error, info};

use crate::config::Config;

/// Schema migrations embedded from the crate's `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the PostgreSQL pool for the review store
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .test_before_acquire(true)
        .max_lifetime(Duration::from_secs(3600))
        .connect(&config.database_url)
        .await?;

    info!(
        max_connections = config.db_max_connections,
        "review store connected to PostgreSQL"
    );

    Ok(pool)
}

/// Apply any pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;

    info!("review schema is up to date");

    Ok(())
}

/// Probe the database with a trivial round-trip
pub async fn health_check(pool: &PgPool) -> bool {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            error!("review store health check failed: {e}");
            false
        }
    }
}
