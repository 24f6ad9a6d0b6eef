//! PostgreSQL persistence for Clinidex.
//!
//! Exposes the connection pool helpers, the embedded migrations, one model
//! module per table, and one repository per table. Repositories are unit
//! structs with async CRUD methods returning `sqlx` errors; classification
//! into the domain error taxonomy happens at the api boundary.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool type.
pub type DbPool = PgPool;

/// Default maximum pool size.
const MAX_CONNECTIONS: u32 = 10;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by startup and the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
