//! Persistent job store for vidgen.
//!
//! [`JobStore`] is the seam the API depends on. [`PgJobStore`] is the
//! production implementation; [`MemoryJobStore`] has identical semantics
//! and backs tests.

pub mod memory;
pub mod repositories;
pub mod schema;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryJobStore;
pub use repositories::PgJobStore;
pub use schema::ensure_schema;
pub use store::{JobStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
