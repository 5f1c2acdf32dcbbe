//! Idempotent schema bootstrap for the `jobs` table.

use crate::DbPool;

/// Statements executed in order by [`ensure_schema`]. Each one is safe to
/// re-run against an existing schema.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS jobs ( \
         id UUID PRIMARY KEY, \
         prompt TEXT NOT NULL, \
         status VARCHAR(20) NOT NULL DEFAULT 'pending', \
         created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
         updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
         video_url VARCHAR(500), \
         error TEXT \
     )",
    "CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs (status)",
    "CREATE OR REPLACE FUNCTION jobs_set_updated_at() RETURNS TRIGGER AS $$ \
     BEGIN \
         NEW.updated_at = NOW(); \
         RETURN NEW; \
     END; \
     $$ LANGUAGE plpgsql",
    "DROP TRIGGER IF EXISTS trg_jobs_updated_at ON jobs",
    "CREATE TRIGGER trg_jobs_updated_at BEFORE UPDATE ON jobs \
     FOR EACH ROW EXECUTE FUNCTION jobs_set_updated_at()",
];

/// Create the `jobs` table, its indexes and the `updated_at` trigger if
/// they are missing. Runs on every startup.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Job schema ensured");
    Ok(())
}
