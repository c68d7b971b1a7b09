//! Database initialization and versioned schema migrations.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Schema steps, applied in order above the database's `user_version`.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("schema.sql"))];

/// Open (creating if needed) the SQLite database at `db_path` and migrate it.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    // A single writer is all the calculator ever has.
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    info!("Database ready at {}", db_path);
    Ok(pool)
}

async fn schema_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(pool)
        .await
}

/// Apply every migration newer than the stored schema version.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let current = schema_version(pool).await?;

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        info!("Applying schema migration {}", version);
        let mut tx = pool.begin().await?;
        for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        let bump = format!("PRAGMA user_version = {}", version);
        sqlx::query(&bump).execute(&mut *tx).await?;
        tx.commit().await?;
    }

    Ok(())
}
