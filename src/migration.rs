//! Startup schema bootstrap: create the database if missing, then apply the embedded
//! migrations under `migrations/` in version order. Must finish before the listener binds.

use crate::error::MigrationError;
use sqlx::migrate::{Migration, Migrator};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgPool};
use std::collections::HashSet;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Migration history table maintained by sqlx.
const HISTORY_TABLE: &str = "_sqlx_migrations";

const INVALID_CATALOG_NAME: &str = "3D000";

/// Ensure the database named in `options` exists; create it if not. The target is tried
/// first; only when the server reports it missing (SQLSTATE 3D000) does this connect to the
/// server's `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), MigrationError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    match options.connect().await {
        Ok(conn) => {
            conn.close().await?;
            return Ok(());
        }
        Err(e) if is_missing_database(&e) => {}
        Err(e) => return Err(e.into()),
    }
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    conn.close().await?;
    Ok(())
}

/// `invalid_catalog_name`: the database in the connection options does not exist.
fn is_missing_database(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(INVALID_CATALOG_NAME),
        _ => false,
    }
}

/// Apply every migration not yet recorded in the history table. Returns how many were pending.
/// Running it again on an up-to-date database applies nothing.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, MigrationError> {
    let applied = applied_versions(pool).await?;
    let pending = pending_migrations(&MIGRATOR, &applied);
    for m in &pending {
        tracing::info!(version = m.version, description = %m.description, "applying migration");
    }
    MIGRATOR.run(pool).await?;
    tracing::info!(pending = pending.len(), "database migrations checked/applied");
    Ok(pending.len())
}

/// Known up-migrations whose version is not in `applied`, lowest version first.
pub fn pending_migrations<'m>(migrator: &'m Migrator, applied: &HashSet<i64>) -> Vec<&'m Migration> {
    let mut pending: Vec<&Migration> = migrator
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .collect();
    pending.sort_by_key(|m| m.version);
    pending
}

async fn applied_versions(pool: &PgPool) -> Result<HashSet<i64>, sqlx::Error> {
    let has_history: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(HISTORY_TABLE)
        .fetch_one(pool)
        .await?;
    if !has_history {
        return Ok(HashSet::new());
    }
    let versions: Vec<i64> = sqlx::query_scalar(&format!(
        "SELECT version FROM {} WHERE success",
        HISTORY_TABLE
    ))
    .fetch_all(pool)
    .await?;
    Ok(versions.into_iter().collect())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
