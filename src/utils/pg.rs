use std::time::Duration;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

// helper method to build the connection pool for the postgres store
pub async fn build_pool(config: &Configuration) -> LibraryResult<PgPool> {
    let url = config.database_url.as_deref().ok_or_else(|| LibraryError::runtime(
        "DATABASE_URL is required for the postgres store", Some("configuration".to_string())))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await?;
    info!(max_connections = config.max_connections, "connected to postgres");
    Ok(pool)
}

pub async fn create_table(pool: &PgPool, table_name: &str) -> LibraryResult<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            isbn TEXT PRIMARY KEY,
            amazon_url TEXT NOT NULL,
            author TEXT NOT NULL,
            language TEXT NOT NULL,
            pages INTEGER NOT NULL,
            publisher TEXT NOT NULL,
            title TEXT NOT NULL,
            year INTEGER NOT NULL
        )
        "#,
        table_name);
    sqlx::query(&sql)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|err| LibraryError::database(
            format!("failed to create {} table due to {}", table_name, err).as_str(), None, false))
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                LibraryError::not_found("row not found")
            }
            sqlx::Error::Database(db_err) => {
                let reason = db_err.code().map(|code| code.to_string());
                if db_err.is_unique_violation() {
                    LibraryError::duplicate_key(db_err.message())
                } else {
                    LibraryError::database(
                        format!("postgres database error {}", db_err.message()).as_str(), reason, false)
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                LibraryError::unavailable(
                    format!("postgres database unavailable {}", err).as_str(), Some("unavailable".to_string()), true)
            }
            other => {
                LibraryError::database(format!("postgres error {}", other).as_str(), None, false)
            }
        }
    }
}
