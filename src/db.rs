use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

use crate::config::Config;

const CREATE_TODOS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );"#;

/// Creates the database if it doesn't exist yet, connects a pool and makes
/// sure the `todos` table is in place.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let url = config.database_url.as_str();

    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        tracing::info!(url, "creating database");
        Sqlite::create_database(url).await?;
    } else {
        tracing::info!(url, "database already exists");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;
    tracing::info!("connection to the database is successful");

    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;
    tracing::debug!("todos table ready");
    Ok(())
}

/// Private in-memory database. Pinned to one connection that never expires,
/// since every SQLite memory connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}
