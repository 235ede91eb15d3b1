//! Repository layer for database operations

pub mod authors;
pub mod books;

use std::str::FromStr;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round trip to the store, used by `/ready`
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Compute missing search keys for rows stored before they existed
    pub async fn backfill_search_keys(&self) -> AppResult<()> {
        let authors = self.authors.backfill_search_keys().await?;
        let books = self.books.backfill_search_keys().await?;
        if authors + books > 0 {
            tracing::info!(authors, books, "Backfilled search keys");
        }
        Ok(())
    }
}

/// Connection options for a `sqlite:` URL. Foreign keys must be on for
/// every connection or books could outlive their author.
pub fn connect_options(url: &str, create_if_missing: bool) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(url)?
        .create_if_missing(create_if_missing)
        .foreign_keys(true))
}

/// Open the pool for the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(&config.url, config.create_if_missing)?)
        .await
}

/// Apply the schema in `migrations/`
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
