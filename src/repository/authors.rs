//! Authors repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorSummary, NewAuthor},
        search::search_key,
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: SqlitePool,
}

impl AuthorsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All authors ordered by name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM authors ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All authors with the number of books each owns
    pub async fn list_summaries(&self) -> AppResult<Vec<AuthorSummary>> {
        let rows = sqlx::query_as::<_, AuthorSummary>(
            r#"
            SELECT a.id, a.name, a.birth_date, a.date_of_death,
                   COUNT(b.id) AS book_count
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            GROUP BY a.id, a.name, a.birth_date, a.date_of_death
            ORDER BY a.name, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Author with exactly this name, if any
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert an author. A unique violation on `name` becomes `Conflict`.
    pub async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, name_search, birth_date, date_of_death)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, birth_date, date_of_death
            "#,
        )
        .bind(&data.name)
        .bind(search_key(&data.name))
        .bind(data.birth_date)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("An author named '{}' already exists", data.name))
            }
            other => other.into(),
        })
    }

    /// Delete an author together with every book they own.
    ///
    /// Books go first, inside the same transaction, so no book is ever left
    /// pointing at a missing author. Returns the deleted author and the
    /// number of books removed with it.
    pub async fn delete_with_books(&self, id: i64) -> AppResult<(Author, u64)> {
        let mut tx = self.pool.begin().await?;

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;

        let books_deleted = sqlx::query("DELETE FROM books WHERE author_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((author, books_deleted))
    }

    /// Fill `name_search` for rows inserted before search keys existed
    pub async fn backfill_search_keys(&self) -> AppResult<u64> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM authors WHERE name_search = ''")
                .fetch_all(&self.pool)
                .await?;

        let mut tx = self.pool.begin().await?;
        for (id, name) in &rows {
            sqlx::query("UPDATE authors SET name_search = ? WHERE id = ?")
                .bind(search_key(name))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(rows.len() as u64)
    }
}
