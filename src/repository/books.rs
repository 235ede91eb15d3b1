//! Books repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookListing, BookQuery, NewBook},
        search::search_key,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Books joined with their author, filtered and ordered per `query`.
    ///
    /// The keyword matches as a case-insensitive substring of the title or
    /// the author name, compared on the folded search keys. `instr` keeps
    /// `%` and `_` in the keyword literal.
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<BookListing>> {
        let where_clause = if query.keyword.is_some() {
            "WHERE instr(b.title_search, ?) > 0 OR instr(a.name_search, ?) > 0"
        } else {
            ""
        };

        let select_q = format!(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_year, b.rating, b.author_id,
                   a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            {}
            ORDER BY {}
            "#,
            where_clause,
            query.sort.order_by()
        );

        let mut builder = sqlx::query_as::<_, BookListing>(&select_q);
        if let Some(ref keyword) = query.keyword {
            let key = search_key(keyword);
            builder = builder.bind(key.clone()).bind(key);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Book carrying this (already normalized) ISBN, if any
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, title, publication_year, rating, author_id
            FROM books WHERE isbn = ?
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a book.
    ///
    /// A unique violation on `isbn` becomes `Conflict`; a foreign key
    /// violation (unknown author) becomes `Validation`.
    pub async fn create(&self, data: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, title_search, publication_year, rating, author_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, isbn, title, publication_year, rating, author_id
            "#,
        )
        .bind(&data.isbn)
        .bind(&data.title)
        .bind(search_key(&data.title))
        .bind(data.publication_year)
        .bind(data.rating)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                format!(
                    "A book with ISBN {} already exists",
                    data.isbn.as_deref().unwrap_or_default()
                ),
            ),
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::Validation(format!("Author {} does not exist", data.author_id))
            }
            other => other.into(),
        })
    }

    /// Delete a book, returning it. The author is left untouched.
    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            DELETE FROM books WHERE id = ?
            RETURNING id, isbn, title, publication_year, rating, author_id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Fill `title_search` for rows inserted before search keys existed
    pub async fn backfill_search_keys(&self) -> AppResult<u64> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, title FROM books WHERE title_search = ''")
                .fetch_all(&self.pool)
                .await?;

        let mut tx = self.pool.begin().await?;
        for (id, title) in &rows {
            sqlx::query("UPDATE books SET title_search = ? WHERE id = ?")
                .bind(search_key(title))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(rows.len() as u64)
    }
}
