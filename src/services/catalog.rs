//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorSummary, NewAuthor},
        book::{Book, BookListing, BookQuery, NewBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Whether the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Search and order the book listing
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookListing>> {
        self.repository.books.list(query).await
    }

    /// Authors ordered by name, for the book form's author choices
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn author_summaries(&self) -> AppResult<Vec<AuthorSummary>> {
        self.repository.authors.list_summaries().await
    }

    /// Create an author with a unique name.
    ///
    /// The name is checked up front for a friendly message; the store's
    /// unique constraint still decides if another request inserts the same
    /// name in between.
    pub async fn create_author(&self, data: &NewAuthor) -> AppResult<Author> {
        if self.repository.authors.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "An author named '{}' already exists",
                data.name
            )));
        }

        let author = self.repository.authors.create(data).await?;
        tracing::info!(author_id = author.id, name = %author.name, "Author created");
        Ok(author)
    }

    /// Create a book. A present ISBN (already without hyphens) must be unused.
    pub async fn create_book(&self, data: &NewBook) -> AppResult<Book> {
        if let Some(ref isbn) = data.isbn {
            if let Some(existing) = self.repository.books.find_by_isbn(isbn).await? {
                tracing::debug!(existing_id = existing.id, isbn = %isbn, "Duplicate ISBN rejected");
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, title = %book.title, author_id = book.author_id, "Book created");
        Ok(book)
    }

    /// Delete a book, returning what was deleted
    pub async fn delete_book(&self, id: i64) -> AppResult<Book> {
        let book = self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, title = %book.title, "Book deleted");
        Ok(book)
    }

    /// Delete an author and all their books
    pub async fn delete_author(&self, id: i64) -> AppResult<(Author, u64)> {
        let (author, books_deleted) = self.repository.authors.delete_with_books(id).await?;
        tracing::info!(author_id = id, name = %author.name, books_deleted, "Author deleted");
        Ok((author, books_deleted))
    }
}
