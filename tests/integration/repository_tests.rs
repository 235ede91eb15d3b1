//! Store-level guarantees that hold even when the service pre-checks are skipped

use bookshelf_server::{
    models::{
        author::NewAuthor,
        book::{BookQuery, NewBook},
    },
    repository::Repository,
    AppError,
};

use crate::common::TestApp;

fn author(name: &str) -> NewAuthor {
    NewAuthor {
        name: name.to_string(),
        birth_date: None,
        date_of_death: None,
    }
}

fn book(title: &str, isbn: Option<&str>, author_id: i64) -> NewBook {
    NewBook {
        title: title.to_string(),
        isbn: isbn.map(str::to_string),
        publication_year: None,
        rating: None,
        author_id,
    }
}

#[tokio::test]
async fn test_duplicate_author_name_is_conflict() {
    let app = TestApp::new().await;
    let repo = Repository::new(app.pool.clone());

    repo.authors.create(&author("Jane Doe")).await.unwrap();
    let err = repo.authors.create(&author("Jane Doe")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);

    assert_eq!(app.count("SELECT COUNT(*) FROM authors").await, 1);
}

#[tokio::test]
async fn test_duplicate_isbn_is_conflict() {
    let app = TestApp::new().await;
    let repo = Repository::new(app.pool.clone());
    let kr = repo.authors.create(&author("Brian Kernighan")).await.unwrap();

    repo.books
        .create(&book("The C Programming Language", Some("9780131103627"), kr.id))
        .await
        .unwrap();
    let err = repo
        .books
        .create(&book("Another Title", Some("9780131103627"), kr.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);

    // Missing ISBNs never collide
    repo.books.create(&book("Notes", None, kr.id)).await.unwrap();
    repo.books.create(&book("More Notes", None, kr.id)).await.unwrap();

    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 3);
}

#[tokio::test]
async fn test_book_for_unknown_author_is_validation_error() {
    let app = TestApp::new().await;
    let repo = Repository::new(app.pool.clone());

    let err = repo.books.create(&book("Orphan", None, 42)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 0);
}

#[tokio::test]
async fn test_backfill_makes_old_rows_searchable() {
    let app = TestApp::new().await;
    let repo = Repository::new(app.pool.clone());

    // Rows written before the search key columns existed
    sqlx::query("INSERT INTO authors (name) VALUES ('Émile Zola')")
        .execute(&app.pool)
        .await
        .unwrap();
    let zola = app.scalar("SELECT id FROM authors").await;
    sqlx::query("INSERT INTO books (title, author_id) VALUES ('Thérèse Raquin', ?)")
        .bind(zola)
        .execute(&app.pool)
        .await
        .unwrap();

    let query = BookQuery {
        keyword: Some("THÉRÈSE".to_string()),
        ..Default::default()
    };
    assert!(repo.books.list(&query).await.unwrap().is_empty());

    repo.backfill_search_keys().await.unwrap();

    let found = repo.books.list(&query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].author_name, "Émile Zola");
    assert_eq!(
        app.count("SELECT COUNT(*) FROM authors WHERE name_search = 'émile zola'").await,
        1
    );
}
