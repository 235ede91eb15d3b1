//! Catalog behavior through the HTTP surface

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use crate::common::{body_text, set_cookie, TestApp};

fn titles(listing: &serde_json::Value) -> Vec<String> {
    listing["books"]
        .as_array()
        .expect("books array")
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new().await;

    let body = app.get_json("/api/v1/health").await;
    assert_eq!(body["status"], "healthy");

    let body = app.get_json("/api/v1/ready").await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_end_to_end_author_book_listing() {
    let app = TestApp::new().await;
    let jane = app.create_author("Jane+Doe").await;

    let response = app
        .post_form(
            "/add_book",
            &format!(
                "title=Sample+Title&isbn=1234567890&publication_year=2020&author_id={}&rating=",
                jane
            ),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/add_book");

    let page = body_text(app.get("/?sort=title").await).await;
    assert!(page.contains("Sample Title"));
    assert!(page.contains("Jane Doe"));
    assert!(page.contains("https://covers.openlibrary.org/b/isbn/1234567890-M.jpg"));

    let listing = app.get_json("/api/v1/books?sort=title").await;
    let book = &listing["books"][0];
    assert_eq!(book["title"], "Sample Title");
    assert_eq!(book["author_name"], "Jane Doe");
    assert_eq!(book["author_id"], jane);
    assert_eq!(book["publication_year"], 2020);
    assert_eq!(book["cover_url"], "https://covers.openlibrary.org/b/isbn/1234567890-M.jpg");
    assert_eq!(listing["sort"], "title");
}

#[tokio::test]
async fn test_book_without_isbn_uses_placeholder_cover() {
    let app = TestApp::new().await;
    let author = app.create_author("Anonymous").await;
    assert_eq!(app.create_book("Beowulf", "", author).await, StatusCode::SEE_OTHER);

    let listing = app.get_json("/api/v1/books").await;
    assert_eq!(listing["books"][0]["isbn"], serde_json::Value::Null);
    assert_eq!(listing["books"][0]["cover_url"], "/static/no-cover.png");

    let response = app.get("/static/no-cover.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test]
async fn test_author_sort_follows_name_order() {
    let app = TestApp::new().await;
    for (name, title) in [("Zadie+Smith", "A+Title"), ("Alice+Munro", "Z+Title"), ("Mark+Twain", "M+Title")] {
        let id = app.create_author(name).await;
        assert_eq!(app.create_book(title, "", id).await, StatusCode::SEE_OTHER);
    }

    let listing = app.get_json("/api/v1/books?sort=author").await;
    let authors: Vec<&str> = listing["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["author_name"].as_str().unwrap())
        .collect();
    let mut expected = authors.clone();
    expected.sort();
    assert_eq!(authors, expected);
    assert_eq!(authors, vec!["Alice Munro", "Mark Twain", "Zadie Smith"]);

    let listing = app.get_json("/api/v1/books?sort=title").await;
    assert_eq!(titles(&listing), vec!["A Title", "M Title", "Z Title"]);

    // Unknown sort keys fall back to title order
    let listing = app.get_json("/api/v1/books?sort=rating").await;
    assert_eq!(listing["sort"], "title");
    assert_eq!(titles(&listing), vec!["A Title", "M Title", "Z Title"]);
}

#[tokio::test]
async fn test_duplicate_author_rejected() {
    let app = TestApp::new().await;
    app.create_author("Jane+Doe").await;

    let response = app
        .post_form("/add_author", "name=Jane+Doe&birthdate=1950-01-01&date_of_death=")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let page = body_text(response).await;
    assert!(page.contains("already exists"));
    assert!(page.contains("flash-danger"));

    assert_eq!(app.count("SELECT COUNT(*) FROM authors WHERE name = 'Jane Doe'").await, 1);
}

#[tokio::test]
async fn test_blank_author_name_rejected() {
    let app = TestApp::new().await;

    let response = app.post_form("/add_author", "name=+++&birthdate=&date_of_death=").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Name is required"));
    assert_eq!(app.count("SELECT COUNT(*) FROM authors").await, 0);
}

#[tokio::test]
async fn test_malformed_date_is_reported_not_fatal() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/add_author", "name=Jane+Doe&birthdate=31%2F12%2F1970&date_of_death=")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await;
    assert!(page.contains("Birth date must be a date in YYYY-MM-DD form"));
    // The submitted values are kept in the form
    assert!(page.contains(r#"value="Jane Doe""#));
    assert_eq!(app.count("SELECT COUNT(*) FROM authors").await, 0);
}

#[tokio::test]
async fn test_death_before_birth_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/add_author", "name=Jane+Doe&birthdate=1970-05-02&date_of_death=1970-05-01")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await;
    assert!(page.contains("Date of death cannot be earlier than birth date"));
    assert_eq!(app.count("SELECT COUNT(*) FROM authors").await, 0);

    // Same day is fine
    let response = app
        .post_form("/add_author", "name=Jane+Doe&birthdate=1970-05-02&date_of_death=1970-05-02")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_author_dates_are_stored() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            "/add_author",
            "name=Mary+Shelley&birthdate=1797-08-30&date_of_death=1851-02-01",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let listing = app.get_json("/api/v1/authors").await;
    let author = &listing["authors"][0];
    assert_eq!(author["name"], "Mary Shelley");
    assert_eq!(author["birth_date"], "1797-08-30");
    assert_eq!(author["date_of_death"], "1851-02-01");
    assert_eq!(author["book_count"], 0);
}

#[tokio::test]
async fn test_duplicate_isbn_after_hyphen_stripping_rejected() {
    let app = TestApp::new().await;
    let author = app.create_author("Brian+Kernighan").await;

    assert_eq!(
        app.create_book("The+C+Programming+Language", "978-0-13-110362-7", author).await,
        StatusCode::SEE_OTHER
    );
    assert_eq!(
        app.create_book("K%26R+Second+Printing", "9780131103627", author).await,
        StatusCode::CONFLICT
    );
    assert_eq!(
        app.create_book("K%26R+Reprint", "978-0131103627", author).await,
        StatusCode::CONFLICT
    );

    assert_eq!(
        app.count("SELECT COUNT(*) FROM books WHERE isbn = '9780131103627'").await,
        1
    );
    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 1);
}

#[tokio::test]
async fn test_books_without_isbn_may_share_absence() {
    let app = TestApp::new().await;
    let author = app.create_author("Homer").await;
    assert_eq!(app.create_book("Iliad", "", author).await, StatusCode::SEE_OTHER);
    assert_eq!(app.create_book("Odyssey", "", author).await, StatusCode::SEE_OTHER);
    assert_eq!(app.count("SELECT COUNT(*) FROM books WHERE isbn IS NULL").await, 2);
}

#[tokio::test]
async fn test_book_form_rejections() {
    let app = TestApp::new().await;
    let author = app.create_author("Frank+Herbert").await;

    // Unknown author: refused by the foreign key, reported on the form
    assert_eq!(
        app.create_book("Dune", "", author + 1000).await,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    // Non-numeric year
    let response = app
        .post_form(
            "/add_book",
            &format!("title=Dune&isbn=&publication_year=nineteen&author_id={}&rating=", author),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await;
    assert!(page.contains("Publication year must be a whole number"));
    assert!(page.contains(&format!(r#"<option value="{}" selected>Frank Herbert</option>"#, author)));

    // Blank title
    assert_eq!(
        app.create_book("++", "", author).await,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 0);
}

#[tokio::test]
async fn test_search_by_title_or_author() {
    let app = TestApp::new().await;
    let tolkien = app.create_author("J.R.R.+Tolkien").await;
    let herbert = app.create_author("Frank+Herbert").await;
    let carpenter = app.create_author("Humphrey+Carpenter").await;

    app.create_book("The+Hobbit", "", tolkien).await;
    app.create_book("Dune", "", herbert).await;
    app.create_book("Tolkien%3A+A+Biography", "", carpenter).await;

    let listing = app.get_json("/api/v1/books?q=tOlKiEn").await;
    assert_eq!(titles(&listing), vec!["The Hobbit", "Tolkien: A Biography"]);
    assert_eq!(listing["keyword"], "tOlKiEn");

    let listing = app.get_json("/api/v1/books?q=+dune+&sort=author").await;
    assert_eq!(titles(&listing), vec!["Dune"]);
    assert_eq!(listing["keyword"], "dune");

    let listing = app.get_json("/api/v1/books?q=").await;
    assert_eq!(titles(&listing).len(), 3);
    assert_eq!(listing["keyword"], serde_json::Value::Null);

    // Wildcards are matched literally
    let listing = app.get_json("/api/v1/books?q=%25").await;
    assert!(titles(&listing).is_empty());

    let page = body_text(app.get("/?q=nothing+like+this").await).await;
    assert!(page.contains("No books match"));
    assert!(page.contains(r#"value="nothing like this""#));
}

#[tokio::test]
async fn test_delete_book_keeps_author() {
    let app = TestApp::new().await;
    let author = app.create_author("Ursula+K.+Le+Guin").await;
    app.create_book("A+Wizard+of+Earthsea", "", author).await;
    let book_id = app.scalar("SELECT id FROM books").await;

    let response = app.post_form(&format!("/book/{}/delete", book_id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM authors").await, 1);
}

#[tokio::test]
async fn test_delete_missing_book_is_not_found() {
    let app = TestApp::new().await;
    let author = app.create_author("Jane+Doe").await;
    app.create_book("Sample+Title", "", author).await;

    let response = app.post_form("/book/99999/delete", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book 99999 not found"));

    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 1);
}

#[tokio::test]
async fn test_delete_author_cascades_to_books() {
    let app = TestApp::new().await;
    let doomed = app.create_author("Jane+Doe").await;
    let other = app.create_author("John+Roe").await;
    for title in ["One", "Two", "Three"] {
        assert_eq!(app.create_book(title, "", doomed).await, StatusCode::SEE_OTHER);
    }
    app.create_book("Kept", "", other).await;

    let response = app.post_form(&format!("/author/{}/delete", doomed), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let cookie = set_cookie(&response).expect("flash cookie");
    let page = body_text(
        app.send(
            Request::get("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await,
    )
    .await;
    assert!(page.contains("and 3 book(s) deleted."));

    assert_eq!(
        app.count(&format!("SELECT COUNT(*) FROM books WHERE author_id = {}", doomed)).await,
        0
    );
    assert_eq!(
        app.count(&format!("SELECT COUNT(*) FROM authors WHERE id = {}", doomed)).await,
        0
    );
    assert_eq!(app.count("SELECT COUNT(*) FROM books").await, 1);
}

#[tokio::test]
async fn test_delete_missing_author_is_not_found() {
    let app = TestApp::new().await;
    let response = app.post_form("/author/4242/delete", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flash_message_shown_once() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/add_author", "name=Jane+Doe&birthdate=&date_of_death=")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/add_author");
    let cookie = set_cookie(&response).expect("flash cookie");
    assert!(cookie.starts_with("flash="));

    let response = app
        .send(
            Request::get("/add_author")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(removal.starts_with("flash=;"));
    assert!(removal.contains("Max-Age=0"));
    let page = body_text(response).await;
    assert!(page.contains("flash-success"));
    assert!(page.contains("Author &#39;Jane Doe&#39; successfully added!"));

    // Without the cookie, nothing is shown
    let page = body_text(app.get("/add_author").await).await;
    assert!(!page.contains("successfully added"));
}

#[tokio::test]
async fn test_tampered_flash_is_ignored() {
    let app = TestApp::new().await;
    let response = app
        .send(
            Request::get("/")
                .header(header::COOKIE, "flash=eyJsZXZlbCI6InN1Y2Nlc3MifQ")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = set_cookie(&response).expect("tampered cookie is cleared");
    assert_eq!(removal, "flash=");
    let header = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(header.contains("Max-Age=0"));
    assert!(!body_text(response).await.contains("class=\"flash "));
}

#[tokio::test]
async fn test_stale_flash_cleared_on_every_page() {
    let app = TestApp::new().await;
    for uri in ["/", "/add_author", "/add_book"] {
        let response = app
            .send(
                Request::get(uri)
                    .header(header::COOKIE, "flash=left-over-from-old-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        assert_eq!(set_cookie(&response).as_deref(), Some("flash="), "GET {}", uri);
    }

    // No cookie sent, nothing to clear
    let response = app.get("/").await;
    assert_eq!(set_cookie(&response), None);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let app = TestApp::new().await;
    let zola = app.create_author("%C3%89mile+Zola").await;
    let herbert = app.create_author("Frank+Herbert").await;
    assert_eq!(app.create_book("Germinal", "", zola).await, StatusCode::SEE_OTHER);
    assert_eq!(app.create_book("Dune", "", herbert).await, StatusCode::SEE_OTHER);

    for q in ["%C3%A9mile", "%C3%89MILE", "zOLA", "germinal"] {
        let listing = app.get_json(&format!("/api/v1/books?q={}", q)).await;
        assert_eq!(titles(&listing), vec!["Germinal"], "q={}", q);
    }

    // Decomposed input (e + combining acute) matches the composed name
    let listing = app.get_json("/api/v1/books?q=e%CC%81mile").await;
    assert_eq!(titles(&listing), vec!["Germinal"]);

    let listing = app.get_json("/api/v1/authors").await;
    assert!(listing.to_string().contains("Émile Zola"));
}

#[tokio::test]
async fn test_book_form_lists_authors() {
    let app = TestApp::new().await;

    let page = body_text(app.get("/add_book").await).await;
    assert!(page.contains("No authors yet"));

    app.create_author("Zora+Neale+Hurston").await;
    app.create_author("Chinua+Achebe").await;
    let page = body_text(app.get("/add_book").await).await;
    let achebe = page.find("Chinua Achebe").expect("Achebe listed");
    let hurston = page.find("Zora Neale Hurston").expect("Hurston listed");
    assert!(achebe < hurston);
}
