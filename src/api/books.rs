//! Book endpoints: listing, creation form, deletion and the JSON listing

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    flash::{set_flash, PendingFlash},
    form_failure_status, PageResult,
};
use crate::{
    error::{AppError, AppResult},
    models::book::{BookForm, BookListing, BookQuery, BookQueryParams, BookSort, NewBook},
    views::{self, Flash},
    AppState,
};

/// Book listing page with search and sort
pub async fn index(
    State(state): State<AppState>,
    pending: PendingFlash,
    Query(params): Query<BookQueryParams>,
) -> PageResult<(CookieJar, Html<String>)> {
    let query = BookQuery::from(&params);
    let books = state.services.catalog.list_books(&query).await?;
    let (jar, flash) = pending.take();
    Ok((jar, Html(views::books::index_page(&books, &query, flash.as_ref()))))
}

/// Empty book form with author choices
pub async fn book_form(
    State(state): State<AppState>,
    pending: PendingFlash,
) -> PageResult<(CookieJar, Html<String>)> {
    let authors = state.services.catalog.list_authors().await?;
    let (jar, flash) = pending.take();
    let page = views::books::book_form_page(&BookForm::default(), &authors, flash.as_ref());
    Ok((jar, Html(page)))
}

/// Create a book from the submitted form
pub async fn create_book(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<BookForm>,
) -> PageResult<Response> {
    let result = match NewBook::try_from(&form) {
        Ok(book) => state.services.catalog.create_book(&book).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(book) => {
            let flash = Flash::success(format!("Book '{}' successfully added!", book.title));
            Ok((set_flash(jar, &flash), Redirect::to("/add_book")).into_response())
        }
        Err(e) => {
            let Some(status) = form_failure_status(&e) else {
                return Err(e.into());
            };
            tracing::debug!("Book form rejected: {}", e);
            let authors = state.services.catalog.list_authors().await?;
            let flash = Flash::danger(e.public_message());
            let page = views::books::book_form_page(&form, &authors, Some(&flash));
            Ok((status, Html(page)).into_response())
        }
    }
}

/// Delete a book; its author stays
pub async fn delete_book(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
) -> PageResult<(SignedCookieJar, Redirect)> {
    let book = state.services.catalog.delete_book(id).await?;
    let flash = Flash::success(format!("Book '{}' deleted.", book.title));
    Ok((set_flash(jar, &flash), Redirect::to("/")))
}

/// Book as returned by the JSON listing
#[derive(Serialize, ToSchema)]
pub struct BookEntry {
    #[serde(flatten)]
    pub book: BookListing,
    /// Cover image URL derived from the ISBN
    pub cover_url: String,
}

/// Book listing response
#[derive(Serialize, ToSchema)]
pub struct BooksListResponse {
    pub books: Vec<BookEntry>,
    pub sort: BookSort,
    pub keyword: Option<String>,
}

/// List books, optionally filtered and sorted
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQueryParams),
    responses(
        (status = 200, description = "Books, filtered and ordered", body = BooksListResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<BookQueryParams>,
) -> AppResult<Json<BooksListResponse>> {
    let query = BookQuery::from(&params);
    let books = state
        .services
        .catalog
        .list_books(&query)
        .await?
        .into_iter()
        .map(|book| BookEntry {
            cover_url: book.cover_url(),
            book,
        })
        .collect();

    Ok(Json(BooksListResponse {
        books,
        sort: query.sort,
        keyword: query.keyword,
    }))
}
