//! HTTP handlers: HTML pages at the root, JSON API under `/api/v1`

pub mod assets;
pub mod authors;
pub mod books;
pub mod flash;
pub mod health;
pub mod openapi;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, views, AppState};

/// Error from an HTML handler, rendered as an error page instead of JSON
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = self.0.public_message();
        (status, Html(views::error_page(status, &message))).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

/// Status for re-rendering a form after a recoverable failure
pub(crate) fn form_failure_status(error: &AppError) -> Option<StatusCode> {
    match error {
        AppError::Conflict(_) => Some(StatusCode::CONFLICT),
        AppError::Validation(_) => Some(StatusCode::UNPROCESSABLE_ENTITY),
        _ => None,
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books))
        .route("/authors", get(authors::list_authors))
        .layer(cors)
        .with_state(state.clone());

    Router::new()
        .route("/", get(books::index))
        .route("/add_author", get(authors::author_form).post(authors::create_author))
        .route("/add_book", get(books::book_form).post(books::create_book))
        .route("/book/:id/delete", post(books::delete_book))
        .route("/author/:id/delete", post(authors::delete_author))
        .route("/static/no-cover.png", get(assets::no_cover))
        .with_state(state)
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}
