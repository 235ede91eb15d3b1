//! Book model, listing rows and search parameters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::form::{optional_number, optional_text, required_id, required_text};
use crate::error::FormError;

/// Placeholder shown for books without an ISBN
pub const NO_COVER_URL: &str = "/static/no-cover.png";

/// Cover image from the Open Library covers host, or the placeholder.
pub fn cover_url(isbn: Option<&str>) -> String {
    match isbn {
        Some(isbn) if !isbn.is_empty() => {
            format!("https://covers.openlibrary.org/b/isbn/{}-M.jpg", isbn)
        }
        _ => NO_COVER_URL.to_string(),
    }
}

/// ISBNs are stored and compared without hyphens.
pub fn normalize_isbn(raw: &str) -> Option<String> {
    let isbn: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if isbn.is_empty() {
        None
    } else {
        Some(isbn)
    }
}

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub publication_year: Option<i32>,
    pub rating: Option<i32>,
    pub author_id: i64,
}

impl Book {
    pub fn cover_url(&self) -> String {
        cover_url(self.isbn.as_deref())
    }
}

/// Book joined with its author, as shown in the listing
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookListing {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub publication_year: Option<i32>,
    pub rating: Option<i32>,
    pub author_id: i64,
    pub author_name: String,
}

impl BookListing {
    pub fn cover_url(&self) -> String {
        cover_url(self.isbn.as_deref())
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookSort {
    #[default]
    Title,
    Author,
}

impl BookSort {
    /// Unknown values fall back to title order.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("author") => BookSort::Author,
            _ => BookSort::Title,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookSort::Title => "title",
            BookSort::Author => "author",
        }
    }

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            BookSort::Title => "b.title, b.id",
            BookSort::Author => "a.name, b.title, b.id",
        }
    }
}

/// Query parameters for the book listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQueryParams {
    /// `title` (default) or `author`
    pub sort: Option<String>,
    /// Case-insensitive substring of the title or the author name
    pub q: Option<String>,
}

/// Normalized listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub sort: BookSort,
    pub keyword: Option<String>,
}

impl From<&BookQueryParams> for BookQuery {
    fn from(params: &BookQueryParams) -> Self {
        Self {
            sort: BookSort::from_param(params.sort.as_deref()),
            keyword: optional_text(params.q.as_deref()),
        }
    }
}

/// Raw `/add_book` form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<String>,
    pub author_id: Option<String>,
    pub rating: Option<String>,
}

/// Validated book ready for insertion
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewBook {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub rating: Option<i32>,
    pub author_id: i64,
}

impl TryFrom<&BookForm> for NewBook {
    type Error = FormError;

    fn try_from(form: &BookForm) -> Result<Self, Self::Error> {
        let book = NewBook {
            title: required_text(form.title.as_deref(), "Title")?,
            isbn: form.isbn.as_deref().and_then(normalize_isbn),
            publication_year: optional_number(form.publication_year.as_deref(), "Publication year")?,
            rating: optional_number(form.rating.as_deref(), "Rating")?,
            author_id: required_id(form.author_id.as_deref(), "Author")?,
        };
        book.validate()?;
        Ok(book)
    }
}
