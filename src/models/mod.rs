//! Data models for Bookshelf

pub mod author;
pub mod book;
pub mod form;
pub mod search;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorSummary, NewAuthor};
pub use book::{Book, BookForm, BookListing, BookQuery, BookQueryParams, BookSort, NewBook};
