//! Built-in static assets

use axum::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};

const NO_COVER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="180" viewBox="0 0 120 180"><rect width="120" height="180" fill="#e9ecef"/><rect x="8" y="8" width="104" height="164" fill="none" stroke="#adb5bd" stroke-width="2"/><text x="60" y="95" font-family="sans-serif" font-size="14" text-anchor="middle" fill="#6c757d">No cover</text></svg>"##;

/// Placeholder cover for books without an ISBN
pub async fn no_cover() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "image/svg+xml"),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        NO_COVER_SVG,
    )
}
