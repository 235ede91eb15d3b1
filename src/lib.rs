//! Bookshelf
//!
//! A small library catalog: register authors, register books linked to an
//! author, list/search/sort the catalog and delete books or authors.
//! Server-rendered HTML forms, plus a read-only JSON API under `/api/v1`.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use api::create_router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Signs the flash cookie
    pub flash_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let flash_key = derive_flash_key(&config.flash.secret);
        let services = services::Services::new(repository::Repository::new(pool));
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            flash_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.flash_key.clone()
    }
}

/// Signing keys need 64 bytes; stretch the configured secret with SHA-512.
pub fn derive_flash_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
