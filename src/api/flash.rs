//! Flash messages carried across a redirect in a signed cookie.
//!
//! A POST handler stores the message and redirects; the next page render
//! extracts it with [`PendingFlash`], which also clears the cookie.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::{views::Flash, AppState};

pub const FLASH_COOKIE: &str = "flash";

/// Cookie-safe encoding of a flash message
pub fn encode(flash: &Flash) -> String {
    let json = serde_json::to_vec(flash).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode(value: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Queue `flash` for the next rendered page
pub fn set_flash(jar: SignedCookieJar, flash: &Flash) -> SignedCookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, encode(flash)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// The flash message sent with a request, if any.
///
/// The message is only trusted when its signature verifies, but any `flash`
/// cookie on the request is cleared, tampered or not.
pub struct PendingFlash {
    flash: Option<Flash>,
    jar: CookieJar,
}

impl PendingFlash {
    pub fn from_headers(headers: &HeaderMap, key: Key) -> Self {
        let flash = SignedCookieJar::from_headers(headers, key)
            .get(FLASH_COOKIE)
            .and_then(|cookie| decode(cookie.value()));

        let jar = CookieJar::from_headers(headers);
        let jar = if jar.get(FLASH_COOKIE).is_some() {
            jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
        } else {
            jar
        };

        Self { flash, jar }
    }

    /// The verified message, and the jar that clears the cookie in the response
    pub fn take(self) -> (CookieJar, Option<Flash>) {
        (self.jar, self.flash)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for PendingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, state.flash_key.clone()))
    }
}
