//! Author endpoints

use axum::{
    extract::{Path, State},
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
    models::author::{AuthorForm, AuthorSummary, NewAuthor},
    views::{self, Flash},
    AppState,
};

/// Empty author form
pub async fn author_form(pending: PendingFlash) -> (CookieJar, Html<String>) {
    let (jar, flash) = pending.take();
    let page = views::authors::author_form_page(&AuthorForm::default(), flash.as_ref());
    (jar, Html(page))
}

/// Create an author from the submitted form
pub async fn create_author(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AuthorForm>,
) -> PageResult<Response> {
    let result = match NewAuthor::try_from(&form) {
        Ok(author) => state.services.catalog.create_author(&author).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(author) => {
            let flash = Flash::success(format!("Author '{}' successfully added!", author.name));
            Ok((set_flash(jar, &flash), Redirect::to("/add_author")).into_response())
        }
        Err(e) => {
            let Some(status) = form_failure_status(&e) else {
                return Err(e.into());
            };
            tracing::debug!("Author form rejected: {}", e);
            let flash = Flash::danger(e.public_message());
            let page = views::authors::author_form_page(&form, Some(&flash));
            Ok((status, Html(page)).into_response())
        }
    }
}

/// Delete an author and every book they own
pub async fn delete_author(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
) -> PageResult<(SignedCookieJar, Redirect)> {
    let (author, books_deleted) = state.services.catalog.delete_author(id).await?;
    let flash = Flash::success(format!(
        "Author '{}' and {} book(s) deleted.",
        author.name, books_deleted
    ));
    Ok((set_flash(jar, &flash), Redirect::to("/")))
}

/// Authors list response
#[derive(Serialize, ToSchema)]
pub struct AuthorsListResponse {
    pub authors: Vec<AuthorSummary>,
}

/// List authors with their book counts
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors ordered by name", body = AuthorsListResponse)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<AuthorsListResponse>> {
    let authors = state.services.catalog.author_summaries().await?;
    Ok(Json(AuthorsListResponse { authors }))
}
