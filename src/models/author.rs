//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::form::{optional_date, required_text};
use crate::error::FormError;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author with the number of books they own
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub book_count: i64,
}

/// Raw `/add_author` form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub date_of_death: Option<String>,
}

/// Validated author ready for insertion
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewAuthor {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl TryFrom<&AuthorForm> for NewAuthor {
    type Error = FormError;

    fn try_from(form: &AuthorForm) -> Result<Self, Self::Error> {
        let author = NewAuthor {
            name: required_text(form.name.as_deref(), "Name")?,
            birth_date: optional_date(form.birthdate.as_deref(), "Birth date")?,
            date_of_death: optional_date(form.date_of_death.as_deref(), "Date of death")?,
        };
        author.validate()?;

        if let (Some(born), Some(died)) = (author.birth_date, author.date_of_death) {
            if died < born {
                return Err(FormError::DeathBeforeBirth);
            }
        }

        Ok(author)
    }
}
