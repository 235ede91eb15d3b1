//! Author pages

use super::{layout, value_attr, Flash};
use crate::models::author::AuthorForm;

/// The `/add_author` form, refilled with `form` after a rejected submission
pub fn author_form_page(form: &AuthorForm, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<form method="post" action="/add_author">
<label for="name">Name</label>
<input id="name" name="name" type="text" maxlength="100" required {name}>
<label for="birthdate">Birth date</label>
<input id="birthdate" name="birthdate" type="date" {birthdate}>
<label for="date_of_death">Date of death</label>
<input id="date_of_death" name="date_of_death" type="date" {date_of_death}>
<p><button type="submit">Add author</button></p>
</form>"#,
        name = value_attr(form.name.as_deref()),
        birthdate = value_attr(form.birthdate.as_deref()),
        date_of_death = value_attr(form.date_of_death.as_deref()),
    );
    layout("Add author", flash, &content)
}
