//! Book listing and book form pages

use super::{escape, layout, value_attr, Flash};
use crate::models::{
    author::Author,
    book::{BookForm, BookListing, BookQuery, BookSort},
};

fn optional_cell(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn book_row(book: &BookListing) -> String {
    format!(
        r#"<tr>
<td><img src="{cover}" alt="Cover of {title}" loading="lazy"></td>
<td>{title}</td>
<td>{author}</td>
<td>{year}</td>
<td>{rating}</td>
<td>
<form class="inline" method="post" action="/book/{id}/delete" onsubmit="return confirm('Delete this book?')"><button type="submit">Delete book</button></form>
<form class="inline" method="post" action="/author/{author_id}/delete" onsubmit="return confirm('Delete this author and all their books?')"><button type="submit">Delete author</button></form>
</td>
</tr>"#,
        cover = escape(&book.cover_url()),
        title = escape(&book.title),
        author = escape(&book.author_name),
        year = optional_cell(book.publication_year),
        rating = optional_cell(book.rating),
        id = book.id,
        author_id = book.author_id,
    )
}

/// The `/` listing with its search box and sort selector
pub fn index_page(books: &[BookListing], query: &BookQuery, flash: Option<&Flash>) -> String {
    let keyword = query.keyword.as_deref().unwrap_or_default();
    let selected = |sort: BookSort| if query.sort == sort { " selected" } else { "" };

    let mut content = format!(
        r#"<form method="get" action="/">
<input name="q" type="search" placeholder="Search title or author" value="{keyword}">
<select name="sort">
<option value="title"{title_selected}>Sort by title</option>
<option value="author"{author_selected}>Sort by author</option>
</select>
<button type="submit">Search</button>
</form>
"#,
        keyword = escape(keyword),
        title_selected = selected(BookSort::Title),
        author_selected = selected(BookSort::Author),
    );

    if books.is_empty() {
        if keyword.is_empty() {
            content.push_str("<p>No books yet.</p>");
        } else {
            content.push_str(&format!(
                "<p>No books match &quot;{}&quot;.</p>",
                escape(keyword)
            ));
        }
    } else {
        content.push_str(
            "<table>\n<thead><tr><th>Cover</th><th>Title</th><th>Author</th><th>Year</th><th>Rating</th><th></th></tr></thead>\n<tbody>\n",
        );
        for book in books {
            content.push_str(&book_row(book));
            content.push('\n');
        }
        content.push_str("</tbody>\n</table>");
    }

    layout("Library", flash, &content)
}

/// The `/add_book` form with one choice per author
pub fn book_form_page(form: &BookForm, authors: &[Author], flash: Option<&Flash>) -> String {
    let chosen = form.author_id.as_deref().unwrap_or_default();
    let options: String = authors
        .iter()
        .map(|author| {
            let id = author.id.to_string();
            format!(
                r#"<option value="{id}"{selected}>{name}</option>"#,
                selected = if id == chosen { " selected" } else { "" },
                name = escape(&author.name),
                id = id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let author_field = if authors.is_empty() {
        r#"<p>No authors yet. <a href="/add_author">Add an author</a> first.</p>"#.to_string()
    } else {
        format!(
            r#"<select id="author_id" name="author_id" required>
<option value="">Choose an author</option>
{}
</select>"#,
            options
        )
    };

    let content = format!(
        r#"<form method="post" action="/add_book">
<label for="title">Title</label>
<input id="title" name="title" type="text" maxlength="200" required {title}>
<label for="isbn">ISBN</label>
<input id="isbn" name="isbn" type="text" maxlength="24" {isbn}>
<label for="publication_year">Publication year</label>
<input id="publication_year" name="publication_year" type="number" {year}>
<label for="author_id">Author</label>
{author_field}
<label for="rating">Rating</label>
<input id="rating" name="rating" type="number" {rating}>
<p><button type="submit">Add book</button></p>
</form>"#,
        title = value_attr(form.title.as_deref()),
        isbn = value_attr(form.isbn.as_deref()),
        year = value_attr(form.publication_year.as_deref()),
        author_field = author_field,
        rating = value_attr(form.rating.as_deref()),
    );
    layout("Add book", flash, &content)
}
