//! Server-rendered HTML pages

pub mod authors;
pub mod books;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }
}

/// Transient, dismissible status message shown above a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 960px; padding: 1rem; }
nav a { margin-right: 1rem; }
.flash { padding: .75rem 1rem; margin: 1rem 0; border-radius: 4px; display: flex; justify-content: space-between; }
.flash-success { background: #d1e7dd; color: #0f5132; }
.flash-danger { background: #f8d7da; color: #842029; }
.flash button { background: none; border: none; cursor: pointer; font-size: 1.1rem; }
table { border-collapse: collapse; width: 100%; }
td, th { border-bottom: 1px solid #ddd; padding: .5rem; text-align: left; vertical-align: middle; }
td img { height: 72px; }
form.inline { display: inline; }
label { display: block; margin-top: .75rem; }
"#;

fn render_flash(flash: &Flash) -> String {
    format!(
        r#"<div class="flash flash-{level}" role="alert"><span>{message}</span><button type="button" aria-label="Dismiss" onclick="this.parentElement.remove()">&times;</button></div>"#,
        level = flash.level.as_str(),
        message = escape(&flash.message),
    )
}

/// Wrap page content in the shared document skeleton
pub fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash = flash.map(render_flash).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Bookshelf</title>
<style>{style}</style>
</head>
<body>
<nav><a href="/">Library</a><a href="/add_author">Add author</a><a href="/add_book">Add book</a></nav>
{flash}
<h1>{title}</h1>
{content}
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        flash = flash,
        content = content,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        r#"<p>{}</p><p><a href="/">Back to the library</a></p>"#,
        escape(message)
    );
    layout(title, None, &content)
}

/// `value` attribute for a sticky form field
pub(crate) fn value_attr(value: Option<&str>) -> String {
    format!(r#"value="{}""#, escape(value.unwrap_or_default()))
}
