//! Server-rendered markup for the three demos.
//!
//! Each template exposes its swappable regions as named fragments; the
//! full page body is assembled from the same fragment functions so both
//! render modes always agree.

mod counter;
mod tasksearch;
mod userform;

pub use counter::CounterPage;
pub use tasksearch::TaskSearchPage;
pub use userform::{SuccessPage, UserFormPage};

use crate::view::escape_html;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";
const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Wrap a page body in the shared document.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{css}">
    <script src="{htmx}"></script>
</head>
<body>
    <nav class="navbar navbar-expand bg-body-tertiary mb-4">
        <div class="container">
            <a class="navbar-brand" href="/">htmx demo</a>
            <div class="navbar-nav">
                <a class="nav-link" href="/">Counter</a>
                <a class="nav-link" href="/tasksearch">Task Search</a>
                <a class="nav-link" href="/userform">User Form</a>
            </div>
        </div>
    </nav>
    <main class="container">
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        css = BOOTSTRAP_CSS,
        htmx = HTMX_SRC,
        body = body,
    )
}
