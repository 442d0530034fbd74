//! Explicit view selection.
//!
//! Handlers return a [`View`] tagged as either a full page or a named
//! fragment; rendering maps the tag to markup. Fragments carry no document
//! wrapper so htmx can swap them straight into the current page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Template {template} has no fragment named {fragment}")]
    UnknownFragment {
        template: &'static str,
        fragment: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FullPage,
    Fragment(&'static str),
}

/// A page template with named sub-regions.
pub trait Template {
    /// Template name, used in diagnostics.
    const NAME: &'static str;

    /// Document title for full-page rendering.
    fn title(&self) -> &'static str;

    /// Body markup of the full page.
    fn body(&self) -> String;

    /// Markup of a single named region, or `None` if the template has no such region.
    fn fragment(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct View<M> {
    pub kind: ViewKind,
    pub model: M,
}

impl<M: Template> View<M> {
    pub fn page(model: M) -> Self {
        Self {
            kind: ViewKind::FullPage,
            model,
        }
    }

    pub fn fragment(name: &'static str, model: M) -> Self {
        Self {
            kind: ViewKind::Fragment(name),
            model,
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        match self.kind {
            ViewKind::FullPage => Ok(crate::pages::layout(
                self.model.title(),
                &self.model.body(),
            )),
            ViewKind::Fragment(name) => {
                self.model
                    .fragment(name)
                    .ok_or(RenderError::UnknownFragment {
                        template: M::NAME,
                        fragment: name,
                    })
            }
        }
    }
}

impl<M: Template> IntoResponse for View<M> {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(markup) => Html(markup).into_response(),
            Err(e) => {
                tracing::error!("Render failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

/// Escape text for interpolation into HTML element content or quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
