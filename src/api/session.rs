//! Cookie-based session identity for the form demo.
//!
//! Requests without a valid session cookie get a freshly minted id, which
//! is returned to the browser via `Set-Cookie`. Handlers read the id from
//! the request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};

use super::routes::AppState;
use crate::userform::SessionId;

/// Find the session id carried by the cookie called `name`.
///
/// A malformed value is treated as no session.
pub fn session_from_headers(headers: &HeaderMap, name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| SessionId::parse(value))
}

pub async fn ensure_session(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let cookie_name = state.config.session_cookie.as_str();
    let (session, issued) = match session_from_headers(req.headers(), cookie_name) {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    };
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;

    if issued {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", cookie_name, session);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
                tracing::debug!(session = %session, "Issued session cookie");
            }
            Err(e) => tracing::warn!("Failed to build session cookie: {}", e),
        }
    }
    response
}
