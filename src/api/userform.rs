//! User form demo handlers.
//!
//! Every handler works on the form owned by the caller's session and holds
//! that form's lock for the whole request, so requests of one session never
//! interleave their mutations. A successful submit closes the form before
//! releasing the lock; requests queued behind it land on a fresh form.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::routes::AppState;
use super::types::{AddTagParams, RemoveTagParams};
use crate::pages::{SuccessPage, UserFormPage};
use crate::userform::{self, FormFields, SessionId};
use crate::view::View;

pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
) -> View<UserFormPage> {
    let form = state.forms.lock(session).await.form.clone();
    View::page(UserFormPage { form, report: None })
}

pub async fn validate(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    body: Option<Form<FormFields>>,
) -> View<UserFormPage> {
    let mut slot = state.forms.lock(session).await;
    let form = &mut slot.form;
    if let Some(Form(fields)) = body {
        userform::bind_fields(form, fields);
    }
    let report = userform::validate_form(form);
    tracing::debug!(
        session = %session,
        valid = report.is_valid(),
        "Validated form"
    );

    View::fragment(
        "form-section",
        UserFormPage {
            form: form.clone(),
            report: Some(report),
        },
    )
}

pub async fn add_tag(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<AddTagParams>,
    body: Option<Form<AddTagParams>>,
) -> View<UserFormPage> {
    let new_tag = params
        .new_tag
        .or_else(|| body.and_then(|Form(b)| b.new_tag));

    let mut slot = state.forms.lock(session).await;
    let form = &mut slot.form;
    if userform::add_tag(form, new_tag.as_deref()) {
        tracing::debug!(session = %session, tags = form.tags.len(), "Added tag");
    }

    View::fragment(
        "tag-list",
        UserFormPage {
            form: form.clone(),
            report: None,
        },
    )
}

pub async fn remove_tag(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<RemoveTagParams>,
    body: Option<Form<RemoveTagParams>>,
) -> Result<View<UserFormPage>, (StatusCode, String)> {
    let raw = params
        .index
        .or_else(|| body.and_then(|Form(b)| b.index))
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "Missing required parameter: index".to_string(),
            )
        })?;
    let index: i64 = raw.trim().parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid index: {}", raw),
        )
    })?;

    let mut slot = state.forms.lock(session).await;
    let form = &mut slot.form;
    if userform::remove_tag(form, index) {
        tracing::debug!(session = %session, index, "Removed tag");
    }

    Ok(View::fragment(
        "tag-list",
        UserFormPage {
            form: form.clone(),
            report: None,
        },
    ))
}

/// Validate and, on success, end the session's form.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    body: Option<Form<FormFields>>,
) -> Response {
    let mut slot = state.forms.lock(session).await;
    let form = &mut slot.form;
    if let Some(Form(fields)) = body {
        userform::bind_fields(form, fields);
    }

    let report = userform::validate_form(form);
    if !report.is_valid() {
        let invalid: Vec<&str> = report.invalid_fields().map(|f| f.as_str()).collect();
        tracing::debug!(session = %session, ?invalid, "Submission rejected");
        return View::fragment(
            "form-section",
            UserFormPage {
                form: form.clone(),
                report: Some(report),
            },
        )
        .into_response();
    }

    let submitted = form.clone();
    state.forms.complete(session, &mut slot).await;
    tracing::info!(session = %session, tags = submitted.tags.len(), "Form submitted");

    View::fragment("form-section-success", SuccessPage { form: submitted }).into_response()
}
