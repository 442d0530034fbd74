//! Session-backed user form with a dynamic tag list.
//!
//! Each session owns one [`UserForm`]. It is created lazily with
//! [`initialize_form`], mutated by the tag operations and by field binding,
//! and dropped from the [`FormSessionStore`] once a submission validates.

mod store;
mod validation;

pub use store::{FormGuard, FormSessionStore, FormSlot, SessionId, SharedForm};
pub use validation::{validate_form, Field, Rule, ValidationReport, FIELD_RULES};

use serde::{Deserialize, Serialize};

/// Tags every fresh form starts with.
pub const SEED_TAGS: [&str; 2] = ["htmx-enthusiast", "spring-boot-dev"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Ordered, duplicates allowed.
    pub tags: Vec<String>,
}

/// Submitted field values. Absent fields leave the form untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A fresh form: empty contact fields and the seed tags.
pub fn initialize_form() -> UserForm {
    UserForm {
        name: String::new(),
        email: String::new(),
        phone: String::new(),
        tags: SEED_TAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Append `new_tag` trimmed. Missing or blank input is ignored.
///
/// Returns whether a tag was added.
pub fn add_tag(form: &mut UserForm, new_tag: Option<&str>) -> bool {
    match new_tag.map(str::trim) {
        Some(tag) if !tag.is_empty() => {
            form.tags.push(tag.to_string());
            true
        }
        _ => false,
    }
}

/// Remove the tag at `index`. Out-of-range indexes, negative ones included, are ignored.
///
/// Returns whether a tag was removed.
pub fn remove_tag(form: &mut UserForm, index: i64) -> bool {
    match usize::try_from(index) {
        Ok(i) if i < form.tags.len() => {
            form.tags.remove(i);
            true
        }
        _ => false,
    }
}

/// Copy the submitted field values onto the form.
pub fn bind_fields(form: &mut UserForm, fields: FormFields) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(email) = fields.email {
        form.email = email;
    }
    if let Some(phone) = fields.phone {
        form.phone = phone;
    }
}
