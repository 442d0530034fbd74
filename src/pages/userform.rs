use crate::userform::{Field, UserForm, ValidationReport};
use crate::view::{escape_html, Template};

/// The editable form. `report` is `None` until the form has been validated
/// once, so a fresh form shows no error or success styling.
#[derive(Debug, Clone)]
pub struct UserFormPage {
    pub form: UserForm,
    pub report: Option<ValidationReport>,
}

impl UserFormPage {
    fn field(&self, field: Field, input_type: &str, placeholder: &str) -> String {
        let value = match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Phone => &self.form.phone,
        };
        let (state_class, feedback) = match &self.report {
            Some(report) if report.has_errors(field) => {
                let messages: Vec<String> = report
                    .errors_for(field)
                    .iter()
                    .map(|m| escape_html(m))
                    .collect();
                (
                    " is-invalid",
                    format!(
                        r#"<div class="invalid-feedback">{}</div>"#,
                        messages.join("<br>")
                    ),
                )
            }
            Some(_) => (" is-valid", String::new()),
            None => ("", String::new()),
        };
        format!(
            r#"<div class="mb-3">
    <label for="{id}" class="form-label">{label}</label>
    <input type="{input_type}" id="{id}" name="{id}" class="form-control{state_class}" placeholder="{placeholder}" value="{value}">
    {feedback}
</div>"#,
            id = field.as_str(),
            label = field.label(),
            input_type = input_type,
            state_class = state_class,
            placeholder = escape_html(placeholder),
            value = escape_html(value),
            feedback = feedback,
        )
    }

    fn tag_list(&self) -> String {
        let badges: String = if self.form.tags.is_empty() {
            r#"<span class="text-muted">No tags yet</span>"#.to_string()
        } else {
            self.form
                .tags
                .iter()
                .enumerate()
                .map(|(index, tag)| {
                    let tag = escape_html(tag);
                    format!(
                        r##"<span class="badge text-bg-primary me-1">{tag} <button type="button" class="btn-close btn-close-white" aria-label="Remove {tag}" hx-post="/userform/remove-tag?index={index}" hx-target="#tag-list" hx-swap="outerHTML"></button></span>"##,
                    )
                })
                .collect()
        };
        format!(r#"<div id="tag-list" class="mb-2">{}</div>"#, badges)
    }

    fn form_section(&self) -> String {
        format!(
            r##"<div id="form-section">
<form hx-post="/userform/submit" hx-target="#form-section" hx-swap="outerHTML" novalidate>
{name}
{email}
{phone}
<div class="mb-3">
    <label class="form-label">Tags</label>
    {tags}
    <div class="input-group">
        <input type="text" name="newTag" class="form-control" placeholder="Add a tag">
        <button type="button" class="btn btn-outline-secondary" hx-post="/userform/add-tag" hx-include="[name='newTag']" hx-target="#tag-list" hx-swap="outerHTML">Add tag</button>
    </div>
</div>
<button type="button" class="btn btn-outline-primary" hx-post="/userform/validate" hx-include="closest form" hx-target="#form-section" hx-swap="outerHTML">Validate</button>
<button type="submit" class="btn btn-primary">Submit</button>
</form>
</div>"##,
            name = self.field(Field::Name, "text", "Your name"),
            email = self.field(Field::Email, "email", "you@example.com"),
            phone = self.field(Field::Phone, "tel", "10 digits"),
            tags = self.tag_list(),
        )
    }
}

impl Template for UserFormPage {
    const NAME: &'static str = "userform";

    fn title(&self) -> &'static str {
        "User Form Validation Demo"
    }

    fn body(&self) -> String {
        format!(
            "<h1>User Form Validation Demo</h1>\n{}",
            self.form_section()
        )
    }

    fn fragment(&self, name: &str) -> Option<String> {
        match name {
            "form-section" => Some(self.form_section()),
            "tag-list" => Some(self.tag_list()),
            _ => None,
        }
    }
}

/// Confirmation shown after a valid submission.
#[derive(Debug, Clone)]
pub struct SuccessPage {
    pub form: UserForm,
}

impl SuccessPage {
    fn success_section(&self) -> String {
        let tags = if self.form.tags.is_empty() {
            "none".to_string()
        } else {
            self.form
                .tags
                .iter()
                .map(|t| escape_html(t))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            r#"<div id="form-section" class="alert alert-success">
<h4 class="alert-heading">Thanks, {name}!</h4>
<p>Your details were submitted successfully.</p>
<ul class="mb-2">
    <li>Email: {email}</li>
    <li>Phone: {phone}</li>
    <li>Tags: {tags}</li>
</ul>
<a href="/userform" class="alert-link">Fill in another form</a>
</div>"#,
            name = escape_html(&self.form.name),
            email = escape_html(&self.form.email),
            phone = escape_html(&self.form.phone),
            tags = tags,
        )
    }
}

impl Template for SuccessPage {
    const NAME: &'static str = "success";

    fn title(&self) -> &'static str {
        "Submission Received"
    }

    fn body(&self) -> String {
        self.success_section()
    }

    fn fragment(&self, name: &str) -> Option<String> {
        match name {
            "form-section-success" => Some(self.success_section()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userform::{initialize_form, validate_form};

    #[test]
    fn fresh_form_has_no_validation_state() {
        let page = UserFormPage {
            form: initialize_form(),
            report: None,
        };
        let html = page.fragment("form-section").unwrap();
        assert!(!html.contains("is-invalid"));
        assert!(!html.contains("is-valid"));
        assert!(html.contains("htmx-enthusiast"));
        assert!(html.contains("spring-boot-dev"));
    }

    #[test]
    fn invalid_fields_are_marked_with_messages() {
        let mut form = initialize_form();
        form.name = "Jo".to_string();
        form.email = "nope".to_string();
        let report = validate_form(&form);
        let html = UserFormPage {
            form,
            report: Some(report),
        }
        .fragment("form-section")
        .unwrap();
        assert!(html.contains(r#"class="form-control is-valid" placeholder="Your name""#));
        assert!(html.contains("Please enter a valid email address"));
        assert!(html.contains("Phone is required<br>Phone must be exactly 10 digits"));
        assert_eq!(html.matches("is-invalid").count(), 2);
    }

    #[test]
    fn tag_list_renders_remove_buttons_by_index() {
        let page = UserFormPage {
            form: initialize_form(),
            report: None,
        };
        let html = page.fragment("tag-list").unwrap();
        assert!(html.starts_with(r#"<div id="tag-list""#));
        assert!(html.contains("/userform/remove-tag?index=0"));
        assert!(html.contains("/userform/remove-tag?index=1"));
        assert_eq!(html.matches("badge").count(), 2);
    }

    #[test]
    fn submitted_values_are_escaped() {
        let mut form = initialize_form();
        form.name = r#""><script>"#.to_string();
        let html = UserFormPage { form, report: None }.fragment("form-section").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn success_section_replaces_form_region() {
        let mut form = initialize_form();
        form.name = "John Doe".to_string();
        let html = SuccessPage { form }
            .fragment("form-section-success")
            .unwrap();
        assert!(html.starts_with(r#"<div id="form-section""#));
        assert!(html.contains("Thanks, John Doe!"));
        assert!(html.contains("htmx-enthusiast, spring-boot-dev"));
    }
}
