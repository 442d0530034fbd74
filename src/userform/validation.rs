//! Field validation as ordered lists of named rules.
//!
//! Every rule of every field is evaluated, so a form can report several
//! failing fields (and several messages per field) at once.

use std::sync::LazyLock;

use regex::Regex;

use super::UserForm;

// Dot-atom local part; non-ASCII is allowed in both halves.
const EMAIL_ATOM: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+";
const EMAIL_LABEL: &str =
    r"[A-Za-z0-9\x{80}-\x{10FFFF}](?:[A-Za-z0-9\x{80}-\x{10FFFF}-]{0,61}[A-Za-z0-9\x{80}-\x{10FFFF}])?";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{atom}(?:\.{atom})*@{label}(?:\.{label})*$",
        atom = EMAIL_ATOM,
        label = EMAIL_LABEL,
    ))
    .expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    fn value(self, form: &UserForm) -> &str {
        match self {
            Field::Name => &form.name,
            Field::Email => &form.email,
            Field::Phone => &form.phone,
        }
    }
}

/// A pure predicate over a field value plus the message shown when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub message: &'static str,
    pub check: fn(&str) -> bool,
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

// Measured in UTF-16 code units, so "😀" has length 2.
fn name_length(value: &str) -> bool {
    (2..=50).contains(&value.encode_utf16().count())
}

// Empty input is left to the `required` rule.
fn email_syntax(value: &str) -> bool {
    value.is_empty() || EMAIL_RE.is_match(value)
}

fn ten_digits(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

const NAME_RULES: &[Rule] = &[
    Rule {
        name: "required",
        message: "Name is required",
        check: not_blank,
    },
    Rule {
        name: "length",
        message: "Name must be between 2 and 50 characters",
        check: name_length,
    },
];

const EMAIL_RULES: &[Rule] = &[
    Rule {
        name: "required",
        message: "Email is required",
        check: not_blank,
    },
    Rule {
        name: "email",
        message: "Please enter a valid email address",
        check: email_syntax,
    },
];

const PHONE_RULES: &[Rule] = &[
    Rule {
        name: "required",
        message: "Phone is required",
        check: not_blank,
    },
    Rule {
        name: "pattern",
        message: "Phone must be exactly 10 digits",
        check: ten_digits,
    },
];

/// Rules per field, in display order.
pub const FIELD_RULES: &[(Field, &[Rule])] = &[
    (Field::Name, NAME_RULES),
    (Field::Email, EMAIL_RULES),
    (Field::Phone, PHONE_RULES),
];

/// Outcome of validating a form: failed rules grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<(Field, Vec<&'static str>)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self, field: Field) -> bool {
        !self.errors_for(field).is_empty()
    }

    /// Messages for `field`, in rule order.
    pub fn errors_for(&self, field: Field) -> &[&'static str] {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|(field, _)| *field)
    }
}

/// Run every rule against the form. Never mutates it.
pub fn validate_form(form: &UserForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (field, rules) in FIELD_RULES {
        let value = field.value(form);
        let failed: Vec<&'static str> = rules
            .iter()
            .filter(|rule| !(rule.check)(value))
            .map(|rule| rule.message)
            .collect();
        if !failed.is_empty() {
            report.errors.push((*field, failed));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userform::initialize_form;

    fn form(name: &str, email: &str, phone: &str) -> UserForm {
        UserForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            ..initialize_form()
        }
    }

    #[test]
    fn valid_form_passes() {
        let report = validate_form(&form("Jo", "a@b.com", "1234567890"));
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn empty_name_fails_required_and_length() {
        let report = validate_form(&form("", "a@b.com", "1234567890"));
        assert!(!report.is_valid());
        assert_eq!(
            report.errors_for(Field::Name),
            &[
                "Name is required",
                "Name must be between 2 and 50 characters"
            ]
        );
        assert!(!report.has_errors(Field::Email));
    }

    #[test]
    fn name_length_boundaries() {
        assert!(validate_form(&form("J", "a@b.com", "1234567890")).has_errors(Field::Name));
        assert!(!validate_form(&form("Jo", "a@b.com", "1234567890")).has_errors(Field::Name));
        let fifty = "x".repeat(50);
        assert!(!validate_form(&form(&fifty, "a@b.com", "1234567890")).has_errors(Field::Name));
        let fifty_one = "x".repeat(51);
        assert!(validate_form(&form(&fifty_one, "a@b.com", "1234567890")).has_errors(Field::Name));
    }

    #[test]
    fn name_length_counts_utf16_units() {
        assert!(!validate_form(&form("😀", "a@b.com", "1234567890")).has_errors(Field::Name));
        assert!(validate_form(&form("é", "a@b.com", "1234567890")).has_errors(Field::Name));
        let fifty_units = "😀".repeat(25);
        assert!(!validate_form(&form(&fifty_units, "a@b.com", "1234567890")).has_errors(Field::Name));
        let fifty_two_units = "😀".repeat(26);
        assert!(validate_form(&form(&fifty_two_units, "a@b.com", "1234567890")).has_errors(Field::Name));
    }

    #[test]
    fn whitespace_name_is_blank() {
        let report = validate_form(&form("   ", "a@b.com", "1234567890"));
        assert_eq!(report.errors_for(Field::Name), &["Name is required"]);
    }

    #[test]
    fn email_syntax() {
        assert!(!validate_form(&form("Jo", "a@b.com", "1234567890")).has_errors(Field::Email));
        let report = validate_form(&form("Jo", "not-an-email", "1234567890"));
        assert_eq!(
            report.errors_for(Field::Email),
            &["Please enter a valid email address"]
        );
    }

    #[test]
    fn email_local_part_is_a_dot_atom() {
        for bad in [".@b.com", "a..b@c.com", "a.@b.com", ".a@b.com", "a@.com", "a@b..com"] {
            let report = validate_form(&form("Jo", bad, "1234567890"));
            assert_eq!(
                report.errors_for(Field::Email),
                &["Please enter a valid email address"],
                "{bad} should be rejected"
            );
        }
        for good in ["a.b@c.com", "first.middle.last@example.org", "a@b", "o'neil+tag@x-y.io"] {
            let report = validate_form(&form("Jo", good, "1234567890"));
            assert!(!report.has_errors(Field::Email), "{good} should be accepted");
        }
    }

    #[test]
    fn email_accepts_non_ascii_letters() {
        for good in ["josé@example.com", "用户@例子.广告", "müller@bücher.de"] {
            let report = validate_form(&form("Jo", good, "1234567890"));
            assert!(!report.has_errors(Field::Email), "{good} should be accepted");
        }
    }

    #[test]
    fn empty_email_only_reports_required() {
        let report = validate_form(&form("Jo", "", "1234567890"));
        assert_eq!(report.errors_for(Field::Email), &["Email is required"]);
    }

    #[test]
    fn phone_must_be_ten_digits() {
        assert!(!validate_form(&form("Jo", "a@b.com", "1234567890")).has_errors(Field::Phone));
        for bad in ["123", "12345678901", "12345abcde", "123-456-78"] {
            let report = validate_form(&form("Jo", "a@b.com", bad));
            assert_eq!(
                report.errors_for(Field::Phone),
                &["Phone must be exactly 10 digits"],
                "{bad}"
            );
        }
    }

    #[test]
    fn all_fields_fail_together() {
        let report = validate_form(&form("", "", ""));
        let fields: Vec<Field> = report.invalid_fields().collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Phone]);
    }

    #[test]
    fn validation_does_not_touch_the_form() {
        let original = form("", "bad", "1");
        let copy = original.clone();
        let _ = validate_form(&original);
        assert_eq!(original, copy);
    }
}
