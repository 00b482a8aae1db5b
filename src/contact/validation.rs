//! Contact submission validation
//!
//! Length bounds are checked on the raw input, then free-text fields are
//! sanitized (markup stripped, whitespace trimmed) and must stay non-empty.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::model::{ContactSubmission, RawSubmission};

pub const NAME_MAX_CHARS: usize = 100;
pub const SUBJECT_MAX_CHARS: usize = 200;
pub const MESSAGE_MAX_CHARS: usize = 2000;

/// Submission field names as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Missing or empty before sanitization
    Required,
    TooLong { max: usize },
    /// Nothing left once markup and whitespace are removed
    Empty,
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub const fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    pub fn message(&self) -> String {
        match self.kind {
            FieldErrorKind::Required => format!("{} is required", self.field.label()),
            FieldErrorKind::TooLong { max } => {
                format!("{} must be at most {max} characters", self.field.label())
            }
            FieldErrorKind::Empty => format!("{} cannot be empty", self.field.label()),
            FieldErrorKind::InvalidEmail => "Email is not a valid email address".to_string(),
        }
    }
}

/// Every field error found in one submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid contact submission: {}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: Field, kind: FieldErrorKind) -> Self {
        Self {
            errors: vec![FieldError::new(field, kind)],
        }
    }

    pub fn has(&self, field: Field, kind: FieldErrorKind) -> bool {
        self.errors.iter().any(|e| e.field == field && e.kind == kind)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Script and style elements are dropped together with their content
fn embedded_code_pattern() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
            .expect("embedded code pattern is valid")
    })
}

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Strip markup tags and surrounding whitespace
///
/// ```
/// use portfolio_backend::contact::validation::sanitize;
/// assert_eq!(sanitize("<b>Test</b> Subject"), "Test Subject");
/// assert_eq!(sanitize("<script>alert(1)</script>John"), "John");
/// ```
pub fn sanitize(input: &str) -> String {
    let without_code = embedded_code_pattern().replace_all(input, "");
    tag_pattern()
        .replace_all(&without_code, "")
        .trim()
        .to_string()
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validate and normalize a submission
pub fn validate(raw: &RawSubmission) -> Result<ContactSubmission, ValidationErrors> {
    let mut errors = Vec::new();

    let name = text_field(Field::Name, raw.name.as_deref(), NAME_MAX_CHARS, &mut errors);
    let email = email_field(raw.email.as_deref(), &mut errors);
    let subject = text_field(
        Field::Subject,
        raw.subject.as_deref(),
        SUBJECT_MAX_CHARS,
        &mut errors,
    );
    let message = text_field(
        Field::Message,
        raw.message.as_deref(),
        MESSAGE_MAX_CHARS,
        &mut errors,
    );

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
            Ok(ContactSubmission {
                name,
                email,
                subject,
                message,
            })
        }
        _ => Err(ValidationErrors { errors }),
    }
}

fn text_field(
    field: Field,
    value: Option<&str>,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = value.unwrap_or_default();
    let chars = value.chars().count();
    if chars == 0 {
        errors.push(FieldError::new(field, FieldErrorKind::Required));
        return None;
    }
    if chars > max {
        errors.push(FieldError::new(field, FieldErrorKind::TooLong { max }));
        return None;
    }

    let clean = sanitize(value);
    if clean.is_empty() {
        errors.push(FieldError::new(field, FieldErrorKind::Empty));
        return None;
    }
    Some(clean)
}

fn email_field(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = value.unwrap_or_default().trim();
    if value.is_empty() {
        errors.push(FieldError::new(Field::Email, FieldErrorKind::Required));
        return None;
    }
    if !is_valid_email(value) {
        errors.push(FieldError::new(Field::Email, FieldErrorKind::InvalidEmail));
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, email: &str, subject: &str, message: &str) -> RawSubmission {
        RawSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            subject: Some(subject.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn test_sanitize_strips_tags() {
        assert_eq!(sanitize("<script>alert(1)</script>John"), "John");
        assert_eq!(sanitize("<STYLE type=\"x\">p{}</style >Jane"), "Jane");
        assert_eq!(sanitize("<b>Test</b> Subject"), "Test Subject");
        assert_eq!(sanitize("  <p>This is a test message</p>  "), "This is a test message");
        assert_eq!(sanitize("a < b and c > d"), "a  d");
        assert_eq!(sanitize("no markup"), "no markup");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "<script>alert('xss')</script>John Doe",
            "  padded  ",
            "<<b>>nested<</b>>",
            "plain",
            "<i></i>",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let sub = validate(&raw(
            "<script>alert('xss')</script>John Doe",
            " john@example.com ",
            "<b>Test</b> Subject",
            "<p>This is a test message</p>",
        ))
        .unwrap();
        assert_eq!(sub.name, "John Doe");
        assert_eq!(sub.email, "john@example.com");
        assert_eq!(sub.subject, "Test Subject");
        assert_eq!(sub.message, "This is a test message");
    }

    #[test]
    fn test_markup_only_field_is_empty() {
        let err = validate(&raw("<b></b>", "john@example.com", "Hi", "Body")).unwrap_err();
        assert!(err.has(Field::Name, FieldErrorKind::Empty));
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_whitespace_only_field_is_empty() {
        let err = validate(&raw("John", "john@example.com", "   ", "Body")).unwrap_err();
        assert!(err.has(Field::Subject, FieldErrorKind::Empty));
    }

    #[test]
    fn test_invalid_email() {
        for email in ["invalid-email", "a@b", "@example.com", "john@exa mple.com"] {
            let err = validate(&raw("John", email, "Hi", "Body")).unwrap_err();
            assert!(err.has(Field::Email, FieldErrorKind::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn test_missing_and_empty_fields_are_required() {
        let err = validate(&RawSubmission {
            name: Some("John Doe".to_string()),
            email: Some("john@example.com".to_string()),
            subject: None,
            message: Some(String::new()),
        })
        .unwrap_err();
        assert!(err.has(Field::Subject, FieldErrorKind::Required));
        assert!(err.has(Field::Message, FieldErrorKind::Required));
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_length_bounds_apply_before_sanitization() {
        let name = "x".repeat(NAME_MAX_CHARS);
        assert!(validate(&raw(&name, "a@b.io", "s", "m")).is_ok());

        // 101 characters of which most are markup still exceeds the bound
        let padded = format!("{}John", "<i>".repeat(33));
        assert_eq!(padded.chars().count(), 103);
        let err = validate(&raw(&padded, "a@b.io", "s", "m")).unwrap_err();
        assert!(err.has(
            Field::Name,
            FieldErrorKind::TooLong {
                max: NAME_MAX_CHARS
            }
        ));

        let message = "é".repeat(MESSAGE_MAX_CHARS);
        assert!(validate(&raw("n", "a@b.io", "s", &message)).is_ok());
        let subject = "s".repeat(SUBJECT_MAX_CHARS + 1);
        let err = validate(&raw("n", "a@b.io", &subject, "m")).unwrap_err();
        assert!(err.has(
            Field::Subject,
            FieldErrorKind::TooLong {
                max: SUBJECT_MAX_CHARS
            }
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FieldError::new(Field::Name, FieldErrorKind::Empty).message(),
            "Name cannot be empty"
        );
        assert_eq!(
            FieldError::new(Field::Subject, FieldErrorKind::TooLong { max: 200 }).message(),
            "Subject must be at most 200 characters"
        );
    }
}
