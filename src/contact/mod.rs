//! Contact form domain
//!
//! Validation of incoming submissions and the record shape handed to the store.

pub mod model;
pub mod validation;

pub use model::{
    ContactPage, ContactRecord, ContactSubmission, RawSubmission, StoredContact,
    SubmissionAccepted,
};
pub use validation::{validate, Field, FieldError, FieldErrorKind, ValidationErrors};
