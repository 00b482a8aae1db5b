// Contact data model
// Wire payloads and the persisted record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Submission body as received; absent fields stay `None` so they can be
/// reported as missing instead of failing deserialization
#[derive(Debug, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated, sanitized submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Persisted form of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ContactRecord {
    pub fn from_submission(
        submission: ContactSubmission,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            created_at: Utc::now(),
            ip_address,
            user_agent,
        }
    }
}

/// A record together with its store-assigned identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContact {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: ContactRecord,
}

/// Body of a successful submission
#[derive(Debug, Serialize)]
pub struct SubmissionAccepted {
    pub success: bool,
    pub message: &'static str,
    pub id: String,
}

pub const SUBMISSION_ACCEPTED: &str =
    "Contact form submitted successfully. Thank you for reaching out!";

impl SubmissionAccepted {
    pub const fn new(id: String) -> Self {
        Self {
            success: true,
            message: SUBMISSION_ACCEPTED,
            id,
        }
    }
}

/// Body of the admin listing
#[derive(Debug, Serialize)]
pub struct ContactPage {
    pub contacts: Vec<StoredContact>,
    pub total: usize,
    pub skip: u64,
    pub limit: u32,
}
