//! Request error type
//!
//! Handlers return [`AppError`]; [`AppError::into_response`] is the only
//! place errors turn into HTTP responses. Storage and unhandled failures are
//! logged in full and answered with a generic body.

use hyper::header::{HeaderValue, ALLOW};
use hyper::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::assets::AssetError;
use crate::contact::ValidationErrors;
use crate::http::{json_response, HttpResponse};
use crate::storage::StorageError;

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("request body is not a valid JSON object: {0}")]
    MalformedBody(String),

    #[error("invalid `{name}` parameter: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("{0}")]
    NotFound(&'static str),

    /// `detail` is the client-facing text, `source` stays in the logs
    #[error("{detail}: {source}")]
    Storage {
        detail: &'static str,
        source: StorageError,
    },

    #[error("method not allowed, expected one of {0}")]
    MethodNotAllowed(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("unhandled error: {0}")]
    Unhandled(String),
}

#[derive(Serialize)]
struct ErrorBody<'a, D: Serialize> {
    error: &'a str,
    detail: D,
}

#[derive(Serialize)]
struct FieldDetail {
    field: &'static str,
    message: String,
}

#[derive(Serialize)]
struct InternalBody {
    error: &'static str,
    message: &'static str,
}

impl AppError {
    pub const fn storage(detail: &'static str, source: StorageError) -> Self {
        Self::Storage { detail, source }
    }

    /// Map an asset lookup failure, using `missing` as the 404 detail
    pub fn from_asset(err: AssetError, missing: &'static str, failed: &'static str) -> Self {
        match err {
            AssetError::NotFound(_) => Self::NotFound(missing),
            AssetError::Io { .. } => {
                error!("{failed}: {err}");
                Self::Unhandled(failed.to_string())
            }
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::InvalidParameter { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Storage { .. } | Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status = self.status();
        match self {
            Self::Validation(errors) => {
                warn!("Rejected contact submission: {errors}");
                let detail: Vec<FieldDetail> = errors
                    .errors
                    .iter()
                    .map(|e| FieldDetail {
                        field: e.field.as_str(),
                        message: e.message(),
                    })
                    .collect();
                json_response(
                    status,
                    &ErrorBody {
                        error: "Validation error",
                        detail,
                    },
                )
            }
            Self::MalformedBody(reason) => {
                warn!("Malformed request body: {reason}");
                json_response(
                    status,
                    &ErrorBody {
                        error: "Validation error",
                        detail: [FieldDetail {
                            field: "body",
                            message: "Request body must be a JSON object".to_string(),
                        }],
                    },
                )
            }
            Self::InvalidParameter { name, message } => {
                warn!("Rejected query parameter {name}: {message}");
                json_response(
                    status,
                    &ErrorBody {
                        error: "Validation error",
                        detail: [FieldDetail {
                            field: name,
                            message,
                        }],
                    },
                )
            }
            Self::NotFound(detail) => json_response(
                status,
                &ErrorBody {
                    error: "Not Found",
                    detail,
                },
            ),
            Self::Storage { detail, source } => {
                error!("{detail} ({source})");
                json_response(
                    status,
                    &ErrorBody {
                        error: INTERNAL_ERROR,
                        detail,
                    },
                )
            }
            Self::MethodNotAllowed(allow) => {
                let mut resp = json_response(
                    status,
                    &ErrorBody {
                        error: "Method Not Allowed",
                        detail: "Method Not Allowed",
                    },
                );
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    resp.headers_mut().insert(ALLOW, value);
                }
                resp
            }
            Self::PayloadTooLarge { limit } => json_response(
                status,
                &ErrorBody {
                    error: "Payload Too Large",
                    detail: format!("Request body must not exceed {limit} bytes"),
                },
            ),
            Self::Unhandled(reason) => {
                error!("Unhandled exception: {reason}");
                json_response(
                    status,
                    &InternalBody {
                        error: INTERNAL_ERROR,
                        message: INTERNAL_ERROR_MESSAGE,
                    },
                )
            }
        }
    }
}
