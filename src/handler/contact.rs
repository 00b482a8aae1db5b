//! Contact form endpoints

use std::sync::Arc;

use hyper::body::Bytes;
use hyper::header::USER_AGENT;
use hyper::StatusCode;
use percent_encoding::percent_decode_str;
use tracing::info;

use super::router::RequestContext;
use crate::config::AppState;
use crate::contact::{validate, ContactPage, ContactRecord, RawSubmission, SubmissionAccepted};
use crate::error::AppError;
use crate::http::{json_response, HttpResponse};
use crate::storage::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

const SUBMIT_FAILED: &str =
    "An error occurred while processing your request. Please try again later.";
const LIST_FAILED: &str = "An error occurred while retrieving contacts.";

/// `POST {prefix}/contact`
pub async fn submit(
    ctx: &RequestContext<'_>,
    body: &Bytes,
    state: &Arc<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw: RawSubmission =
        serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))?;
    let submission = validate(&raw)?;

    let record = ContactRecord::from_submission(
        submission,
        ctx.peer.map(|p| p.ip().to_string()),
        ctx.header(USER_AGENT).map(ToString::to_string),
    );
    let email = record.email.clone();

    let id = state
        .store
        .insert(record)
        .await
        .map_err(|e| AppError::storage(SUBMIT_FAILED, e))?;

    info!("Contact form submitted successfully. ID: {id}, Email: {email}");
    Ok(json_response(StatusCode::OK, &SubmissionAccepted::new(id)))
}

/// `GET {prefix}/contact/admin/all?skip&limit`
pub async fn list_all(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Result<HttpResponse, AppError> {
    if !state.config.admin.listing_enabled {
        return Err(AppError::NotFound("Not Found"));
    }

    let (skip, limit) = parse_pagination(ctx.parts.uri.query())?;
    let contacts = state
        .store
        .list_recent(skip, limit)
        .await
        .map_err(|e| AppError::storage(LIST_FAILED, e))?;

    let page = ContactPage {
        total: contacts.len(),
        contacts,
        skip,
        limit,
    };
    Ok(json_response(StatusCode::OK, &page))
}

/// `skip` and `limit` from the query string; unknown keys are ignored
fn parse_pagination(query: Option<&str>) -> Result<(u64, u32), AppError> {
    let mut skip = 0;
    let mut limit = DEFAULT_PAGE_LIMIT;

    for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = percent_decode_str(value).decode_utf8_lossy();
        match key {
            "skip" => {
                skip = value.trim().parse().map_err(|_| AppError::InvalidParameter {
                    name: "skip",
                    message: "skip must be a non-negative integer".to_string(),
                })?;
            }
            "limit" => {
                limit = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|l| (1..=MAX_PAGE_LIMIT).contains(l))
                    .ok_or_else(|| AppError::InvalidParameter {
                        name: "limit",
                        message: format!("limit must be an integer between 1 and {MAX_PAGE_LIMIT}"),
                    })?;
            }
            _ => {}
        }
    }

    Ok((skip, limit))
}
