//! Résumé and certification endpoints
//!
//! File lookup lives in [`crate::assets`]; this module only turns results
//! into responses.

use std::sync::Arc;

use hyper::header::IF_NONE_MATCH;
use hyper::StatusCode;
use serde::Serialize;

use super::router::RequestContext;
use crate::assets::CertificationAsset;
use crate::config::AppState;
use crate::error::AppError;
use crate::http::{build_file_response, json_response, HttpResponse};

#[derive(Serialize)]
struct CertificationList<'a> {
    certifications: &'a [CertificationAsset],
    total: usize,
}

/// `GET {prefix}/resume` and `GET {prefix}/static/resume/resume.pdf`
pub async fn resume(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Result<HttpResponse, AppError> {
    let file = state.assets.resolve_resume().await.map_err(|e| {
        AppError::from_asset(
            e,
            "Resume file not found",
            "An error occurred while serving the resume file",
        )
    })?;
    Ok(build_file_response(file, ctx.header(IF_NONE_MATCH)))
}

/// `GET {prefix}/certifications`
pub async fn list_certifications(state: &Arc<AppState>) -> Result<HttpResponse, AppError> {
    let listing = state.assets.list_certifications().await.map_err(|e| {
        AppError::from_asset(
            e,
            "Certifications directory not found",
            "An error occurred while listing certifications",
        )
    })?;

    Ok(json_response(
        StatusCode::OK,
        &CertificationList {
            certifications: &listing,
            total: listing.len(),
        },
    ))
}

/// `GET {prefix}/static/certifications/{filename}`
pub async fn certification(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Result<HttpResponse, AppError> {
    let filename = ctx.param.as_deref().unwrap_or_default();
    let file = state
        .assets
        .resolve_certification(filename)
        .await
        .map_err(|e| {
            AppError::from_asset(
                e,
                "Certification file not found",
                "An error occurred while serving the certification file",
            )
        })?;
    Ok(build_file_response(file, ctx.header(IF_NONE_MATCH)))
}
