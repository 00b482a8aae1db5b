//! Service metadata and liveness endpoints
//!
//! Health responses are fixed payloads; they never touch the store.

use hyper::StatusCode;
use serde_json::json;

use super::router::Route;
use crate::config::AppState;
use crate::error::AppError;
use crate::http::{json_response, HttpResponse};

pub const SERVICE_NAME: &str = "Portfolio Backend API";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `GET /`
pub fn root(state: &AppState) -> HttpResponse {
    let prefix = &state.config.http.api_prefix;
    let docs_url = if state.config.is_development() {
        "/docs"
    } else {
        "Not available in production"
    };

    json_response(
        StatusCode::OK,
        &json!({
            "message": SERVICE_NAME,
            "version": VERSION,
            "docs_url": docs_url,
            "endpoints": {
                "contact": format!("{prefix}/contact"),
                "resume": format!("{prefix}/resume"),
                "certifications": format!("{prefix}/certifications"),
            }
        }),
    )
}

/// `GET /health`
pub fn health(state: &AppState) -> HttpResponse {
    let database = if state.config.database.is_configured() {
        "connected"
    } else {
        "not configured"
    };

    json_response(
        StatusCode::OK,
        &json!({
            "status": "healthy",
            "environment": state.config.environment,
            "database": database,
        }),
    )
}

/// `GET {prefix}/`
pub fn api_root() -> HttpResponse {
    json_response(
        StatusCode::OK,
        &json!({
            "message": format!("{SERVICE_NAME} v1"),
            "endpoints": {
                "contact": "/contact",
                "resume": "/resume",
                "certifications": "/certifications",
            }
        }),
    )
}

/// `GET /docs`, development only
pub fn docs(state: &AppState) -> Result<HttpResponse, AppError> {
    if !state.config.is_development() {
        return Err(AppError::NotFound("Not Found"));
    }

    let routes: &[Route] = state.routes.routes();
    Ok(json_response(
        StatusCode::OK,
        &json!({
            "title": SERVICE_NAME,
            "version": VERSION,
            "description": "Backend API for portfolio website with contact form and static file serving",
            "routes": routes,
        }),
    ))
}

pub fn contact_health() -> HttpResponse {
    json_response(
        StatusCode::OK,
        &json!({"status": "healthy", "service": "contact"}),
    )
}

pub fn static_health() -> HttpResponse {
    json_response(
        StatusCode::OK,
        &json!({"status": "healthy", "service": "static_files"}),
    )
}
