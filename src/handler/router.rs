//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Requests are matched against an
//! explicit [`RouteTable`] built from the configured API prefix, dispatched to
//! their endpoint, and every failure is rendered through
//! [`AppError::into_response`].

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::{BodyExt, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, CONTENT_LENGTH, ORIGIN, REFERER, SERVER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request};
use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::config::AppState;
use crate::error::AppError;
use crate::handler::{contact, meta, static_files};
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};

/// Handler a route dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Root,
    Health,
    Docs,
    ApiRoot,
    SubmitContact,
    ContactHealth,
    ListContacts,
    Resume,
    ListCertifications,
    Certification,
    StaticHealth,
}

/// One entry of the routing table
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub pattern: String,
    pub endpoint: Endpoint,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// Result of looking a request up in the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Found {
        endpoint: Endpoint,
        /// Percent-decoded `{param}` segment, if the pattern has one
        param: Option<String>,
    },
    /// The path exists but not for this method; carries the `Allow` value
    MethodNotAllowed(String),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(prefix: &str) -> Self {
        let route = |method: Method, path: &str, endpoint| Route {
            method,
            pattern: path.to_string(),
            endpoint,
        };
        let api = |path: &str| format!("{prefix}{path}");

        Self {
            routes: vec![
                route(Method::GET, "/", Endpoint::Root),
                route(Method::GET, "/health", Endpoint::Health),
                route(Method::GET, "/docs", Endpoint::Docs),
                route(Method::GET, &api("/"), Endpoint::ApiRoot),
                route(Method::POST, &api("/contact"), Endpoint::SubmitContact),
                route(Method::GET, &api("/contact/health"), Endpoint::ContactHealth),
                route(Method::GET, &api("/contact/admin/all"), Endpoint::ListContacts),
                route(Method::GET, &api("/resume"), Endpoint::Resume),
                route(Method::GET, &api("/static/resume/resume.pdf"), Endpoint::Resume),
                route(Method::GET, &api("/certifications"), Endpoint::ListCertifications),
                route(
                    Method::GET,
                    &api("/static/certifications/{filename}"),
                    Endpoint::Certification,
                ),
                route(Method::GET, &api("/static/health"), Endpoint::StaticHealth),
            ],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the endpoint for `method` and `path`; HEAD is served by GET routes
    pub fn resolve(&self, method: &Method, path: &str) -> RouteMatch {
        let wanted = if method == Method::HEAD {
            &Method::GET
        } else {
            method
        };

        let mut allowed: Vec<&str> = Vec::new();
        for route in &self.routes {
            let Some(param) = match_pattern(&route.pattern, path) else {
                continue;
            };
            if route.method == *wanted {
                return match param {
                    Some(Err(())) => RouteMatch::NotFound,
                    Some(Ok(value)) => RouteMatch::Found {
                        endpoint: route.endpoint,
                        param: Some(value),
                    },
                    None => RouteMatch::Found {
                        endpoint: route.endpoint,
                        param: None,
                    },
                };
            }
            if !allowed.contains(&route.method.as_str()) {
                allowed.push(route.method.as_str());
            }
        }

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            allowed.push(Method::OPTIONS.as_str());
            RouteMatch::MethodNotAllowed(allowed.join(", "))
        }
    }
}

/// Segment-wise match of `path` against `pattern`
///
/// Returns `None` on mismatch, `Some(None)` for a literal match and
/// `Some(Some(..))` with the decoded parameter when the pattern has one. A
/// parameter that does not decode to UTF-8 is `Some(Some(Err(())))`.
#[allow(clippy::option_option)]
fn match_pattern(pattern: &str, path: &str) -> Option<Option<Result<String, ()>>> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut param = None;

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(param),
            (Some(expected), Some(actual)) => {
                if expected.starts_with('{') && expected.ends_with('}') {
                    if actual.is_empty() {
                        return None;
                    }
                    param = Some(
                        percent_decode_str(actual)
                            .decode_utf8()
                            .map(|s| s.into_owned())
                            .map_err(|_| ()),
                    );
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Per-request data handed to endpoint handlers
pub struct RequestContext<'a> {
    pub parts: &'a Parts,
    pub peer: Option<SocketAddr>,
    pub param: Option<String>,
}

impl RequestContext<'_> {
    pub fn header(&self, name: impl hyper::header::AsHeaderName) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer: Option<SocketAddr>,
    state: Arc<AppState>,
) -> Result<HttpResponse, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let mut response = if parts.method == Method::OPTIONS {
        http::build_options_response()
    } else {
        dispatch(&parts, body, peer, &state)
            .await
            .unwrap_or_else(AppError::into_response)
    };

    let origin = parts.headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    state.cors.apply(origin, &mut response);
    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.access_log_enabled() {
        log_access(&parts, peer, &response, started, &state);
    }

    Ok(response)
}

async fn dispatch<B>(
    parts: &Parts,
    body: B,
    peer: Option<SocketAddr>,
    state: &Arc<AppState>,
) -> Result<HttpResponse, AppError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = parts.uri.path();
    let (endpoint, param) = match state.routes.resolve(&parts.method, path) {
        RouteMatch::Found { endpoint, param } => (endpoint, param),
        RouteMatch::MethodNotAllowed(allow) => {
            warn!("Method not allowed: {} {path}", parts.method);
            return Err(AppError::MethodNotAllowed(allow));
        }
        RouteMatch::NotFound => {
            debug!("No route for {} {path}", parts.method);
            return Err(AppError::NotFound("Not Found"));
        }
    };

    let ctx = RequestContext { parts, peer, param };
    match endpoint {
        Endpoint::Root => Ok(meta::root(state)),
        Endpoint::Health => Ok(meta::health(state)),
        Endpoint::Docs => meta::docs(state),
        Endpoint::ApiRoot => Ok(meta::api_root()),
        Endpoint::ContactHealth => Ok(meta::contact_health()),
        Endpoint::StaticHealth => Ok(meta::static_health()),
        Endpoint::SubmitContact => {
            let body = read_body(parts, body, state.config.http.max_body_size).await?;
            contact::submit(&ctx, &body, state).await
        }
        Endpoint::ListContacts => contact::list_all(&ctx, state).await,
        Endpoint::Resume => static_files::resume(&ctx, state).await,
        Endpoint::ListCertifications => static_files::list_certifications(state).await,
        Endpoint::Certification => static_files::certification(&ctx, state).await,
    }
}

/// Collect the request body, refusing anything above `max_body_size`
async fn read_body<B>(parts: &Parts, body: B, max_body_size: u64) -> Result<Bytes, AppError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let declared = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    if let Some(size) = declared.filter(|size| *size > max_body_size) {
        warn!("Request body too large: {size} bytes (max: {max_body_size})");
        return Err(AppError::PayloadTooLarge {
            limit: max_body_size,
        });
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<http_body_util::LengthLimitError>() => {
            warn!("Request body exceeded {max_body_size} bytes while streaming");
            Err(AppError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Err(e) => Err(AppError::Unhandled(format!("failed to read request body: {e}"))),
    }
}

fn log_access(
    parts: &Parts,
    peer: Option<SocketAddr>,
    response: &HttpResponse,
    started: Instant,
    state: &AppState,
) {
    let header = |name| {
        parts
            .headers
            .get(name)
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer.map_or_else(|| "-".to_string(), |p| p.ip().to_string()),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = logger::format_version(parts.version);
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::contact::{ContactRecord, ContactSubmission};
    use crate::storage::{ContactStore, MemoryStore};
    use http_body_util::Full;
    use hyper::StatusCode;
    use serde_json::{json, Value};

    struct Harness {
        _tmp: tempfile::TempDir,
        store: Arc<MemoryStore>,
        state: Arc<AppState>,
    }

    fn harness_with(adjust: impl FnOnce(&mut crate::config::Config)) -> Harness {
        let tmp = tempfile::tempdir().unwrap();
        let certs = tmp.path().join("certifications");
        std::fs::create_dir_all(&certs).unwrap();
        std::fs::create_dir_all(tmp.path().join("resume")).unwrap();
        std::fs::write(certs.join("aws.png"), b"png-bytes").unwrap();
        std::fs::write(certs.join("azure.svg"), b"<svg/>").unwrap();
        std::fs::write(tmp.path().join("secret.txt"), b"secret").unwrap();
        std::fs::write(tmp.path().join("resume").join("resume.pdf"), b"%PDF-1.4").unwrap();

        let mut config = test_config(tmp.path().to_str().unwrap());
        adjust(&mut config);
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn ContactStore>,
        ));
        Harness {
            _tmp: tmp,
            store,
            state,
        }
    }

    fn harness() -> Harness {
        harness_with(|_| {})
    }

    fn peer() -> Option<SocketAddr> {
        Some("203.0.113.7:51000".parse().unwrap())
    }

    async fn send(h: &Harness, req: Request<Full<Bytes>>) -> (StatusCode, hyper::header::HeaderMap, Bytes) {
        let resp = handle_request(req, peer(), Arc::clone(&h.state)).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn get(h: &Harness, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Full::new(Bytes::new())).unwrap();
        let (status, _, body) = send(h, req).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn post_contact(h: &Harness, body: &Value) -> (StatusCode, Value) {
        let req = Request::post("/api/v1/contact")
            .header("content-type", "application/json")
            .header("user-agent", "test-agent/1.0")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let (status, _, body) = send(h, req).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn valid_submission() -> Value {
        json!({
            "name": "John Doe",
            "email": "john@example.com",
            "subject": "Test Subject",
            "message": "This is a test message"
        })
    }

    #[test]
    fn test_route_table_resolution() {
        let table = RouteTable::new("/api/v1");
        assert_eq!(
            table.resolve(&Method::GET, "/api/v1/resume"),
            RouteMatch::Found {
                endpoint: Endpoint::Resume,
                param: None
            }
        );
        assert_eq!(
            table.resolve(&Method::HEAD, "/api/v1/static/resume/resume.pdf"),
            RouteMatch::Found {
                endpoint: Endpoint::Resume,
                param: None
            }
        );
        assert_eq!(
            table.resolve(&Method::GET, "/api/v1/static/certifications/my%20cert.png"),
            RouteMatch::Found {
                endpoint: Endpoint::Certification,
                param: Some("my cert.png".to_string())
            }
        );
        assert_eq!(
            table.resolve(&Method::GET, "/api/v1/contact"),
            RouteMatch::MethodNotAllowed("POST, OPTIONS".to_string())
        );
        assert_eq!(
            table.resolve(&Method::GET, "/api/v1/static/certifications/"),
            RouteMatch::NotFound
        );
        assert_eq!(
            table.resolve(&Method::GET, "/api/v1/static/certifications/a/b.png"),
            RouteMatch::NotFound
        );
        assert_eq!(table.resolve(&Method::GET, "/nope"), RouteMatch::NotFound);
    }

    #[test]
    fn test_route_table_with_empty_prefix() {
        let table = RouteTable::new("");
        assert_eq!(
            table.resolve(&Method::GET, "/"),
            RouteMatch::Found {
                endpoint: Endpoint::Root,
                param: None
            }
        );
        assert_eq!(
            table.resolve(&Method::POST, "/contact"),
            RouteMatch::Found {
                endpoint: Endpoint::SubmitContact,
                param: None
            }
        );
    }

    #[tokio::test]
    async fn test_valid_submission_is_stored() {
        let h = harness();
        let (status, body) = post_contact(&h, &valid_submission()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Contact form submitted successfully. Thank you for reaching out!"
        );
        assert!(!body["id"].as_str().unwrap().is_empty());

        let stored = h.store.list_recent(0, 50).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].record.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(stored[0].record.user_agent.as_deref(), Some("test-agent/1.0"));
    }

    #[tokio::test]
    async fn test_markup_is_sanitized_before_storage() {
        let h = harness();
        let mut submission = valid_submission();
        submission["name"] = json!("<script>alert(1)</script>John");
        submission["subject"] = json!("<b>Test</b> Subject");
        let (status, _) = post_contact(&h, &submission).await;
        assert_eq!(status, StatusCode::OK);

        let stored = h.store.list_recent(0, 1).await.unwrap();
        assert_eq!(stored[0].record.name, "John");
        assert_eq!(stored[0].record.subject, "Test Subject");
    }

    #[tokio::test]
    async fn test_invalid_submissions_are_not_stored() {
        let h = harness();
        let cases = [
            json!({"name": "<p></p>", "email": "john@example.com", "subject": "s", "message": "m"}),
            json!({"name": "John", "email": "not-an-email", "subject": "s", "message": "m"}),
            json!({"name": "John", "email": "john@example.com", "subject": "s"}),
            json!({"name": "x".repeat(101), "email": "john@example.com", "subject": "s", "message": "m"}),
            json!("not an object"),
        ];
        for case in &cases {
            let (status, body) = post_contact(&h, case).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{case}");
            assert!(body["detail"].is_array());
        }
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let h = harness();
        h.store.reject_writes(true);
        let (status, body) = post_contact(&h, &valid_submission()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("writes disabled"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let h = harness_with(|c| c.http.max_body_size = 64);
        let mut submission = valid_submission();
        submission["message"] = json!("m".repeat(500));
        let (status, _) = post_contact(&h, &submission).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_health_endpoints_ignore_store_state() {
        let h = harness();
        h.store.close().await;

        let (status, body) = get(&h, "/api/v1/contact/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "service": "contact"}));

        let (status, body) = get(&h, "/api/v1/static/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "service": "static_files"}));

        let (status, body) = get(&h, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_root_metadata() {
        let h = harness();
        let (status, body) = get(&h, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Portfolio Backend API");
        assert_eq!(body["docs_url"], "/docs");
        assert_eq!(body["endpoints"]["resume"], "/api/v1/resume");

        let (status, body) = get(&h, "/api/v1/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["contact"], "/contact");
    }

    #[tokio::test]
    async fn test_docs_only_in_development() {
        let h = harness();
        let (status, body) = get(&h, "/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["routes"].as_array().unwrap().len() >= 10);

        let h = harness_with(|c| c.environment = "production".to_string());
        let (status, _) = get(&h, "/docs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, body) = get(&h, "/").await;
        assert_eq!(body["docs_url"], "Not available in production");
    }

    #[tokio::test]
    async fn test_admin_listing() {
        let h = harness();
        for i in 0..3 {
            let mut record = ContactRecord::from_submission(
                ContactSubmission {
                    name: format!("n{i}"),
                    email: "a@b.co".to_string(),
                    subject: "s".to_string(),
                    message: "m".to_string(),
                },
                None,
                None,
            );
            record.created_at += chrono::Duration::seconds(i);
            h.store.insert(record).await.unwrap();
        }

        let (status, body) = get(&h, "/api/v1/contact/admin/all?skip=1&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["skip"], 1);
        assert_eq!(body["limit"], 1);
        assert_eq!(body["contacts"][0]["name"], "n1");
        assert!(body["contacts"][0]["_id"].is_string());

        let (status, body) = get(&h, "/api/v1/contact/admin/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["limit"], 50);
        assert_eq!(body["contacts"][0]["name"], "n2");

        for query in ["limit=0", "limit=101", "skip=-1", "limit=abc"] {
            let (status, _) = get(&h, &format!("/api/v1/contact/admin/all?{query}")).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
        }
    }

    #[tokio::test]
    async fn test_admin_listing_disabled_is_404() {
        let h = harness_with(|c| c.admin.listing_enabled = false);
        let (status, _) = get(&h, "/api/v1/contact/admin/all").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_download() {
        let h = harness();
        for uri in ["/api/v1/resume", "/api/v1/static/resume/resume.pdf"] {
            let req = Request::get(uri).body(Full::new(Bytes::new())).unwrap();
            let (status, headers, body) = send(&h, req).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(headers["content-type"], "application/pdf");
            assert_eq!(headers["content-disposition"], "attachment; filename=resume.pdf");
            assert_eq!(headers["cache-control"], "no-cache");
            assert_eq!(body.as_ref(), b"%PDF-1.4");
        }
    }

    #[tokio::test]
    async fn test_certifications_listing_and_file() {
        let h = harness();
        let (status, body) = get(&h, "/api/v1/certifications").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["certifications"][0]["filename"], "aws.png");
        assert_eq!(
            body["certifications"][0]["url"],
            "/api/v1/static/certifications/aws.png"
        );

        let req = Request::get("/api/v1/static/certifications/aws.png")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, headers, body) = send(&h, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "image/png");
        assert_eq!(headers["cache-control"], "max-age=3600");
        assert_eq!(body.as_ref(), b"png-bytes");

        let etag = headers["etag"].to_str().unwrap().to_string();
        let req = Request::get("/api/v1/static/certifications/aws.png")
            .header("if-none-match", etag)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, _, _) = send(&h, req).await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_certification_traversal_is_404() {
        let h = harness();
        for uri in [
            "/api/v1/static/certifications/nonexistent.png",
            "/api/v1/static/certifications/..%2Fsecret.txt",
            "/api/v1/static/certifications/%2E%2E",
            "/api/v1/static/certifications/..",
            "/api/v1/static/certifications/%FF.png",
        ] {
            let (status, body) = get(&h, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "Not Found");
        }
    }

    #[tokio::test]
    async fn test_method_not_allowed_and_unknown_path() {
        let h = harness();
        let req = Request::delete("/api/v1/resume")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, headers, _) = send(&h, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers["allow"], "GET, OPTIONS");

        let (status, _) = get(&h, "/api/v2/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let h = harness();
        let req = Request::options("/api/v1/contact")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, headers, _) = send(&h, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert!(headers.contains_key("access-control-allow-methods"));

        let req = Request::get("/health")
            .header("origin", "http://evil.test")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (_, headers, _) = send(&h, req).await;
        assert!(!headers.contains_key("access-control-allow-origin"));
        assert_eq!(headers["server"], "Portfolio-Backend/test");
    }
}
