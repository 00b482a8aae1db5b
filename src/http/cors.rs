//! CORS policy module
//!
//! Decides which `Origin` values receive `Access-Control-*` headers.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, VARY};
use hyper::Response;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, If-None-Match";
pub const MAX_AGE_SECS: u32 = 3600;

/// Allowed cross-origin hosts
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
    allow_any: bool,
}

impl CorsPolicy {
    pub fn new(origins: &[String]) -> Self {
        let allow_any = origins.iter().any(|o| o == "*");
        let origins = origins
            .iter()
            .filter(|o| o.as_str() != "*")
            .map(|o| o.trim_end_matches('/').to_string())
            .collect();
        Self { origins, allow_any }
    }

    /// Value for `Access-Control-Allow-Origin`, if the origin is allowed
    pub fn allow_origin(&self, origin: Option<&str>) -> Option<String> {
        let origin = origin?;
        if self.allow_any {
            return Some("*".to_string());
        }
        self.origins
            .iter()
            .any(|o| o == origin.trim_end_matches('/'))
            .then(|| origin.to_string())
    }

    /// Attach CORS headers to an outgoing response
    pub fn apply<B>(&self, origin: Option<&str>, response: &mut Response<B>) {
        let Some(allowed) = self.allow_origin(origin) else {
            return;
        };
        if let Ok(value) = HeaderValue::from_str(&allowed) {
            let headers = response.headers_mut();
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            if !self.allow_any {
                headers.append(VARY, HeaderValue::from_static("Origin"));
            }
        }
    }
}
