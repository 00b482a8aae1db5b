//! Conditional GET support
//!
//! Asset responses carry a content-derived validator and one of two
//! Cache-Control policies.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

/// Strong validator for a file body: `"<len>-<hash>"`, both hex
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    hasher.write(content);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Whether an `If-None-Match` value names `etag`, so a 304 can be sent
///
/// Comparison is weak (RFC 9110 §13.1.2): a `W/` prefix on either side is
/// ignored. `*` matches any current representation.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    let ours = opaque_tag(etag);
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || (!candidate.is_empty() && opaque_tag(candidate) == ours)
    })
}

fn opaque_tag(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Clients may reuse the body for this many seconds
    MaxAge(u32),
    /// Clients must revalidate before every reuse
    NoCache,
}

impl CachePolicy {
    pub const CERTIFICATION: Self = Self::MaxAge(3600);
    /// The résumé is replaced in place, so it is always revalidated
    pub const RESUME: Self = Self::NoCache;

    pub fn to_header_value(self) -> String {
        match self {
            Self::MaxAge(seconds) => format!("max-age={seconds}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}
