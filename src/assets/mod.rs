//! Static asset resolver
//!
//! Serves the résumé and the certification images from a fixed directory
//! layout under the configured root:
//!
//! ```text
//! {root}/resume/resume.pdf
//! {root}/certifications/*.{png,jpg,jpeg,gif,webp,svg}
//! ```
//!
//! Requested names must resolve to a regular file inside the certifications
//! directory; anything else is reported as not found.

pub mod listing;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hyper::body::Bytes;
use thiserror::Error;
use tokio::fs;
use tracing::{error, info, warn};

use crate::http::cache::CachePolicy;
use crate::http::{mime, FilePayload};

pub use listing::{CertificationAsset, CertificationCache, Listing};

pub const RESUME_DIR: &str = "resume";
pub const RESUME_FILE: &str = "resume.pdf";
pub const CERTIFICATIONS_DIR: &str = "certifications";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

pub struct StaticAssets {
    resume_path: PathBuf,
    certifications_dir: PathBuf,
    certifications: CertificationCache,
}

impl StaticAssets {
    pub fn new(root: &str, api_prefix: &str, certifications_ttl: Option<Duration>) -> Self {
        let root = PathBuf::from(root);
        let certifications_dir = root.join(CERTIFICATIONS_DIR);
        let certifications = CertificationCache::new(
            certifications_dir.clone(),
            format!("{api_prefix}/static/certifications"),
            certifications_ttl,
        );

        Self {
            resume_path: root.join(RESUME_DIR).join(RESUME_FILE),
            certifications_dir,
            certifications,
        }
    }

    /// The résumé PDF, sent as a download
    pub async fn resolve_resume(&self) -> Result<FilePayload, AssetError> {
        let content = match fs::read(&self.resume_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                error!("Resume file not found at {}", self.resume_path.display());
                return Err(AssetError::NotFound("Resume"));
            }
            Err(e) => {
                return Err(AssetError::Io {
                    path: self.resume_path.clone(),
                    source: e,
                })
            }
        };

        Ok(FilePayload {
            content: Bytes::from(content),
            content_type: mime::PDF,
            cache: CachePolicy::RESUME,
            disposition: Some(format!("attachment; filename={RESUME_FILE}")),
        })
    }

    /// Sorted certification listing, cached after the first successful scan
    pub async fn list_certifications(&self) -> Result<Listing, AssetError> {
        self.certifications.get().await
    }

    /// Forget the cached listing so newly added files show up
    pub async fn refresh_certifications(&self) {
        self.certifications.invalidate().await;
        info!("Certification listing refreshed");
    }

    /// A single certification image by file name
    pub async fn resolve_certification(&self, filename: &str) -> Result<FilePayload, AssetError> {
        if !is_leaf_name(filename) {
            warn!(filename, "Rejected certification name");
            return Err(AssetError::NotFound("Certification"));
        }

        let resolved = self.contained_file(filename).await?;
        let content = fs::read(&resolved).await.map_err(|e| AssetError::Io {
            path: resolved.clone(),
            source: e,
        })?;

        Ok(FilePayload {
            content: Bytes::from(content),
            content_type: mime::get_content_type(resolved.extension().and_then(|e| e.to_str())),
            cache: CachePolicy::CERTIFICATION,
            disposition: None,
        })
    }

    /// Canonical path of `filename` if it is a regular file inside the
    /// certifications directory
    async fn contained_file(&self, filename: &str) -> Result<PathBuf, AssetError> {
        let not_found = || AssetError::NotFound("Certification");

        let base = fs::canonicalize(&self.certifications_dir)
            .await
            .map_err(|_| not_found())?;
        let resolved = fs::canonicalize(base.join(filename))
            .await
            .map_err(|_| not_found())?;

        if !resolved.starts_with(&base) {
            warn!(
                "Path traversal attempt blocked: {} -> {}",
                filename,
                resolved.display()
            );
            return Err(not_found());
        }

        match fs::metadata(&resolved).await {
            Ok(meta) if meta.is_file() => Ok(resolved),
            _ => Err(not_found()),
        }
    }
}

/// A single path component with no separators or parent references
fn is_leaf_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && Path::new(name).file_name().is_some_and(|n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn layout() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let certs = tmp.path().join(CERTIFICATIONS_DIR);
        std::fs::create_dir_all(&certs).unwrap();
        std::fs::create_dir_all(tmp.path().join(RESUME_DIR)).unwrap();
        std::fs::write(certs.join("aws.png"), b"png").unwrap();
        std::fs::write(certs.join("gcp.jpg"), b"jpg").unwrap();
        std::fs::write(tmp.path().join("secret.txt"), b"secret").unwrap();
        tmp
    }

    fn assets(tmp: &tempfile::TempDir) -> StaticAssets {
        StaticAssets::new(tmp.path().to_str().unwrap(), "/api/v1", None)
    }

    #[test]
    fn test_is_leaf_name() {
        assert!(is_leaf_name("cert.png"));
        assert!(is_leaf_name("my cert.png"));
        assert!(!is_leaf_name(""));
        assert!(!is_leaf_name(".."));
        assert!(!is_leaf_name("../secret.txt"));
        assert!(!is_leaf_name("a/b.png"));
        assert!(!is_leaf_name("..\\secret.txt"));
        assert!(!is_leaf_name("/etc/passwd"));
    }

    #[tokio::test]
    async fn test_resume_found() {
        let tmp = layout();
        std::fs::write(tmp.path().join(RESUME_DIR).join(RESUME_FILE), b"%PDF-1.4").unwrap();

        let file = assets(&tmp).resolve_resume().await.unwrap();
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.cache, CachePolicy::NoCache);
        assert_eq!(
            file.disposition.as_deref(),
            Some("attachment; filename=resume.pdf")
        );
        assert_eq!(file.content.as_ref(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_resume_missing() {
        let tmp = layout();
        assert!(matches!(
            assets(&tmp).resolve_resume().await,
            Err(AssetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_certification_found() {
        let tmp = layout();
        let file = assets(&tmp).resolve_certification("gcp.jpg").await.unwrap();
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.cache, CachePolicy::CERTIFICATION);
        assert!(file.disposition.is_none());
    }

    #[tokio::test]
    async fn test_certification_missing_or_escaping() {
        let tmp = layout();
        let assets = assets(&tmp);
        for name in ["nonexistent.png", "../secret.txt", "..", "", "a/../../secret.txt"] {
            assert!(
                matches!(
                    assets.resolve_certification(name).await,
                    Err(AssetError::NotFound(_))
                ),
                "{name:?} should not resolve"
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_directory_is_blocked() {
        let tmp = layout();
        std::os::unix::fs::symlink(
            tmp.path().join("secret.txt"),
            tmp.path().join(CERTIFICATIONS_DIR).join("link.png"),
        )
        .unwrap();

        assert!(matches!(
            assets(&tmp).resolve_certification("link.png").await,
            Err(AssetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_listing_and_refresh() {
        let tmp = layout();
        let assets = Arc::new(assets(&tmp));

        let listing = assets.list_certifications().await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].filename, "aws.png");
        assert_eq!(listing[0].url, "/api/v1/static/certifications/aws.png");

        std::fs::write(tmp.path().join(CERTIFICATIONS_DIR).join("new.webp"), b"w").unwrap();
        assert_eq!(assets.list_certifications().await.unwrap().len(), 2);
        assets.refresh_certifications().await;
        assert_eq!(assets.list_certifications().await.unwrap().len(), 3);
    }
}
