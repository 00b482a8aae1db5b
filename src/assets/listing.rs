//! Certification listing cache
//!
//! The directory is scanned lazily on first use and the sorted result is
//! shared until it expires (optional TTL) or is explicitly refreshed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::AssetError;
use crate::http::mime;

/// Characters escaped when a filename becomes a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One listable certification image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationAsset {
    pub filename: String,
    pub url: String,
    pub media_type: &'static str,
}

pub type Listing = Arc<Vec<CertificationAsset>>;

struct Snapshot {
    assets: Listing,
    loaded_at: Instant,
}

pub struct CertificationCache {
    dir: PathBuf,
    url_prefix: String,
    ttl: Option<Duration>,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CertificationCache {
    pub fn new(dir: PathBuf, url_prefix: String, ttl: Option<Duration>) -> Self {
        Self {
            dir,
            url_prefix,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.ttl
            .map_or(true, |ttl| snapshot.loaded_at.elapsed() < ttl)
    }

    /// Cached listing, scanning the directory if nothing fresh is cached
    pub async fn get(&self) -> Result<Listing, AssetError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if self.is_fresh(snapshot) {
                return Ok(Arc::clone(&snapshot.assets));
            }
        }

        let mut guard = self.snapshot.write().await;
        // Another caller may have filled the cache while we waited
        if let Some(snapshot) = guard.as_ref() {
            if self.is_fresh(snapshot) {
                return Ok(Arc::clone(&snapshot.assets));
            }
        }

        let assets = Arc::new(scan(&self.dir, &self.url_prefix).await?);
        info!(
            count = assets.len(),
            dir = %self.dir.display(),
            "Certification listing loaded"
        );
        *guard = Some(Snapshot {
            assets: Arc::clone(&assets),
            loaded_at: Instant::now(),
        });
        Ok(assets)
    }

    /// Drop the cached listing; the next read rescans the directory
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
        debug!("Certification listing invalidated");
    }
}

/// List image files in `dir`, sorted by filename
async fn scan(dir: &Path, url_prefix: &str) -> Result<Vec<CertificationAsset>, AssetError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Certifications directory not found: {}", dir.display());
            return Err(AssetError::NotFound("Certifications directory"));
        }
        Err(e) => {
            return Err(AssetError::Io {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    let mut assets = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| AssetError::Io {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let path = entry.path();
        let extension = path.extension().and_then(|e| e.to_str());
        if !mime::is_image_extension(extension) {
            continue;
        }
        // Follows symlinks, like the file lookup does
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => continue,
        }
        let Some(filename) = entry.file_name().to_str().map(ToString::to_string) else {
            warn!("Skipping certification with non UTF-8 name: {}", path.display());
            continue;
        };
        assets.push(CertificationAsset {
            url: format!(
                "{url_prefix}/{}",
                utf8_percent_encode(&filename, PATH_SEGMENT)
            ),
            media_type: mime::get_content_type(extension),
            filename,
        });
    }

    assets.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(assets)
}
