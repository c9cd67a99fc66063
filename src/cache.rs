//! Transparent on-disk cache for successful GET responses.
//!
//! Bodies are stored gzip-compressed under the cache directory, one file per
//! request URL (keyed by its md5 digest). Entries older than the configured
//! max age count as misses. Writes go to a uniquely named temp file first and
//! are renamed on success, so an interrupted or concurrent write never leaves a
//! corrupt entry behind.

use crate::config;
use crate::error::{Result, ScryfallError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// URL-keyed store of response bodies.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    /// Directory where cached bodies are stored.
    pub cache_dir: PathBuf,
    /// If true, the network is never used; misses become errors.
    pub offline: bool,
    /// Entries older than this are refetched. `None` keeps entries forever.
    pub max_age: Option<Duration>,
}

impl ResponseCache {
    /// Create a new response cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            max_age: Some(config::DEFAULT_CACHE_MAX_AGE),
        })
    }

    /// Replace the max age of entries.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Local path of the entry for `url`.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = md5::compute(url.as_bytes());
        self.cache_dir.join(format!("{:x}.gz", digest))
    }

    /// Look up the cached body for `url`.
    ///
    /// An entry older than `max_age` is a miss. A corrupt entry is removed
    /// and reported as a miss.
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        let path = self.path_for(url);
        if !path.exists() {
            return None;
        }
        if self.is_stale(&path) {
            debug!(url, path = %path.display(), "Cache entry expired");
            return None;
        }
        self.read_entry(url, &path)
    }

    /// Look up `url` regardless of age, failing with
    /// [`ScryfallError::NotFound`] on a miss.
    ///
    /// Used in offline mode, where a miss cannot fall through to the network.
    pub fn require(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.path_for(url);
        let body = if path.exists() {
            self.read_entry(url, &path)
        } else {
            None
        };
        body.ok_or_else(|| {
            ScryfallError::NotFound(format!(
                "{} not cached and offline mode is enabled",
                url
            ))
        })
    }

    fn is_stale(&self, path: &Path) -> bool {
        let Some(max_age) = self.max_age else {
            return false;
        };
        match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified.elapsed().unwrap_or(Duration::ZERO) >= max_age,
            Err(_) => true,
        }
    }

    fn read_entry(&self, url: &str, path: &Path) -> Option<Vec<u8>> {
        match read_gz(path) {
            Ok(body) => {
                debug!(url, path = %path.display(), "Cache hit");
                Some(body)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Corrupt cache entry, removing");
                let _ = fs::remove_file(path);
                None
            }
        }
    }

    /// Store `body` as the entry for `url`.
    pub fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        let dest = self.path_for(url);
        // The temp file is deleted on drop if anything below fails.
        let tmp = NamedTempFile::new_in(&self.cache_dir)?;
        let mut encoder = GzEncoder::new(tmp, Compression::default());
        encoder.write_all(body)?;
        let tmp = encoder.finish()?;
        tmp.persist(&dest).map_err(|e| e.error)?;
        Ok(())
    }

    /// Remove all cached entries and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

fn read_gz(path: &Path) -> Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut body = Vec::new();
    decoder.read_to_end(&mut body)?;
    Ok(body)
}
