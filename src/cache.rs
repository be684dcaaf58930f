//! The on-disk archive cache shared across process invocations.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use bytes::Bytes;
use directories::ProjectDirs;
use tracing::debug;

/// Fixed name of the cached archive inside the cache directory.
pub(crate) const ARCHIVE_FILENAME: &str = "info.zip";

/// Whole-blob cache for the feed archive. Freshness is judged purely by file
/// timestamp; concurrent processes racing to refresh the same path are not
/// guarded against.
pub(crate) struct ArchiveCache {
    path: PathBuf,
    max_age: Duration,
}

impl ArchiveCache {
    pub(crate) fn new(dir: Option<&Path>, cache_seconds: u64) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from("ru", "bestchange", "bestchange")
                .context("Could not determine platform cache directory")?
                .cache_dir()
                .to_path_buf(),
        };
        Ok(ArchiveCache {
            path: dir.join(ARCHIVE_FILENAME),
            max_age: Duration::from_secs(cache_seconds),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The cached archive, if it exists and is younger than the freshness
    /// window. An unreadable-but-fresh file degrades to a miss.
    pub(crate) fn fresh(&self) -> Option<Bytes> {
        let age = self.age()?;
        if age >= self.max_age {
            debug!(path = %self.path.display(), age_secs = age.as_secs(), "cache is stale");
            return None;
        }
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), "cache hit, skipping download");
                Some(Bytes::from(bytes))
            }
            Err(e) => {
                debug!("Failed to read fresh cache file: {e}");
                None
            }
        }
    }

    fn age(&self) -> Option<Duration> {
        let metadata = fs::metadata(&self.path).ok()?;
        // Creation time where the platform records it, last-modified
        // otherwise (Linux has no cheap birth time).
        let stamp = metadata.created().or_else(|_| metadata.modified()).ok()?;
        // A future-dated file counts as brand new.
        Some(SystemTime::now().duration_since(stamp).unwrap_or_default())
    }

    /// Writes downloaded archive bytes to the cache path, overwriting any
    /// prior cache and creating the directory if needed.
    pub(crate) fn store(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }
        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), size = bytes.len(), "stored archive in cache");
        Ok(())
    }
}
