//! Lifecycle of the on-disk dataset cache.
//!
//! One cache entry per (country, year) dataset, laid out as
//! `<cache_root>/<country>/<year>/` holding the downloaded archive next to
//! its extracted CSV. Presence alone makes a cached file valid: the
//! authoritative data for a published year does not change, so only missing
//! local state (or an explicit `--force-download`) triggers work. Entries are
//! never deleted automatically.

use std::path::{Path, PathBuf};

use anyhow::Error as AnyError;
use tracing::{debug, info};

use super::download::download_archive;
use crate::archive::ZipArchive;
use crate::config::NutsConfig;
use crate::error::NutsError;

/// Local filesystem representation of one (country, year) dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Directory holding both artifacts of this entry.
    pub directory: PathBuf,
    /// The downloaded archive as published by Eurostat.
    pub archive_path: PathBuf,
    /// The CSV payload extracted from the archive.
    pub extracted_path: PathBuf,
}

/// Decides whether a local copy of the mapping data is ready, and fetches
/// and extracts it when not.
pub struct CacheManager {
    config: NutsConfig,
}

impl CacheManager {
    pub fn new(config: NutsConfig) -> Self {
        Self { config }
    }

    /// Compute the cache entry paths for the configured dataset.
    ///
    /// Pure path computation; the filesystem is not touched.
    pub fn resolve(&self) -> CacheEntry {
        let descriptor = self.config.descriptor();
        let directory = self
            .config
            .cache_dir
            .join(self.config.country.as_str())
            .join(self.config.year.as_str());
        let archive_path = directory.join(descriptor.archive_file_name());
        let extracted_path = archive_path.with_extension("csv");
        CacheEntry {
            directory,
            archive_path,
            extracted_path,
        }
    }

    /// Make the extracted CSV available locally and return its path.
    ///
    /// The dominant fast path is a cache hit: the extracted file exists and
    /// is returned immediately with no network activity. Otherwise the
    /// archive is downloaded (unless already present) and its CSV payload
    /// extracted. Creating the cache directory tree is idempotent.
    pub async fn ensure_available(&self, entry: &CacheEntry) -> Result<PathBuf, NutsError> {
        if entry.extracted_path.exists() && !self.config.force_download {
            debug!("using cached NUTS data {}", entry.extracted_path.display());
            return Ok(entry.extracted_path.clone());
        }

        tokio::fs::create_dir_all(&entry.directory).await?;

        if !entry.archive_path.exists() || self.config.force_download {
            let url = self.config.descriptor().url();
            download_archive(&url, &entry.archive_path).await?;
        } else {
            debug!(
                "reusing downloaded archive {}",
                entry.archive_path.display()
            );
        }

        self.extract(entry).await?;
        Ok(entry.extracted_path.clone())
    }

    /// Extract the single CSV payload of the archive into the cache entry.
    async fn extract(&self, entry: &CacheEntry) -> Result<(), NutsError> {
        info!("extracting {}", entry.archive_path.display());
        let data = tokio::fs::read(&entry.archive_path).await?;

        let archive = ZipArchive::new(&data);
        let entries = archive
            .entries()
            .map_err(|err| archive_error(&entry.archive_path, err))?;
        let payload_entry = entries
            .iter()
            .find(|e| !e.is_directory && e.file_name.to_ascii_lowercase().ends_with(".csv"))
            .ok_or_else(|| NutsError::Archive {
                path: entry.archive_path.clone(),
                reason: "no CSV payload found in archive".to_string(),
            })?;
        let payload = archive
            .read(payload_entry)
            .map_err(|err| archive_error(&entry.archive_path, err))?;

        tokio::fs::write(&entry.extracted_path, &payload).await?;
        debug!(
            "extracted {} ({} bytes)",
            entry.extracted_path.display(),
            payload.len()
        );
        Ok(())
    }
}

fn archive_error(path: &Path, err: AnyError) -> NutsError {
    NutsError::Archive {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Country, NutsYear};

    fn test_config(cache_dir: PathBuf) -> NutsConfig {
        NutsConfig {
            country: Country::NL,
            year: NutsYear::Y2021,
            cache_dir,
            force_download: false,
        }
    }

    #[test]
    fn resolve_computes_the_cache_layout() {
        let manager = CacheManager::new(test_config(PathBuf::from("/cache")));
        let entry = manager.resolve();

        assert_eq!(entry.directory, PathBuf::from("/cache/NL/2021"));
        assert_eq!(
            entry.archive_path,
            PathBuf::from("/cache/NL/2021/pc2020_NL_NUTS-2021_v2.0.zip")
        );
        assert_eq!(
            entry.extracted_path,
            PathBuf::from("/cache/NL/2021/pc2020_NL_NUTS-2021_v2.0.csv")
        );
    }

    #[test]
    fn resolve_does_not_touch_the_filesystem() {
        let manager = CacheManager::new(test_config(PathBuf::from("/cache")));
        let entry = manager.resolve();
        assert!(!entry.directory.exists());
    }

    #[tokio::test]
    async fn extracted_file_short_circuits_everything() {
        let temp = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(test_config(temp.path().to_path_buf()));
        let entry = manager.resolve();

        std::fs::create_dir_all(&entry.directory).unwrap();
        std::fs::write(&entry.extracted_path, "NUTS3;CODE\n'NL333';'2612AB'\n").unwrap();

        // No archive on disk and no reachable remote: a hit must return
        // without needing either.
        let path = manager.ensure_available(&entry).await.unwrap();
        assert_eq!(path, entry.extracted_path);
        assert!(!entry.archive_path.exists());
    }
}
