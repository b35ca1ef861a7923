//! Published site data.
//!
//! The public site renders from a JSON document the administration
//! tools keep up to date. [`SiteContent`] abstracts that consumer so
//! the sync logic can ask what the site currently shows and push the
//! edited document to it.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::SiteDocument;

/// Errors that can occur while updating the published data.
#[derive(Debug)]
pub enum SiteContentError {
    /// I/O error reading or writing the data file.
    IoError(PathBuf, io::Error),
    /// Document could not be serialized.
    EncodeError(serde_json::Error),
}

impl std::fmt::Display for SiteContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteContentError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            SiteContentError::EncodeError(e) => {
                write!(f, "Failed to serialize site data: {}", e)
            }
        }
    }
}

impl std::error::Error for SiteContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteContentError::IoError(_, e) => Some(e),
            SiteContentError::EncodeError(e) => Some(e),
        }
    }
}

/// A consumer of the published content document.
pub trait SiteContent: Send + Sync {
    /// The document the site currently renders, if it has one.
    fn data(&self) -> Option<SiteDocument>;

    /// Replaces the published document.
    fn update_data(&self, document: &SiteDocument) -> Result<(), SiteContentError>;

    /// Tells the consumer its data changed.
    fn refresh(&self);
}

/// Site data kept in a JSON file the public site reads.
#[derive(Debug, Clone)]
pub struct FileSiteContent {
    path: PathBuf,
}

impl FileSiteContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SiteContent for FileSiteContent {
    fn data(&self) -> Option<SiteDocument> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::warn!(
                        "site data file {} is not a valid document: {}",
                        self.path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read site data {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn update_data(&self, document: &SiteDocument) -> Result<(), SiteContentError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SiteContentError::IoError(parent.to_path_buf(), e))?;
        }

        let contents =
            serde_json::to_string_pretty(document).map_err(SiteContentError::EncodeError)?;

        // Write atomically using temp file + rename
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .map_err(|e| SiteContentError::IoError(temp_path.clone(), e))?;

        file.write_all(contents.as_bytes())
            .map_err(|e| SiteContentError::IoError(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| SiteContentError::IoError(temp_path.clone(), e))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SiteContentError::IoError(self.path.clone(), e))?;

        Ok(())
    }

    fn refresh(&self) {
        // The site re-reads the file on its next request.
        tracing::debug!("site data updated at {}", self.path.display());
    }
}

/// Site data held in memory.
///
/// Stands in for the real site in tests and when no data file is
/// configured.
#[derive(Debug, Default)]
pub struct InMemorySiteContent {
    data: Mutex<Option<SiteDocument>>,
}

impl InMemorySiteContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: SiteDocument) -> Self {
        Self {
            data: Mutex::new(Some(document)),
        }
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Option<SiteDocument>> {
        match self.data.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SiteContent for InMemorySiteContent {
    fn data(&self) -> Option<SiteDocument> {
        self.guard().clone()
    }

    fn update_data(&self, document: &SiteDocument) -> Result<(), SiteContentError> {
        *self.guard() = Some(document.clone());
        Ok(())
    }

    fn refresh(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_data_missing_returns_none() {
        let temp = tempdir().unwrap();
        let site = FileSiteContent::new(temp.path().join("site-data.json"));
        assert!(site.data().is_none());
    }

    #[test]
    fn test_file_update_and_read_back() {
        let temp = tempdir().unwrap();
        let site = FileSiteContent::new(temp.path().join("site-data.json"));

        let document = SiteDocument::sample_default();
        site.update_data(&document).unwrap();

        let read = site.data().unwrap();
        assert_eq!(read.site.name, document.site.name);
        assert_eq!(read.rosters.total(), document.rosters.total());
    }

    #[test]
    fn test_file_update_creates_parent_dirs() {
        let temp = tempdir().unwrap();
        let site = FileSiteContent::new(temp.path().join("nested/dir/site-data.json"));

        site.update_data(&SiteDocument::sample_default()).unwrap();
        assert!(site.data().is_some());
    }

    #[test]
    fn test_file_corrupt_data_returns_none() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site-data.json");
        std::fs::write(&path, "{ broken").unwrap();

        let site = FileSiteContent::new(path);
        assert!(site.data().is_none());
    }

    #[test]
    fn test_in_memory_roundtrip() {
        let site = InMemorySiteContent::new();
        assert!(site.data().is_none());

        let document = SiteDocument::sample_default();
        site.update_data(&document).unwrap();

        assert_eq!(site.data().unwrap().site.name, document.site.name);
    }
}
