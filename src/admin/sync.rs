//! Synchronization between the edited document, the published site and
//! the store.
//!
//! The panel edits a working copy; the public site keeps showing its
//! published data until a sync pushes the working copy over. Pending
//! changes are detected by comparing the two in serialized form, so
//! derived fields never count as differences.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde_json::Value;

use crate::models::SiteDocument;
use crate::site::{SiteContent, SiteContentError};
use crate::storage::{ContentStore, SaveOutcome, StoreError, DOCUMENT_KEY};

/// How often pending changes are pushed automatically.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Errors that can occur during synchronization and snapshot handling.
#[derive(Debug)]
pub enum SyncError {
    /// Snapshot is not valid JSON
    ParseError(serde_json::Error),
    /// Snapshot is valid JSON but not a document object
    InvalidDocument,
    /// Document could not be serialized
    EncodeError(serde_json::Error),
    /// Published site data could not be updated
    SiteError(SiteContentError),
    /// Persistence failure
    StoreError(StoreError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::ParseError(e) => write!(f, "Invalid JSON: {}", e),
            SyncError::InvalidDocument => {
                write!(f, "Not a content document (expected a JSON object)")
            }
            SyncError::EncodeError(e) => write!(f, "Failed to serialize document: {}", e),
            SyncError::SiteError(e) => write!(f, "Site update error: {}", e),
            SyncError::StoreError(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::ParseError(e) | SyncError::EncodeError(e) => Some(e),
            SyncError::SiteError(e) => Some(e),
            SyncError::StoreError(e) => Some(e),
            SyncError::InvalidDocument => None,
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        SyncError::StoreError(e)
    }
}

impl From<SiteContentError> for SyncError {
    fn from(e: SiteContentError) -> Self {
        SyncError::SiteError(e)
    }
}

/// Keeps the published site and the store aligned with the document.
pub struct SyncCoordinator {
    store: ContentStore,
    site: Arc<dyn SiteContent>,
}

impl SyncCoordinator {
    pub fn new(store: ContentStore, site: Arc<dyn SiteContent>) -> Self {
        Self { store, site }
    }

    /// True when the published site shows something different from the
    /// given document. With no published data there is nothing to
    /// compare, so nothing is pending.
    pub fn has_pending_changes(&self, document: &SiteDocument) -> bool {
        let Some(published) = self.site.data() else {
            return false;
        };

        serde_json::to_value(&published).ok() != serde_json::to_value(document).ok()
    }

    /// Pushes the document to the published site, then persists it.
    pub async fn sync_now(&self, document: &SiteDocument) -> Result<SaveOutcome, SyncError> {
        self.site.update_data(document)?;
        self.site.refresh();

        let outcome = self.store.save(DOCUMENT_KEY, document).await?;
        match outcome {
            SaveOutcome::Synced => tracing::info!("document synchronized"),
            SaveOutcome::LocalOnly => {
                tracing::warn!("document published locally, server unreachable")
            }
        }

        Ok(outcome)
    }
}

/// Completes an arbitrary JSON value into a well-formed document.
///
/// Fields with the wrong shape are dropped, missing scalars come from
/// the sample content and missing collections stay empty.
pub fn validate_full_document(value: &Value) -> SiteDocument {
    let mut document = SiteDocument::from_value_lenient(value);
    document.ensure_completeness();
    document
}

/// Pretty-printed snapshot of the document.
pub fn export_snapshot(document: &SiteDocument) -> Result<String, SyncError> {
    serde_json::to_string_pretty(document).map_err(SyncError::EncodeError)
}

/// Default file name for an exported snapshot.
pub fn export_filename() -> String {
    format!(
        "igreja-presbiteriana-backup-{}.json",
        Local::now().format("%Y-%m-%d")
    )
}

/// Parses and validates an imported snapshot.
///
/// Malformed JSON and non-object payloads are rejected outright;
/// anything else is completed into a full document.
pub fn parse_import(contents: &str) -> Result<SiteDocument, SyncError> {
    let value: Value = serde_json::from_str(contents).map_err(SyncError::ParseError)?;

    if !value.is_object() {
        return Err(SyncError::InvalidDocument);
    }

    Ok(validate_full_document(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::site::InMemorySiteContent;
    use crate::storage::LocalCache;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (SyncCoordinator, Arc<InMemorySiteContent>, ContentStore, TempDir) {
        let temp = tempdir().unwrap();
        let cache = LocalCache::new(temp.path());
        let api = ApiClient::new("http://127.0.0.1:9/api");
        let store = ContentStore::new(cache, api);
        let site = Arc::new(InMemorySiteContent::new());
        let coordinator = SyncCoordinator::new(store.clone(), site.clone());
        (coordinator, site, store, temp)
    }

    #[test]
    fn test_sync_interval_is_five_minutes() {
        assert_eq!(SYNC_INTERVAL, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_no_pending_changes_without_published_data() {
        let (coordinator, _, _, _temp) = setup();
        assert!(!coordinator.has_pending_changes(&SiteDocument::sample_default()));
    }

    #[tokio::test]
    async fn test_pending_changes_track_document_edits() {
        let (coordinator, site, _, _temp) = setup();

        let mut document = SiteDocument::sample_default();
        site.update_data(&document).unwrap();
        assert!(!coordinator.has_pending_changes(&document));

        document.site.name = "Igreja Editada".to_string();
        assert!(coordinator.has_pending_changes(&document));
    }

    #[tokio::test]
    async fn test_pending_changes_ignore_derived_year() {
        let (coordinator, site, _, _temp) = setup();

        let document = SiteDocument::sample_default();
        let mut published = document.clone();
        published.current_year = 0;
        site.update_data(&published).unwrap();

        assert!(!coordinator.has_pending_changes(&document));
    }

    #[tokio::test]
    async fn test_sync_now_updates_site_and_cache() {
        let (coordinator, site, store, _temp) = setup();

        let mut document = SiteDocument::sample_default();
        document.site.name = "Igreja Sincronizada".to_string();

        let outcome = coordinator.sync_now(&document).await.unwrap();

        // Server is unreachable, so the push stays local
        assert_eq!(outcome, SaveOutcome::LocalOnly);
        assert_eq!(site.data().unwrap().site.name, "Igreja Sincronizada");
        assert_eq!(
            store.get(DOCUMENT_KEY).await.unwrap().unwrap().site.name,
            "Igreja Sincronizada"
        );
        assert!(!coordinator.has_pending_changes(&document));
    }

    #[test]
    fn test_validate_full_document_defaults_missing_fields() {
        let document = validate_full_document(&json!({
            "site": { "name": "Igreja Importada" },
            "services": [{ "name": "Culto", "time": "18h" }]
        }));

        let defaults = SiteDocument::sample_default();
        assert_eq!(document.site.name, "Igreja Importada");
        assert_eq!(document.site.description, defaults.site.description);
        assert_eq!(document.services.len(), 1);
        assert!(document.featured_events.is_empty());
        assert_eq!(document.layout.column_count, 3);
    }

    #[test]
    fn test_parse_import_rejects_malformed_json() {
        assert!(matches!(
            parse_import("{ broken"),
            Err(SyncError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_import_rejects_non_objects() {
        assert!(matches!(
            parse_import("[1, 2, 3]"),
            Err(SyncError::InvalidDocument)
        ));
    }

    #[test]
    fn test_export_import_roundtrip() {
        let document = SiteDocument::sample_default();

        let snapshot = export_snapshot(&document).unwrap();
        let imported = parse_import(&snapshot).unwrap();

        assert_eq!(imported, document);
    }

    #[test]
    fn test_export_filename_carries_the_date() {
        let filename = export_filename();
        assert!(filename.starts_with("igreja-presbiteriana-backup-"));
        assert!(filename.ends_with(".json"));
        // igreja-presbiteriana-backup-YYYY-MM-DD.json
        assert_eq!(
            filename.len(),
            "igreja-presbiteriana-backup-".len() + 10 + ".json".len()
        );
    }
}
