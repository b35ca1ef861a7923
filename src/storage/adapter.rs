use std::fmt;

use crate::api::ApiClient;
use crate::models::SiteDocument;

use super::cache::{CacheError, LocalCache};

/// Cache key of the content document. Only this key is pushed to the
/// server; other keys stay local.
pub const DOCUMENT_KEY: &str = "site-content";

/// Where a successful save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Cache and server both hold the document
    Synced,
    /// Cache holds the document, the server push failed
    LocalOnly,
}

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Local cache failure
    CacheError(CacheError),
    /// Value could not be serialized
    EncodeError(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CacheError(e) => write!(f, "Cache error: {}", e),
            StoreError::EncodeError(e) => write!(f, "Failed to serialize document: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::CacheError(e) => Some(e),
            StoreError::EncodeError(e) => Some(e),
        }
    }
}

impl From<CacheError> for StoreError {
    fn from(e: CacheError) -> Self {
        StoreError::CacheError(e)
    }
}

/// Keyed document store backed by the local cache and the remote API.
///
/// The cache is the source of truth for durability: saves succeed once
/// the cache holds the document, and a failed server push only degrades
/// the outcome to [`SaveOutcome::LocalOnly`].
#[derive(Debug, Clone)]
pub struct ContentStore {
    cache: LocalCache,
    api: ApiClient,
}

impl ContentStore {
    pub fn new(cache: LocalCache, api: ApiClient) -> Self {
        Self { cache, api }
    }

    /// Saves a document under a key, cache first.
    ///
    /// For [`DOCUMENT_KEY`] the server is updated as well; the push is
    /// best-effort and never fails the save.
    pub async fn save(&self, key: &str, document: &SiteDocument) -> Result<SaveOutcome, StoreError> {
        let value = serde_json::to_value(document).map_err(StoreError::EncodeError)?;
        self.cache.save(key, &value)?;

        if key != DOCUMENT_KEY {
            return Ok(SaveOutcome::Synced);
        }

        match self.api.push_document(document).await {
            Ok(()) => Ok(SaveOutcome::Synced),
            Err(e) => {
                tracing::warn!("server save failed, keeping local copy: {}", e);
                Ok(SaveOutcome::LocalOnly)
            }
        }
    }

    /// Loads a document, preferring the server for [`DOCUMENT_KEY`].
    ///
    /// A fresh server copy overwrites the cached one. When the server is
    /// unreachable or has nothing stored, the cache answers.
    pub async fn get(&self, key: &str) -> Result<Option<SiteDocument>, StoreError> {
        if key == DOCUMENT_KEY {
            match self.api.fetch_document().await {
                Ok(Some(document)) => {
                    let value =
                        serde_json::to_value(&document).map_err(StoreError::EncodeError)?;
                    if let Err(e) = self.cache.save(key, &value) {
                        tracing::warn!("failed to refresh cache from server: {}", e);
                    }
                    return Ok(Some(document));
                }
                Ok(None) => {
                    tracing::debug!("server has no stored document");
                }
                Err(e) => {
                    tracing::warn!("server fetch failed, falling back to cache: {}", e);
                }
            }
        }

        self.cached(key)
    }

    /// Removes a key from the cache.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        Ok(self.cache.remove(key)?)
    }

    /// Clears every cached document.
    pub fn clear(&self) -> Result<(), StoreError> {
        Ok(self.cache.clear()?)
    }

    fn cached(&self, key: &str) -> Result<Option<SiteDocument>, StoreError> {
        Ok(self
            .cache
            .load(key)?
            .map(|value| SiteDocument::from_value_lenient(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    // Nothing listens on the discard port, so every push fails fast.
    fn setup() -> (ContentStore, TempDir) {
        let temp = tempdir().unwrap();
        let cache = LocalCache::new(temp.path());
        let api = ApiClient::new("http://127.0.0.1:9/api");
        (ContentStore::new(cache, api), temp)
    }

    #[tokio::test]
    async fn test_save_without_server_is_local_only() {
        let (store, _temp) = setup();

        let outcome = store
            .save(DOCUMENT_KEY, &SiteDocument::sample_default())
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::LocalOnly);
    }

    #[tokio::test]
    async fn test_get_falls_back_to_cache() {
        let (store, _temp) = setup();

        let mut document = SiteDocument::sample_default();
        document.site.name = "Igreja do Cache".to_string();
        store.save(DOCUMENT_KEY, &document).await.unwrap();

        let loaded = store.get(DOCUMENT_KEY).await.unwrap().unwrap();
        assert_eq!(loaded.site.name, "Igreja do Cache");
    }

    #[tokio::test]
    async fn test_get_repairs_wrong_shaped_cache_entry() {
        let temp = tempdir().unwrap();
        let cache = LocalCache::new(temp.path());
        cache
            .save(
                DOCUMENT_KEY,
                &serde_json::json!({
                    "site": { "name": "Igreja Teste" },
                    "featuredEvents": "não é uma lista"
                }),
            )
            .unwrap();
        let store = ContentStore::new(cache, ApiClient::new("http://127.0.0.1:9/api"));

        let document = store.get(DOCUMENT_KEY).await.unwrap().unwrap();
        assert_eq!(document.site.name, "Igreja Teste");
        assert!(document.featured_events.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_everywhere_returns_none() {
        let (store, _temp) = setup();
        assert!(store.get(DOCUMENT_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rapid_saves_keep_the_last_value() {
        let (store, _temp) = setup();

        for i in 1..=5 {
            let mut document = SiteDocument::sample_default();
            document.site.name = format!("Versão {}", i);
            store.save(DOCUMENT_KEY, &document).await.unwrap();
        }

        let loaded = store.get(DOCUMENT_KEY).await.unwrap().unwrap();
        assert_eq!(loaded.site.name, "Versão 5");
    }

    #[tokio::test]
    async fn test_other_keys_stay_local() {
        let (store, _temp) = setup();

        let outcome = store
            .save("draft", &SiteDocument::sample_default())
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::Synced);
        assert!(store.get("draft").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, _temp) = setup();

        store
            .save(DOCUMENT_KEY, &SiteDocument::sample_default())
            .await
            .unwrap();
        store.remove(DOCUMENT_KEY).unwrap();

        assert!(store.get(DOCUMENT_KEY).await.unwrap().is_none());
    }
}
