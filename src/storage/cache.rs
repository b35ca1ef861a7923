//! File-backed key/value cache for JSON documents.
//!
//! Each key maps to one file inside the cache directory:
//! ```text
//! <CACHE_DIR>/
//!   igreja_admin_<key>.json
//! ```
//! Writes are atomic (temp file + rename), so a crash never leaves a
//! half-written entry behind.

use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Prefix applied to every cache file name.
const KEY_PREFIX: &str = "igreja_admin_";

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// Invalid cache key (e.g., contains path separators).
    InvalidKey(String),
    /// Value could not be serialized.
    EncodeError(serde_json::Error),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            CacheError::InvalidKey(key) => {
                write!(f, "Invalid cache key: {}", key)
            }
            CacheError::EncodeError(e) => {
                write!(f, "Failed to serialize value: {}", e)
            }
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::IoError(_, e) => Some(e),
            CacheError::EncodeError(e) => Some(e),
            _ => None,
        }
    }
}

/// File-backed cache keyed by document name.
#[derive(Debug, Clone)]
pub struct LocalCache {
    cache_dir: PathBuf,
}

impl LocalCache {
    /// Creates a cache rooted at the given directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Validates a key to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), CacheError> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
            || key.starts_with('.')
        {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(())
    }

    /// Returns the file path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}{}.json", KEY_PREFIX, key))
    }

    /// Loads the value stored under a key.
    ///
    /// Returns `Ok(None)` if the entry doesn't exist. An entry that no
    /// longer parses as JSON is discarded and treated as missing.
    pub fn load(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Self::validate_key(key)?;

        let path = self.entry_path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!(
                        "discarding unreadable cache entry {}: {}",
                        path.display(),
                        e
                    );
                    Ok(None)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::IoError(path, e)),
        }
    }

    /// Stores a value under a key.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        Self::validate_key(key)?;

        let path = self.entry_path(key);

        // Create cache directory if needed
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| CacheError::IoError(self.cache_dir.clone(), e))?;

        let contents = serde_json::to_string(value).map_err(CacheError::EncodeError)?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| CacheError::IoError(temp_path.clone(), e))?;

        file.write_all(contents.as_bytes())
            .map_err(|e| CacheError::IoError(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| CacheError::IoError(temp_path.clone(), e))?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &path).map_err(|e| CacheError::IoError(path, e))?;

        Ok(())
    }

    /// Removes a key. Missing entries are not an error.
    pub fn remove(&self, key: &str) -> Result<(), CacheError> {
        Self::validate_key(key)?;

        let path = self.entry_path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(path, e)),
        }
    }

    /// Removes every entry of this cache, leaving other files alone.
    pub fn clear(&self) -> Result<(), CacheError> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::IoError(self.cache_dir.clone(), e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| CacheError::IoError(self.cache_dir.clone(), e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(KEY_PREFIX) && name.ends_with(".json") {
                fs::remove_file(entry.path())
                    .map_err(|e| CacheError::IoError(entry.path(), e))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (LocalCache, TempDir) {
        let temp = tempdir().unwrap();
        let cache = LocalCache::new(temp.path());
        (cache, temp)
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (cache, _temp) = setup();
        let result = cache.load("site-content").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (cache, _temp) = setup();

        let value = json!({ "site": { "name": "Igreja Teste" } });
        cache.save("site-content", &value).unwrap();

        let loaded = cache.load("site-content").unwrap().unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let (cache, _temp) = setup();

        cache.save("site-content", &json!({ "v": 1 })).unwrap();
        cache.save("site-content", &json!({ "v": 2 })).unwrap();

        let loaded = cache.load("site-content").unwrap().unwrap();
        assert_eq!(loaded["v"], 2);
    }

    #[test]
    fn test_keys_are_isolated() {
        let (cache, _temp) = setup();

        cache.save("site-content", &json!({ "which": "content" })).unwrap();
        cache.save("drafts", &json!({ "which": "drafts" })).unwrap();

        let content = cache.load("site-content").unwrap().unwrap();
        let drafts = cache.load("drafts").unwrap().unwrap();
        assert_eq!(content["which"], "content");
        assert_eq!(drafts["which"], "drafts");
    }

    #[test]
    fn test_remove() {
        let (cache, _temp) = setup();

        cache.save("site-content", &json!({})).unwrap();
        cache.remove("site-content").unwrap();

        assert!(cache.load("site-content").unwrap().is_none());

        // Removing again is fine
        cache.remove("site-content").unwrap();
    }

    #[test]
    fn test_clear_leaves_foreign_files_alone() {
        let (cache, temp) = setup();

        cache.save("site-content", &json!({})).unwrap();
        let foreign = temp.path().join("notes.txt");
        std::fs::write(&foreign, "keep me").unwrap();

        cache.clear().unwrap();

        assert!(cache.load("site-content").unwrap().is_none());
        assert!(foreign.exists());
    }

    #[test]
    fn test_clear_missing_dir_is_ok() {
        let cache = LocalCache::new("/nonexistent/igreja-admin-cache");
        cache.clear().unwrap();
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let (cache, _temp) = setup();

        for key in ["", "a/b", "a\\b", "..", ".hidden"] {
            let result = cache.load(key);
            assert!(matches!(result, Err(CacheError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_corrupt_entry_treated_as_missing() {
        let (cache, temp) = setup();

        cache.save("site-content", &json!({})).unwrap();
        let path = temp.path().join("igreja_admin_site-content.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(cache.load("site-content").unwrap().is_none());
    }
}
