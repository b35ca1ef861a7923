//! Local persistence for content documents.
//!
//! `LocalCache` is a file-backed key/value store; `ContentStore` layers
//! the remote API on top of it, writing cache-first and treating the
//! server as best-effort.

mod adapter;
mod cache;

pub use adapter::{ContentStore, SaveOutcome, StoreError, DOCUMENT_KEY};
pub use cache::{CacheError, LocalCache};
