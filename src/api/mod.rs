//! HTTP client for the site API.
//!
//! Covers the four endpoints the administration tools talk to: the
//! authentication check, the content document, backups and user
//! accounts.

mod client;

pub use client::{ApiClient, ApiError, AuthStatus, BackupInfo, UserAccount, UserRole, UserUpsert};
