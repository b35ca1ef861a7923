//! Administration toolkit for the church website.
//!
//! The crate keeps one JSON document with everything the public site
//! renders (events, agenda, services, rosters, contact, social links,
//! financial details and layout flags) and synchronizes it between a
//! local cache, the remote HTTP API and the published site data.
//!
//! Binaries:
//! - `igreja-admin` is the command line client
//! - `igreja-admin-panel` serves the web administration panel

pub mod admin;
pub mod api;
pub mod config;
pub mod models;
pub mod site;
pub mod storage;
