//! Client and service for the architecture academy blog.
//!
//! `client` fetches entries from the content service and substitutes placeholder entries when a
//! fetch fails; `server` is the content service itself, backed by SQLite.

pub mod common;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;
