//! # parley-store
//!
//! Local client-side storage for Parley, backed by SQLite.
//!
//! The store holds the subscription cache (rooms the signed-in user has
//! joined) and the local user record.  The crate exposes a synchronous
//! `Database` handle that wraps a `rusqlite::Connection` and provides typed
//! CRUD helpers for every model.

pub mod database;
pub mod migrations;
pub mod models;
pub mod subscriptions;
pub mod users;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
