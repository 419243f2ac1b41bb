//! Durable key-value storage for eventdesk.
//!
//! The client keeps exactly one piece of state across restarts: the bearer
//! token issued at login. This crate hides where that lives behind the
//! [`KeyValueStore`] trait so the view-model never touches a global.
//!
//! # Core Concepts
//!
//! ## KeyValueStore
//!
//! A minimal get/set/remove interface over string keys and values. The
//! view-model is generic over it, which lets tests inject an in-memory store.
//!
//! ## SqliteStore
//!
//! The [`SqliteStore`] wraps a SQLite database with a single `kv` table. Every
//! write stamps the row with the time it happened, exposed through
//! [`SqliteStore::updated_at`].
//!
//! # Example
//!
//! ```no_run
//! use storage::{KeyValueStore, SqliteStore};
//!
//! let store = SqliteStore::open("eventdesk.db")?;
//! store.set("token", "eyJhbGciOi...")?;
//! assert_eq!(store.get("token")?.as_deref(), Some("eyJhbGciOi..."));
//!
//! store.remove("token")?;
//! assert!(store.get("token")?.is_none());
//! # Ok::<(), storage::Error>(())
//! ```

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{KeyValueStore, SqliteStore};
