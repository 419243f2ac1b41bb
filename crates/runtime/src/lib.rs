//! eventdesk runtime — the session and event view-model.
//!
//! This crate holds everything between the terminal and the remote event
//! API: the HTTP backend, the domain types it speaks, and the view-model
//! that sequences requests and folds their results into local state.
//!
//! # Overview
//!
//! - **EventApi**: A trait abstracting the remote API, one method per
//!   endpoint. [`HttpBackend`] is the reqwest implementation.
//! - **App**: The view-model. Holds the [`Mode`] (anonymous or an
//!   authenticated [`Session`]), the shared [`FormBuffer`], the cached event
//!   list and queued [`Notice`]s.
//! - **KeyValueStore** (from `storage`): where the bearer token survives
//!   between runs.
//!
//! # Example
//!
//! ```no_run
//! use runtime::{App, Field, HttpBackend};
//! use storage::SqliteStore;
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = HttpBackend::builder("http://localhost:1337/api").build();
//! let store = SqliteStore::open("eventdesk.db")?;
//!
//! let mut app = App::new(backend, store);
//! app.restore().await.ok();
//!
//! app.form_mut().set(Field::Email, "a@b.com");
//! app.form_mut().set(Field::Password, "secret");
//! app.login().await?;
//!
//! for event in app.events() {
//!     println!("#{} {}", event.id, event.name);
//! }
//! # Ok(())
//! # }
//! ```

mod app;
pub mod backend;
mod error;
mod form;
mod notice;
mod session;
mod types;

pub use app::App;
pub use backend::{ApiError, ApiResult, DEFAULT_BASE_URL, EventApi, HttpBackend, HttpBackendBuilder};
pub use error::{Error, Result};
pub use form::{Field, FormBuffer};
pub use notice::{NOTICE_DURATION, Notice, NoticeLevel};
pub use session::{Mode, Session, TOKEN_KEY, USER_KEY};
pub use types::{AuthResponse, Credentials, Event, EventDraft, EventId, Registration, User};
