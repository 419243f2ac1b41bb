//! Remote event API abstraction.
//!
//! The view-model talks to the API only through [`EventApi`], so tests can
//! swap the HTTP implementation for a scripted one.

mod errors;
mod http;

pub use errors::ApiError;
pub use http::{DEFAULT_BASE_URL, HttpBackend, HttpBackendBuilder};

use crate::types::{AuthResponse, Credentials, Event, EventDraft, EventId, Registration, User};
use std::future::Future;

/// Result of a single API call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Trait for event API backends.
///
/// Each method issues exactly one request. Authenticated methods take the
/// bearer token explicitly; backends hold no session state.
pub trait EventApi: Send + Sync {
    /// `POST /auth/local/register`
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = ApiResult<AuthResponse>> + Send;

    /// `POST /auth/local`
    fn login(&self, credentials: &Credentials)
    -> impl Future<Output = ApiResult<AuthResponse>> + Send;

    /// `GET /users/me`
    fn current_user(&self, token: &str) -> impl Future<Output = ApiResult<User>> + Send;

    /// `GET /events`
    fn list_events(&self, token: &str) -> impl Future<Output = ApiResult<Vec<Event>>> + Send;

    /// `POST /events`
    fn create_event(
        &self,
        token: &str,
        draft: &EventDraft,
    ) -> impl Future<Output = ApiResult<Event>> + Send;

    /// `PUT /events/{id}`
    fn update_event(
        &self,
        token: &str,
        id: EventId,
        draft: &EventDraft,
    ) -> impl Future<Output = ApiResult<Event>> + Send;

    /// `DELETE /events/{id}`; the response body is ignored.
    fn delete_event(&self, token: &str, id: EventId) -> impl Future<Output = ApiResult<()>> + Send;
}
