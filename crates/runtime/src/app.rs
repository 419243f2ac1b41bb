//! Session and event view-model.

use crate::backend::EventApi;
use crate::form::FormBuffer;
use crate::notice::Notice;
use crate::session::{Mode, Session, TOKEN_KEY, USER_KEY};
use crate::types::{AuthResponse, Event, EventId, User};
use crate::{Error, Result};
use storage::KeyValueStore;

/// The client's whole state: session, form input, cached events and
/// pending notices.
///
/// Every action awaits its request and only then touches state, so the
/// event list always mirrors the last successful response. Actions return
/// their outcome and also queue a [`Notice`] for the view.
pub struct App<A, S> {
    api: A,
    store: S,
    mode: Mode,
    form: FormBuffer,
    events: Vec<Event>,
    notices: Vec<Notice>,
}

impl<A: EventApi, S: KeyValueStore> App<A, S> {
    /// Create an anonymous client. Call [`App::restore`] to pick up a
    /// persisted session.
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            mode: Mode::Anonymous,
            form: FormBuffer::default(),
            events: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.mode.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.mode.is_authenticated()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn form(&self) -> &FormBuffer {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormBuffer {
        &mut self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Rebuild the session persisted by an earlier run from storage alone.
    ///
    /// Returns whether a session was found. Never contacts the API and
    /// leaves the event list untouched.
    pub fn load_session(&mut self) -> Result<bool> {
        let Some(token) = self.store.get(TOKEN_KEY)? else {
            return Ok(false);
        };
        let Some(user) = self.stored_user()? else {
            return Ok(false);
        };

        tracing::debug!(user = %user.username, "loaded stored session");
        self.mode = Mode::Authenticated(Session { token, user });
        Ok(true)
    }

    /// Resume the persisted session and load its events.
    ///
    /// Without a stored token this is a no-op. A token stored without its
    /// user is resolved through the API once; the token is never discarded
    /// here, whatever the server answers.
    pub async fn restore(&mut self) -> Result<()> {
        if !self.load_session()? {
            let Some(token) = self.store.get(TOKEN_KEY)? else {
                return Ok(());
            };
            let user = match self.api.current_user(&token).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "could not resolve user for stored token");
                    return Err(e.into());
                }
            };
            self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
            self.mode = Mode::Authenticated(Session { token, user });
        }

        self.events.clear();
        // failures are logged by fetch_events; the session itself is restored
        let _ = self.fetch_events().await;
        Ok(())
    }

    fn stored_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable stored user");
                Ok(None)
            }
        }
    }

    /// Register with the email, username and password inputs.
    pub async fn register(&mut self) -> Result<()> {
        let registration = self.form.registration();
        let outcome = match self.api.register(&registration).await {
            Ok(response) => self.establish(response),
            Err(e) => Err(e.into()),
        };
        self.report(outcome, "Registration successful", "Registration failed")
    }

    /// Log in with the email (as identifier) and password inputs, then load
    /// the user's events.
    pub async fn login(&mut self) -> Result<()> {
        let credentials = self.form.credentials();
        let outcome = match self.api.login(&credentials).await {
            Ok(response) => self.establish(response),
            Err(e) => Err(e.into()),
        };
        self.report(outcome, "Login successful", "Login failed")?;
        let _ = self.fetch_events().await;
        Ok(())
    }

    /// Forget the session locally. Never contacts the API.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "failed to remove stored session");
            }
        }
        self.mode = Mode::Anonymous;
        self.events.clear();
        self.notices.push(Notice::success("Logout successful"));
    }

    /// Replace the cached list with the server's. Failures are logged only.
    pub async fn fetch_events(&mut self) -> Result<()> {
        let token = self.token()?;
        match self.api.list_events(token).await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "fetched events");
                self.events = events;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, auth = e.is_auth(), "error fetching events");
                Err(e.into())
            }
        }
    }

    /// Create an event from the name and description inputs.
    pub async fn create_event(&mut self) -> Result<Event> {
        let outcome = self.try_create_event().await;
        self.report(outcome, "Event created", "Event creation failed")
    }

    async fn try_create_event(&mut self) -> Result<Event> {
        let draft = self.form.draft();
        let token = self.token()?;
        let event = self.api.create_event(token, &draft).await?;
        self.events.push(event.clone());
        self.form.clear_event_fields();
        Ok(event)
    }

    /// Overwrite event `id` with the name and description inputs.
    pub async fn edit_event(&mut self, id: EventId) -> Result<Event> {
        let outcome = self.try_edit_event(id).await;
        self.report(outcome, "Event updated", "Event update failed")
    }

    async fn try_edit_event(&mut self, id: EventId) -> Result<Event> {
        let draft = self.form.draft();
        let token = self.token()?;
        let updated = self.api.update_event(token, id, &draft).await?;
        for event in self.events.iter_mut().filter(|e| e.id == id) {
            *event = updated.clone();
        }
        self.form.clear_event_fields();
        Ok(updated)
    }

    /// Delete event `id` and drop it from the cached list.
    pub async fn delete_event(&mut self, id: EventId) -> Result<()> {
        let outcome = self.try_delete_event(id).await;
        self.report(outcome, "Event deleted", "Event deletion failed")
    }

    async fn try_delete_event(&mut self, id: EventId) -> Result<()> {
        let token = self.token()?;
        self.api.delete_event(token, id).await?;
        self.events.retain(|e| e.id != id);
        Ok(())
    }

    fn token(&self) -> Result<&str> {
        self.mode
            .session()
            .map(|s| s.token.as_str())
            .ok_or(Error::NotAuthenticated)
    }

    /// Persist the issued token and its user, then switch to the authenticated view.
    fn establish(&mut self, response: AuthResponse) -> Result<()> {
        let token = response
            .jwt
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken)?;
        let user = response.user.ok_or(Error::MissingUser)?;

        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.store.set(TOKEN_KEY, &token)?;
        tracing::debug!(user = %user.username, "session established");
        self.mode = Mode::Authenticated(Session { token, user });
        self.events.clear();
        Ok(())
    }

    fn report<T>(&mut self, outcome: Result<T>, success: &'static str, failure: &'static str) -> Result<T> {
        match &outcome {
            Ok(_) => self.notices.push(Notice::success(success)),
            Err(e) => {
                tracing::warn!(error = %e, "{failure}");
                self.notices.push(Notice::error(failure, e.to_string()));
            }
        }
        outcome
    }
}
