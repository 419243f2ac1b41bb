//! Authentication state.

use crate::types::User;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-encoded user the token was issued for.
pub const USER_KEY: &str = "user";

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Which of the two views is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// No session; the login and register forms are shown.
    #[default]
    Anonymous,
    /// Logged in; the event list and event form are shown.
    Authenticated(Session),
}

impl Mode {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Mode::Anonymous => None,
            Mode::Authenticated(session) => Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Mode::Authenticated(_))
    }
}
