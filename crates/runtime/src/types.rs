//! Domain types shared by the backend and the view-model.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// An event record owned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The account a token was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
}

/// Body of a login request.
///
/// `identifier` accepts either an email address or a username.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Body of a registration request.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Response from the login and registration endpoints.
///
/// Both fields are optional on the wire; a response without `jwt` is an
/// authentication failure, not a transport failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_parses_with_or_without_hash() {
        assert_eq!("5".parse::<EventId>().unwrap(), EventId(5));
        assert_eq!("#12".parse::<EventId>().unwrap(), EventId(12));
        assert!("abc".parse::<EventId>().is_err());
    }

    #[test]
    fn event_without_description_defaults_to_empty() {
        let event: Event = serde_json::from_str(r#"{"id": 3, "name": "Conf"}"#).unwrap();
        assert_eq!(event.id, EventId(3));
        assert_eq!(event.description, "");
    }

    #[test]
    fn user_without_email() {
        let user: User = serde_json::from_str(r#"{"id": 1, "username": "a"}"#).unwrap();
        assert_eq!(user.username, "a");
        assert!(user.email.is_none());
    }

    #[test]
    fn auth_response_tolerates_error_bodies() {
        let body = r#"{"data": null, "error": {"status": 400, "message": "Invalid identifier or password"}}"#;
        let resp: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(resp.jwt.is_none());
        assert!(resp.user.is_none());
    }

    #[test]
    fn credentials_serialize_as_identifier() {
        let creds = Credentials {
            identifier: "a@b.com".into(),
            password: "pw".into(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json, serde_json::json!({"identifier": "a@b.com", "password": "pw"}));
    }
}
