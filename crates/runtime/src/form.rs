//! Shared form input buffer.

use crate::types::{Credentials, EventDraft, Registration};

/// One input of the form buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Username,
    Password,
    Name,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Email,
        Field::Username,
        Field::Password,
        Field::Name,
        Field::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Username => "username",
            Field::Password => "password",
            Field::Name => "name",
            Field::Description => "description",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// Scratch input shared by the login, register and event forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub description: String,
}

impl FormBuffer {
    /// Overwrite a single field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::Name => &self.name,
            Field::Description => &self.description,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
        }
    }

    /// Reset the event inputs, keeping credentials.
    pub fn clear_event_fields(&mut self) {
        self.name.clear();
        self.description.clear();
    }

    /// Login body; the email input doubles as the identifier.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            identifier: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn registration(&self) -> Registration {
        Registration {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("Email".parse::<Field>().unwrap(), Field::Email);
        assert_eq!("description".parse::<Field>().unwrap(), Field::Description);
        assert!("title".parse::<Field>().is_err());
    }

    #[test]
    fn set_overwrites_single_field() {
        let mut form = FormBuffer::default();
        form.set(Field::Email, "a@b.com");
        form.set(Field::Name, "Conf");
        form.set(Field::Email, "c@d.com");
        assert_eq!(form.get(Field::Email), "c@d.com");
        assert_eq!(form.get(Field::Name), "Conf");
        assert_eq!(form.get(Field::Username), "");
    }

    #[test]
    fn clear_event_fields_keeps_credentials() {
        let mut form = FormBuffer {
            email: "a@b.com".into(),
            username: "a".into(),
            password: "pw".into(),
            name: "Conf".into(),
            description: "talk".into(),
        };
        form.clear_event_fields();
        assert_eq!(form.name, "");
        assert_eq!(form.description, "");
        assert_eq!(form.email, "a@b.com");
        assert_eq!(form.password, "pw");
    }

    #[test]
    fn credentials_use_email_as_identifier() {
        let mut form = FormBuffer::default();
        form.set(Field::Email, "a@b.com");
        form.set(Field::Username, "ignored");
        form.set(Field::Password, "pw");
        let creds = form.credentials();
        assert_eq!(creds.identifier, "a@b.com");
        assert_eq!(creds.password, "pw");
    }
}
