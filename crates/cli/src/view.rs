//! Text rendering of the client state.

use runtime::{Event, FormBuffer, Mode, Notice, NoticeLevel};
use std::fmt::Write;

const TITLE: &str = "Event Management App";

/// Render the whole page for the current mode.
pub fn render(mode: &Mode, form: &FormBuffer, events: &[Event]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
    let _ = writeln!(out);

    match mode {
        Mode::Anonymous => {
            field(&mut out, "Email", &form.email);
            field(&mut out, "Username", &form.username);
            field(&mut out, "Password", &mask(&form.password));
            let _ = writeln!(out);
            let _ = writeln!(out, "[register]  [login]");
        }
        Mode::Authenticated(session) => {
            let _ = writeln!(out, "Welcome, {}!", session.user.username);
            let _ = writeln!(out);
            field(&mut out, "Event Name", &form.name);
            field(&mut out, "Event Description", &form.description);
            let _ = writeln!(out, "[create]");
            let _ = writeln!(out);
            let _ = writeln!(out, "Events");
            let _ = writeln!(out, "------");
            out.push_str(&render_events(events));
            let _ = writeln!(out);
            let _ = writeln!(out, "[logout]");
        }
    }

    out
}

/// Render the event list with per-event actions.
pub fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "(no events)\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "#{} {}", event.id, event.name);
        if !event.description.is_empty() {
            let _ = writeln!(out, "   {}", event.description);
        }
        let _ = writeln!(out, "   [edit {id}]  [delete {id}]", id = event.id);
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match (notice.level, &notice.detail) {
        (NoticeLevel::Success, _) => format!("✓ {}", notice.title),
        (NoticeLevel::Error, Some(detail)) => format!("✗ {}: {detail}", notice.title),
        (NoticeLevel::Error, None) => format!("✗ {}", notice.title),
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<20}{value}", format!("{label}:"));
}

fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::{EventId, Session, User};

    fn event(id: u64, name: &str, description: &str) -> Event {
        Event {
            id: EventId(id),
            name: name.into(),
            description: description.into(),
        }
    }

    fn authenticated() -> Mode {
        Mode::Authenticated(Session {
            token: "T".into(),
            user: User {
                id: 1,
                username: "kim".into(),
                email: None,
            },
        })
    }

    #[test]
    fn anonymous_shows_login_form_with_masked_password() {
        let form = FormBuffer {
            email: "a@b.com".into(),
            password: "secret".into(),
            ..Default::default()
        };
        let page = render(&Mode::Anonymous, &form, &[]);

        assert!(page.starts_with("Event Management App\n"));
        assert!(page.contains("a@b.com"));
        assert!(page.contains("******"));
        assert!(!page.contains("secret"));
        assert!(page.contains("[register]  [login]"));
        assert!(!page.contains("Welcome"));
    }

    #[test]
    fn anonymous_hides_events() {
        let page = render(&Mode::Anonymous, &FormBuffer::default(), &[event(1, "Hidden", "")]);
        assert!(!page.contains("Hidden"));
    }

    #[test]
    fn authenticated_shows_welcome_and_events() {
        let form = FormBuffer {
            name: "Draft".into(),
            ..Default::default()
        };
        let page = render(
            &authenticated(),
            &form,
            &[event(5, "Conf", "talk"), event(6, "Meetup", "")],
        );

        assert!(page.contains("Welcome, kim!"));
        assert!(page.contains("Draft"));
        assert!(page.contains("#5 Conf\n   talk\n   [edit 5]  [delete 5]"));
        assert!(page.contains("#6 Meetup\n   [edit 6]"));
        assert!(page.contains("[logout]"));
        assert!(!page.contains("[login]"));
    }

    #[test]
    fn empty_list_placeholder() {
        assert_eq!(render_events(&[]), "(no events)\n");
    }

    #[test]
    fn notices_render_with_marker() {
        assert_eq!(render_notice(&Notice::success("Event created")), "✓ Event created");
        assert_eq!(
            render_notice(&Notice::error("Login failed", "not logged in")),
            "✗ Login failed: not logged in"
        );
    }
}
