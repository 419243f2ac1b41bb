//! Interactive single-page shell.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use runtime::{App, EventApi, EventId, Field, NOTICE_DURATION, Notice};
use storage::KeyValueStore;

use crate::error::Result;
use crate::view;

const HELP: &str = "\
commands:
  set <field> <value>   edit an input (email, username, password, name, description)
  register | login      submit the account form
  create                create an event from name/description
  edit <id>             overwrite an event with name/description
  delete <id>           delete an event
  refresh               reload events from the server
  logout                forget the session
  help                  show this message
  quit                  leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Set(Field, String),
    Register,
    Login,
    Logout,
    Create,
    Edit(EventId),
    Delete(EventId),
    Refresh,
    Help,
    Quit,
}

fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let id = || {
        rest.parse::<EventId>()
            .map_err(|_| format!("expected an event id, got '{rest}'"))
    };

    let command = match word {
        "" => return Ok(None),
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                return Err("usage: set <field> <value>".into());
            }
            Command::Set(name.parse()?, value.trim().to_string())
        }
        "register" => Command::Register,
        "login" => Command::Login,
        "logout" => Command::Logout,
        "create" => Command::Create,
        "edit" => Command::Edit(id()?),
        "delete" => Command::Delete(id()?),
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Run the render / read / dispatch loop until quit or EOF.
pub async fn run<A: EventApi, S: KeyValueStore>(app: &mut App<A, S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut visible: Vec<(Instant, Notice)> = Vec::new();

    loop {
        let now = Instant::now();
        visible.extend(app.take_notices().into_iter().map(|n| (now, n)));
        visible.retain(|(shown, _)| now.duration_since(*shown) < NOTICE_DURATION);

        println!("{}", view::render(app.mode(), app.form(), app.events()));
        for (_, notice) in &visible {
            println!("{}", view::render_notice(notice));
        }
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        // Outcomes surface as notices; results are only for one-shot commands.
        match command {
            Command::Set(field, value) => app.form_mut().set(field, value),
            Command::Register => {
                let _ = app.register().await;
            }
            Command::Login => {
                let _ = app.login().await;
            }
            Command::Logout => app.logout(),
            Command::Create => {
                let _ = app.create_event().await;
            }
            Command::Edit(id) => {
                let _ = app.edit_event(id).await;
            }
            Command::Delete(id) => {
                let _ = app.delete_event(id).await;
            }
            Command::Refresh => {
                let _ = app.fetch_events().await;
            }
            Command::Help => println!("{HELP}\n"),
            Command::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse("   \n"), Ok(None));
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set description a long talk\n"),
            Ok(Some(Command::Set(Field::Description, "a long talk".into())))
        );
    }

    #[test]
    fn set_without_value_clears_field() {
        assert_eq!(parse("set name"), Ok(Some(Command::Set(Field::Name, String::new()))));
    }

    #[test]
    fn set_rejects_unknown_field() {
        assert!(parse("set title x").is_err());
        assert!(parse("set").is_err());
    }

    #[test]
    fn edit_and_delete_take_ids() {
        assert_eq!(parse("edit 5"), Ok(Some(Command::Edit(EventId(5)))));
        assert_eq!(parse("delete #7"), Ok(Some(Command::Delete(EventId(7)))));
        assert!(parse("delete").is_err());
        assert!(parse("edit five").is_err());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("login"), Ok(Some(Command::Login)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse("?"), Ok(Some(Command::Help)));
        assert!(parse("dance").is_err());
    }
}
