mod config;
mod error;
mod shell;
mod view;

use std::path::PathBuf;

use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use runtime::{App, EventId, Field, HttpBackend, Mode, TOKEN_KEY};
use storage::SqliteStore;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "eventdesk.toml";

type Client = App<HttpBackend, SqliteStore>;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "A terminal client for a remote event API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell
    Shell,
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "EVENTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in with email (or username) and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "EVENTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Status,
    /// Manage events (lists them when no action is given)
    Events {
        #[command(subcommand)]
        action: Option<EventsCommand>,
    },
}

#[derive(Subcommand)]
enum EventsCommand {
    /// List events
    List,
    /// Create an event
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Overwrite an event's name and description
    Edit {
        id: EventId,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete an event
    Delete { id: EventId },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?.with_env(|key| std::env::var(key).ok());
    config.validate()?;

    let startup = match cli.command {
        Some(Commands::Shell) | None => Startup::Restore,
        Some(_) => Startup::Offline,
    };
    let mut app = open_app(&config, startup).await?;

    match cli.command {
        Some(Commands::Shell) | None => shell::run(&mut app).await,
        Some(Commands::Register {
            email,
            username,
            password,
        }) => {
            let form = app.form_mut();
            form.set(Field::Email, email);
            form.set(Field::Username, username);
            form.set(Field::Password, password);
            let outcome = app.register().await;
            finish(&mut app, outcome)
        }
        Some(Commands::Login { email, password }) => {
            let form = app.form_mut();
            form.set(Field::Email, email);
            form.set(Field::Password, password);
            let outcome = app.login().await;
            finish(&mut app, outcome)?;
            print!("{}", view::render_events(app.events()));
            Ok(())
        }
        Some(Commands::Logout) => {
            app.logout();
            finish(&mut app, Ok(()))
        }
        Some(Commands::Status) => cmd_status(&app),
        Some(Commands::Events { action }) => cmd_events(&mut app, action).await,
    }
}

/// How much of the persisted session to bring back before a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Startup {
    /// Load the stored session and fetch its events.
    Restore,
    /// Load the stored session from disk only; no request is made.
    Offline,
}

async fn open_app(config: &Config, startup: Startup) -> Result<Client> {
    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "opened token store");

    let mut backend = HttpBackend::builder(config.api.base_url.trim());
    if let Some(timeout) = config.timeout() {
        backend = backend.timeout(timeout);
    }

    let mut app = App::new(backend.build(), store);
    match startup {
        Startup::Restore => {
            // An unusable stored session just leaves the client anonymous.
            if let Err(e) = app.restore().await {
                tracing::debug!(error = %e, "starting anonymous");
            }
        }
        Startup::Offline => {
            app.load_session()?;
        }
    }
    Ok(app)
}

/// Print queued notices, then propagate the action's outcome.
fn finish<T>(app: &mut Client, outcome: runtime::Result<T>) -> Result<T> {
    for notice in app.take_notices() {
        let line = view::render_notice(&notice);
        if notice.is_error() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
    Ok(outcome?)
}

fn cmd_status(app: &Client) -> Result<()> {
    match app.mode() {
        Mode::Anonymous => println!("Not logged in."),
        Mode::Authenticated(session) => {
            let user = &session.user;
            match &user.email {
                Some(email) => println!("Logged in as {} <{email}> (id {})", user.username, user.id),
                None => println!("Logged in as {} (id {})", user.username, user.id),
            }
            if let Some(stamp) = app.store().updated_at(TOKEN_KEY)? {
                let issued = Local
                    .from_utc_datetime(&stamp.naive_utc())
                    .format("%Y-%m-%d %H:%M");
                println!("Token stored: {issued}");
            }
        }
    }
    Ok(())
}

async fn cmd_events(app: &mut Client, action: Option<EventsCommand>) -> Result<()> {
    match action.unwrap_or(EventsCommand::List) {
        EventsCommand::List => {
            app.fetch_events().await?;
            print!("{}", view::render_events(app.events()));
            Ok(())
        }
        EventsCommand::Create { name, description } => {
            let form = app.form_mut();
            form.set(Field::Name, name);
            form.set(Field::Description, description);
            let outcome = app.create_event().await;
            let event = finish(app, outcome)?;
            println!("#{} {}", event.id, event.name);
            Ok(())
        }
        EventsCommand::Edit {
            id,
            name,
            description,
        } => {
            let form = app.form_mut();
            form.set(Field::Name, name);
            form.set(Field::Description, description);
            let outcome = app.edit_event(id).await;
            let event = finish(app, outcome)?;
            println!("#{} {}", event.id, event.name);
            Ok(())
        }
        EventsCommand::Delete { id } => {
            let outcome = app.delete_event(id).await;
            finish(app, outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{ApiConfig, StorageConfig};
    use runtime::USER_KEY;
    use serde_json::json;
    use storage::KeyValueStore;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, dir: &TempDir) -> Config {
        Config {
            api: ApiConfig {
                base_url: format!("{}/api", server.uri()),
                timeout_secs: 5,
            },
            storage: StorageConfig {
                path: Some(dir.path().join("eventdesk.db")),
            },
        }
    }

    fn seed_session(config: &Config) {
        let store = SqliteStore::open(config.database_path().unwrap()).unwrap();
        store.set(TOKEN_KEY, "T").unwrap();
        store
            .set(USER_KEY, r#"{"id":1,"username":"kim","email":"kim@example.com"}"#)
            .unwrap();
    }

    #[tokio::test]
    async fn logout_never_contacts_the_api() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);
        seed_session(&config);

        let mut app = open_app(&config, Startup::Offline).await.unwrap();
        assert!(app.is_authenticated());
        app.logout();
        finish(&mut app, Ok(())).unwrap();

        assert!(server.received_requests().await.unwrap().is_empty());
        let store = SqliteStore::open(config.database_path().unwrap()).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn status_reads_the_stored_session_offline() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);
        seed_session(&config);

        let app = open_app(&config, Startup::Offline).await.unwrap();
        assert_eq!(app.session().unwrap().user.username, "kim");
        cmd_status(&app).unwrap();

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn startup_with_stored_session_fetches_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .and(header("Authorization", "Bearer T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 3, "name": "Standup", "description": "daily"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);
        seed_session(&config);

        let app = open_app(&config, Startup::Restore).await.unwrap();

        assert!(app.is_authenticated());
        assert_eq!(app.events().len(), 1);
        assert_eq!(app.events()[0].name, "Standup");
    }

    #[tokio::test]
    async fn startup_keeps_session_when_events_are_refused() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);
        seed_session(&config);

        let app = open_app(&config, Startup::Restore).await.unwrap();

        assert!(app.is_authenticated());
        assert_eq!(app.store().get(TOKEN_KEY).unwrap().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn events_list_fails_when_fetch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);
        seed_session(&config);

        let mut app = open_app(&config, Startup::Offline).await.unwrap();
        let result = cmd_events(&mut app, Some(EventsCommand::List)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn events_list_requires_login() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir);

        let mut app = open_app(&config, Startup::Offline).await.unwrap();
        let result = cmd_events(&mut app, None).await;

        assert!(result.is_err());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
