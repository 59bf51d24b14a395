//! Command-line front end for the campus event service
#![forbid(unsafe_code)]

use anyhow::{Context, bail};
use campus_events_client::controllers::{
    AdminLoginController, CreateEventController, CreateOutcome, DashboardController, Entry,
    HomeController, LoginOutcome, ManageEventsController, log_out,
};
use campus_events_client::{
    ApiClient, EventRepository, FileSessionStore, LiveSearch, SearchOutcome, SearchScope,
    SessionStore,
};
use campus_events_core::utils::{format_event_date, format_event_time};
use campus_events_core::{Config, Event, EventDraft, EventId, types::parse_event_time};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Command line interface for the campus event service
#[derive(Parser)]
#[command(
    name = "campus-events",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse and administer campus events"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Session file (overrides configuration)
    #[arg(long, value_name = "FILE")]
    session_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Listings available without logging in
#[derive(Clone, Copy, ValueEnum)]
enum Listing {
    /// Approved events
    Approved,
    /// Pending and approved events
    Recent,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Log in as an administrator
    Login {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long, env = "CAMPUS_EVENTS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored admin session
    Logout,

    /// Show the stored admin session
    Whoami,

    /// Show the admin dashboard
    Dashboard,

    /// List public events
    Events {
        /// Which listing to show
        #[arg(long, value_enum, default_value = "approved")]
        listing: Listing,
    },

    /// Search events by keyword
    Search {
        /// Keyword; blank reloads the listing
        keyword: String,

        /// Listing searched and used for blank input
        #[arg(long, value_enum, default_value = "approved")]
        listing: Listing,
    },

    /// Show a single event
    Show {
        /// Event id
        id: EventId,
    },

    /// Submit a new event
    Create {
        /// Event title
        #[arg(long)]
        title: String,

        /// Event description
        #[arg(long)]
        description: String,

        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        /// Time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: chrono::NaiveTime,

        /// Location
        #[arg(long)]
        location: String,
    },

    /// List every event for administration
    Manage {
        /// Only show events whose title or location contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Approve an event
    Approve {
        /// Event id
        id: EventId,
    },

    /// Reject an event
    Reject {
        /// Event id
        id: EventId,
    },

    /// Delete an event permanently
    Delete {
        /// Event id
        id: EventId,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| format!("invalid date: {e}"))
}

fn parse_time(raw: &str) -> Result<chrono::NaiveTime, String> {
    parse_event_time(raw).ok_or_else(|| format!("invalid time: {raw}"))
}

/// Status changes offered by the CLI
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Approve,
    Reject,
    Delete,
}

impl Mutation {
    const fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
        }
    }
}

/// Shared clients for one invocation
struct App {
    api: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = Config::load_or_default(cli.config.as_deref());
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    campus_events_core::init_logging(&config.logging)?;

    if let Some(e) = load_error {
        if cli.config.is_some() {
            return Err(e).context("failed to load configuration");
        }
        warn!("Failed to load config: {}, using defaults", e);
    }

    config = config.with_api_url_override(cli.api_url.clone());
    if let Some(file) = &cli.session_file {
        config.session.file.clone_from(file);
    }
    debug!(base_url = %config.api.base_url, session = %config.session.file.display(), "Configuration resolved");

    let app = App {
        api: Arc::new(ApiClient::from_config(&config.api)?),
        session: Arc::new(FileSessionStore::at_path(&config.session.file)),
        json: cli.json,
    };

    app.run(cli.command).await
}

impl App {
    async fn run(&self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Login { email, password } => self.login(&email, &password).await,
            Commands::Logout => {
                log_out(self.session.as_ref());
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => self.whoami(),
            Commands::Dashboard => self.dashboard().await,
            Commands::Events { listing } => self.events(listing).await,
            Commands::Search { keyword, listing } => self.search(&keyword, listing).await,
            Commands::Show { id } => {
                let event = self.api.get(id).await.context("failed to fetch event")?;
                self.print_events(std::slice::from_ref(&event))
            }
            Commands::Create {
                title,
                description,
                date,
                time,
                location,
            } => {
                let draft = EventDraft {
                    title,
                    description,
                    date,
                    time,
                    location,
                };
                self.create(&draft).await
            }
            Commands::Manage { filter } => self.manage(filter.as_deref()).await,
            Commands::Approve { id } => self.mutate(id, Mutation::Approve).await,
            Commands::Reject { id } => self.mutate(id, Mutation::Reject).await,
            Commands::Delete { id } => self.mutate(id, Mutation::Delete).await,
        }
    }

    fn repository(&self) -> Arc<dyn EventRepository> {
        self.api.clone()
    }

    async fn login(&self, email: &str, password: &str) -> anyhow::Result<()> {
        let controller = AdminLoginController::new(self.api.clone(), self.session.clone());
        match controller.submit(email, password).await {
            LoginOutcome::Authenticated(_) => self.whoami(),
            LoginOutcome::Failed(message) => bail!(message),
        }
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let Some(session) = self.session.current_session() else {
            bail!("Not logged in");
        };

        if self.json {
            let value = serde_json::json!({
                "id": session.id,
                "name": session.name,
                "email": session.email,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{} <{}>", session.name, session.email);
        }
        Ok(())
    }

    async fn dashboard(&self) -> anyhow::Result<()> {
        let controller = DashboardController::new(self.repository(), self.session.clone());
        let Entry::Ready(view) = controller.enter().await else {
            bail!("Not logged in");
        };

        if self.json {
            let value = serde_json::json!({
                "name": view.admin_name,
                "email": view.admin_email,
                "approved": view.approved,
                "created": view.created,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("[{}] {} <{}>", view.initial, view.admin_name, view.admin_email);
            println!("Approved events: {}", view.approved);
            println!("Created events:  {}", view.created);
        }
        Ok(())
    }

    async fn events(&self, listing: Listing) -> anyhow::Result<()> {
        let events = match listing {
            Listing::Approved => HomeController::new(self.repository()).enter().await,
            Listing::Recent => {
                let search = LiveSearch::new(self.repository(), SearchScope::Recent);
                search.refresh().await;
                search.results()
            }
        };
        self.print_events(&events)
    }

    async fn search(&self, keyword: &str, listing: Listing) -> anyhow::Result<()> {
        let scope = match listing {
            Listing::Approved => SearchScope::Approved,
            Listing::Recent => SearchScope::Recent,
        };
        let search = LiveSearch::new(self.repository(), scope);

        if search.input(keyword).await == SearchOutcome::Failed {
            bail!("Search failed");
        }
        self.print_events(&search.results())
    }

    async fn create(&self, draft: &EventDraft) -> anyhow::Result<()> {
        let controller = CreateEventController::new(self.repository(), self.session.clone());
        match controller.submit(draft).await {
            Entry::Redirect(_) => bail!("Not logged in"),
            Entry::Ready(CreateOutcome::Failed { message }) => bail!(message),
            Entry::Ready(CreateOutcome::Created { event, message, .. }) => {
                println!("{message}");
                self.print_events(std::slice::from_ref(&event))
            }
        }
    }

    async fn manage(&self, filter: Option<&str>) -> anyhow::Result<()> {
        let controller = ManageEventsController::new(self.repository(), self.session.clone());
        if let Some(term) = filter {
            controller.set_filter(term);
        }

        match controller.enter().await {
            Entry::Ready(events) => self.print_events(&events),
            Entry::Redirect(_) => bail!("Not logged in"),
        }
    }

    async fn mutate(&self, id: EventId, mutation: Mutation) -> anyhow::Result<()> {
        let controller = ManageEventsController::new(self.repository(), self.session.clone());
        if matches!(controller.enter().await, Entry::Redirect(_)) {
            bail!("Not logged in");
        }

        let done = match mutation {
            Mutation::Approve => controller.approve(id).await,
            Mutation::Reject => controller.reject(id).await,
            Mutation::Delete => controller.delete(id).await,
        };
        let verb = mutation.verb();
        if !done {
            bail!("Failed to {verb} event {id}");
        }

        println!("Event {id}: {verb} done");
        Ok(())
    }

    fn print_events(&self, events: &[Event]) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(events)?);
            return Ok(());
        }

        if events.is_empty() {
            println!("No events found");
        }
        for event in events {
            println!(
                "{:>5}  {:<8}  {:<13} {:>8}  {}  @ {}",
                event.id,
                event.status,
                format_event_date(event.date),
                format_event_time(event.time),
                event.title,
                event.location
            );
        }
        Ok(())
    }
}
