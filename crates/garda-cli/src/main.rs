//! garda - workforce session and menu inspector.
//!
//! A headless companion to the dashboard and kiosk front ends: establish a
//! session against the workforce API (or install a provisioned token),
//! inspect the claims behind it, and print the role-gated menus exactly as
//! the screens gate them.
//!
//! # Configuration
//!
//! Sources, highest priority first:
//!
//! 1. CLI arguments
//! 2. Environment variables (`GARDA_*`)
//! 3. Default values
//!
//! # Environment Variables
//!
//! - `GARDA_API_BASE_URL`: API base URL
//! - `GARDA_SESSION_FILE`: session state file path
//! - `RUST_LOG`: log filter (`EnvFilter` syntax)

mod file_store;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use file_store::FileStore;
use garda_api::{ApiClient, ApiConfig};
use garda_auth::{
    dashboard_sidebar, kiosk_menu, GatePolicy, MenuCatalog, SessionError, SessionView,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SESSION_FILE_ENV: &str = "GARDA_SESSION_FILE";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Guard workforce session and menu inspector.
#[derive(Parser, Debug)]
#[command(name = "garda")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Session state file (also: GARDA_SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// API base URL (also: GARDA_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a session, or install a provisioned token
    Login {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Install an already-issued token instead of calling the API
        #[arg(long, conflicts_with_all = ["username", "password"])]
        token: Option<String>,
    },

    /// Show the claims behind the current session
    Whoami,

    /// Print a role-gated menu the way its screen renders it
    Menu {
        /// Which screen's catalog to print
        #[arg(long, value_enum, default_value_t = Screen::Dashboard)]
        screen: Screen,
    },

    /// Clear the session pair
    Logout,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Screen {
    Dashboard,
    Kiosk,
}

impl Screen {
    fn catalog(self) -> MenuCatalog {
        match self {
            Self::Dashboard => dashboard_sidebar(),
            Self::Kiosk => kiosk_menu(),
        }
    }
}

fn session_file(args: &Args) -> PathBuf {
    if let Some(path) = &args.session_file {
        return path.clone();
    }
    if let Some(path) = std::env::var_os(SESSION_FILE_ENV) {
        return PathBuf::from(path);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".garda").join("session"),
        None => PathBuf::from(".garda-session"),
    }
}

async fn login(
    session: &SessionView<'_>,
    config: ApiConfig,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let token = match (token, username, password) {
        (Some(token), _, _) => token,
        (None, Some(username), Some(password)) => {
            let client = ApiClient::new(config);
            client.login(&username, &password).await?
        }
        _ => bail!("provide --username and --password, or --token"),
    };

    let claims = session.establish(&token)?;
    println!(
        "logged in as {} ({})",
        claims.nama.as_deref().unwrap_or("-"),
        claims.role
    );
    Ok(())
}

fn whoami(session: &SessionView<'_>) -> Result<()> {
    let claims = match session.claims() {
        Ok(claims) => claims,
        Err(SessionError::Absent) => bail!("no active session (run `garda login`)"),
        Err(SessionError::Token(_)) => {
            bail!("stored token is malformed; run `garda login` again")
        }
    };

    println!("nama: {}", claims.nama.as_deref().unwrap_or("-"));
    println!("role: {}", claims.role);
    if session.parsed_role().is_none() {
        println!("note: role is not one of the known roles; menus will fail closed");
    }
    Ok(())
}

fn menu(session: &SessionView<'_>, screen: Screen) {
    let catalog = screen.catalog();
    let role = session.parsed_role();

    match catalog.policy() {
        GatePolicy::Lock => {
            for item in catalog.annotated(role) {
                let badge = if item.locked { "  [LOCK]" } else { "" };
                println!("{} -> {}{badge}", item.entry.label, item.entry.route);
            }
        }
        GatePolicy::Hide => {
            let visible = catalog.visible(role);
            if visible.is_empty() {
                // An empty hide-policy menu means "role not known yet",
                // not "no permissions".
                println!("(no session role; menu not rendered)");
                return;
            }
            for entry in visible {
                println!("{} -> {}", entry.label, entry.route);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = FileStore::new(session_file(&args));
    let session = SessionView::over(&store);
    let config = match &args.base_url {
        Some(url) => ApiConfig::new(url.clone()),
        None => ApiConfig::from_env_or(DEFAULT_BASE_URL),
    };

    match args.command {
        Command::Login {
            username,
            password,
            token,
        } => login(&session, config, username, password, token).await?,
        Command::Whoami => whoami(&session)?,
        Command::Menu { screen } => menu(&session, screen),
        Command::Logout => {
            session.logout();
            println!("session cleared");
        }
    }

    Ok(())
}
