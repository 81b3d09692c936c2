//! `stagepass` — terminal admin dashboard for a ticket-booking backend.
//!
//! Built on [ratatui](https://ratatui.rs). Two booking views (Pending and
//! All) over the box-office REST API, with approve / reject / mark-used
//! admin actions behind confirmation dialogs. A login screen guards the
//! panel whenever no admin credential is stored; any 401/403 from the
//! backend clears the credential and routes back to it.
//!
//! Logs are written to a file (default `/tmp/stagepass.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stagepass_config::KeyringTokenStore;
use stagepass_core::{BoxOffice, BoxOfficeConfig, Session, TokenStore};

use crate::app::App;

/// Terminal dashboard for managing ticket bookings.
#[derive(Parser, Debug)]
#[command(name = "stagepass", version, about)]
struct Cli {
    /// Booking API root URL (e.g., https://tickets.example.com/api)
    #[arg(short = 'u', long, env = "STAGEPASS_API_URL")]
    api_url: Option<String>,

    /// Config profile name
    #[arg(short = 'p', long, default_value = "default", env = "STAGEPASS_PROFILE")]
    profile: String,

    /// Log file path
    #[arg(long, default_value = "/tmp/stagepass.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stagepass={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("stagepass.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build the booking desk from CLI flags + config file + keyring.
fn build_desk(cli: &Cli) -> Result<BoxOffice> {
    let config = stagepass_config::load_config_or_default();
    let profile = config.profiles.get(&cli.profile);

    let desk_config = match (cli.api_url.as_deref(), profile) {
        // CLI flag wins; profile (if any) still contributes nothing here
        (Some(api_url), _) => BoxOfficeConfig {
            base_url: api_url
                .parse()
                .map_err(|e| eyre!("invalid API URL '{api_url}': {e}"))?,
            transport: stagepass_core::TransportConfig::default(),
        },
        (None, Some(profile)) => {
            stagepass_config::profile_to_boxoffice_config(profile, &config.defaults)
                .map_err(|e| eyre!("profile '{}': {e}", cli.profile))?
        }
        (None, None) => {
            return Err(eyre!(
                "no API URL configured: pass --api-url, set STAGEPASS_API_URL, \
                 or add a '{}' profile to {}",
                cli.profile,
                stagepass_config::config_path().display(),
            ));
        }
    };

    // The session persists its credential in the OS keyring. If the
    // keyring is empty but the profile names another source (env var or
    // plaintext), adopt that token for this run without copying it in.
    let session = Arc::new(Session::new(
        Arc::new(KeyringTokenStore::new(&cli.profile)) as Arc<dyn TokenStore>,
    ));
    if !session.authenticated() {
        if let Some(profile) = profile {
            if let Ok(token) = stagepass_config::resolve_token(profile, &cli.profile) {
                session.adopt(token);
            }
        }
    }

    Ok(BoxOffice::new(&desk_config, session)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        api_url = cli.api_url.as_deref().unwrap_or("(from profile)"),
        profile = %cli.profile,
        "starting stagepass"
    );

    let desk = build_desk(&cli)?;
    let mut app = App::new(desk);
    app.run().await?;

    Ok(())
}
