//! Terminal dashboard for a running analytics tracker.
//!
//! Shows summary cards, recent clicks and the click distribution, and sends
//! test clicks. When the server cannot be reached the dashboard switches to
//! simulated data and keeps clicks in a local log.
//!
//! # Usage
//!
//! ```bash
//! # Show the dashboard once
//! cargo run --bin dashboard -- show
//!
//! # Send a click and show the refreshed dashboard
//! cargo run --bin dashboard -- click test-button-1 --username alice
//!
//! # Pick buttons from a menu until "Quit"
//! cargo run --bin dashboard -- interactive
//! ```
//!
//! # Environment Variables
//!
//! - `TRACKER_URL` (optional): server base URL, default `http://localhost:3000`
//! - `GUEST_USERNAME` (optional): name for offline clicks without a username

use analytics_tracker::client::{
    ClickOutcome, ConnectionStatus, Dashboard, DashboardSnapshot, FallbackDataProvider,
    HttpReportingClient, SimulatedDataProvider,
};
use analytics_tracker::domain::route_catalog::DEMO_BUTTONS;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Select;
use std::time::Duration;

/// Terminal dashboard for analytics-tracker.
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(long, env = "TRACKER_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Number of recent clicks listed
    #[arg(long, default_value_t = 10)]
    recent: i64,

    /// Seed for simulated data shown while offline
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Name stored on offline clicks sent without --username
    #[arg(long, env = "GUEST_USERNAME", default_value = "guest")]
    guest_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show summary cards, recent clicks and click distribution
    Show,

    /// Send one click
    Click {
        /// Button identifier, e.g. "test-button-1"
        button_id: String,

        /// Display name (the server or --guest-name fills it in when absent)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Repeatedly pick a test button to click
    Interactive {
        #[arg(short, long)]
        username: Option<String>,
    },
}

type TerminalDashboard = Dashboard<HttpReportingClient, SimulatedDataProvider>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = HttpReportingClient::new(&cli.url, Duration::from_secs(cli.timeout))
        .context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(client, SimulatedDataProvider::new(cli.seed, Utc::now()))
        .with_recent_limit(cli.recent)
        .with_guest_username(cli.guest_name);

    match cli.command {
        Commands::Show => render(&dashboard.refresh(Utc::now()).await),
        Commands::Click {
            button_id,
            username,
        } => click(&dashboard, &button_id, username).await,
        Commands::Interactive { username } => interactive(&dashboard, username).await?,
    }

    Ok(())
}

async fn click(dashboard: &TerminalDashboard, button_id: &str, username: Option<String>) {
    let (outcome, snapshot) = dashboard.click(button_id, username, Utc::now()).await;
    report_outcome(&outcome);
    println!();
    render(&snapshot);
}

/// Loops over a button menu until the user picks "Quit".
async fn interactive(dashboard: &TerminalDashboard, username: Option<String>) -> Result<()> {
    render(&dashboard.refresh(Utc::now()).await);

    let mut items: Vec<&str> = DEMO_BUTTONS.to_vec();
    items.push("Refresh");
    items.push("Quit");

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Choose a button")
            .items(&items)
            .default(0)
            .interact()?;

        match items[choice] {
            "Quit" => break,
            "Refresh" => render(&dashboard.refresh(Utc::now()).await),
            button_id => click(dashboard, button_id, username.clone()).await,
        }
    }

    let offline = dashboard.fallback().offline_clicks();
    if !offline.is_empty() {
        println!(
            "{}",
            format!("{} click(s) were kept offline and not sent", offline.len()).yellow()
        );
    }

    Ok(())
}

fn report_outcome(outcome: &ClickOutcome) {
    match outcome {
        ClickOutcome::Tracked(click) => println!(
            "{} {} (id {})",
            "Tracked".green().bold(),
            click.button_id.cyan(),
            click.id
        ),
        ClickOutcome::RecordedOffline(click) => println!(
            "{} {} kept locally",
            "Offline:".yellow().bold(),
            click.button_id.cyan()
        ),
        ClickOutcome::Rejected(message) => {
            println!("{} {}", "Rejected:".red().bold(), message)
        }
    }
}

/// Prints a snapshot.
///
/// # Output Format
///
/// ```text
/// Analytics Dashboard  [connected]
///
///   Visits today:        12
///   Avg visits / day:    4
///   Button clicks:       7
///   Most recent visit:   2026-03-01 10:00:00 UTC
/// ```
fn render(snapshot: &DashboardSnapshot) {
    let status = match snapshot.status {
        ConnectionStatus::Connected => "[connected]".green(),
        ConnectionStatus::Disconnected => "[disconnected]".red(),
    };
    println!("{}  {}", "Analytics Dashboard".bright_blue().bold(), status);

    if let Some(ref banner) = snapshot.error_banner {
        println!("{}", banner.on_red().white());
        println!("{}", "Showing simulated data".yellow());
    }
    println!();

    let summary = &snapshot.summary;
    let most_recent = summary
        .most_recent_visit
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!(
        "  Visits today:        {}",
        summary.visits_today.to_string().bright_green().bold()
    );
    println!(
        "  Avg visits / day:    {}",
        summary.avg_visits_per_day.to_string().bright_green().bold()
    );
    println!(
        "  Button clicks:       {}",
        summary.total_button_clicks.to_string().bright_green().bold()
    );
    println!("  Most recent visit:   {}", most_recent.bright_green());
    println!();

    println!("{}", "Recent clicks".bright_white().bold());
    if snapshot.recent_clicks.is_empty() {
        println!("{}", "  No clicks yet".yellow());
    }
    for click in &snapshot.recent_clicks {
        println!(
            "  {:<20} {:<16} {}",
            click.button_id.cyan(),
            click.username,
            click.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        );
    }
    println!();

    println!("{}", "Click distribution".bright_white().bold());
    for share in &snapshot.distribution {
        let bar = "#".repeat((share.percentage / 5.0).round() as usize);
        println!(
            "  {:<20} {:>5} {:>6.1}% {}",
            share.button_id.cyan(),
            share.count,
            share.percentage,
            bar.bright_blue()
        );
    }
}
