//! Transit skill CLI
//!
//! Command definitions and the helpers behind them. The binary in
//! `main.rs` only parses arguments, sets up logging and prints results.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use application::SkillRequestHandler;
use clap::{Parser, Subcommand};
use domain::SkillRequest;
use integration_transit::DepartureResponse;
use reqwest::StatusCode;

/// Default base URL of a running skill server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Transit skill CLI
#[derive(Debug, Parser)]
#[command(name = "transit-skill-cli")]
#[command(author, version, about = "Transit departure skill CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "TRANSIT_SKILL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Handle one skill event in-process and print the response envelope
    ///
    /// Example: transit-skill-cli invoke --event launch.json
    Invoke {
        /// Event file (reads stdin if omitted)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },

    /// POST a skill event to a running server
    Send {
        /// Event file (reads stdin if omitted)
        #[arg(short, long)]
        event: Option<PathBuf>,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Query the departure provider directly
    Departures {
        /// Station name
        station: String,
    },

    /// Check server health
    Health {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        url: String,
    },
}

/// Map `-v` occurrences to a log filter
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Read a raw event from `path`, or stdin when no path is given
pub fn read_event(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            Ok(raw)
        },
    }
}

/// Handle a raw event with `handler` and render the envelope as JSON
///
/// Returns `None` for turns without a response body.
pub async fn invoke_event(
    handler: &dyn SkillRequestHandler,
    raw: &str,
) -> anyhow::Result<Option<String>> {
    let request = SkillRequest::from_json(raw.as_bytes()).context("Invalid skill event")?;

    let Some(envelope) = handler.handle(request).await? else {
        return Ok(None);
    };

    Ok(Some(serde_json::to_string_pretty(&envelope)?))
}

/// POST a raw event to the server at `base_url`
///
/// Returns the pretty-printed envelope, or `None` on `204 No Content`.
pub async fn send_event(
    client: &reqwest::Client,
    base_url: &str,
    raw: String,
) -> anyhow::Result<Option<String>> {
    let response = client
        .post(endpoint_url(base_url, "/v1/skill"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(raw)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.text().await?;
    if !status.is_success() {
        bail!("Server answered HTTP {status}: {body}");
    }

    let value: serde_json::Value =
        serde_json::from_str(&body).context("Server returned invalid JSON")?;
    Ok(Some(serde_json::to_string_pretty(&value)?))
}

/// Whether the server at `base_url` reports healthy
pub async fn check_health(client: &reqwest::Client, base_url: &str) -> anyhow::Result<bool> {
    let response = client
        .get(endpoint_url(base_url, "/health"))
        .send()
        .await?;
    Ok(response.status().is_success())
}

/// Render a departure response as a plain-text table
pub fn format_departures(station: &str, response: &DepartureResponse) -> String {
    let Some(resolved) = response
        .station
        .as_deref()
        .filter(|name| !name.trim().is_empty())
    else {
        return format!("Unknown station: {station}");
    };

    if response.departures.is_empty() {
        return format!("{resolved}: no departures");
    }

    let mut out = format!("{resolved}:");
    for departure in &response.departures {
        out.push('\n');
        out.push_str(&departure.to_string());
    }
    out
}
