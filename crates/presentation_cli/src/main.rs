//! Transit skill CLI
//!
//! One-shot event invocation and administration of the skill server.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, TelemetryConfig, build_skill_service, init_telemetry};
use integration_transit::{DepartureClient, ProcessDepartureClient};
use presentation_cli::{
    Cli, Commands, check_health, format_departures, invoke_event, log_filter_from_verbosity,
    read_event, send_event,
};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result
    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..TelemetryConfig::default()
    })?;

    match cli.command {
        Commands::Invoke { event } => {
            let config = AppConfig::load_from(cli.config.as_deref())
                .context("Failed to load configuration")?;
            let service = build_skill_service(&config)?;

            let raw = read_event(event.as_deref())?;
            match invoke_event(&service, &raw).await? {
                Some(envelope) => println!("{envelope}"),
                None => debug!("Event produced no response body"),
            }
        },

        Commands::Send { event, url } => {
            let raw = read_event(event.as_deref())?;
            let client = reqwest::Client::new();

            match send_event(&client, &url, raw).await? {
                Some(envelope) => println!("{envelope}"),
                None => debug!("Server answered 204 No Content"),
            }
        },

        Commands::Departures { station } => {
            let config = AppConfig::load_from(cli.config.as_deref())
                .context("Failed to load configuration")?;
            let client = ProcessDepartureClient::new(config.transit)?;

            let response = client.fetch_departures(&station).await?;
            println!("{}", format_departures(&station, &response));
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match check_health(&client, &url).await {
                Ok(true) => {
                    println!("Healthy");
                    std::process::exit(0);
                },
                Ok(false) => {
                    println!("Unhealthy");
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
