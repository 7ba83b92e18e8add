#![doc = include_str!("../README.md")]

mod client;

use anyhow::Context;
use clap::Parser;
use client::config::{ClientConfig, CliArgs};
use client::query::FlightQueryClient;
use flights_tonic_core::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ClientConfig::try_from(args)?;

    init_tracing(config.log_format)?;

    if let Err(e) = run(&config).await {
        tracing::error!("Client failed: {e:#}");
        return Err(e);
    }
    Ok(())
}

async fn run(config: &ClientConfig) -> anyhow::Result<()> {
    tracing::info!(
        url = %config.server_url,
        compression = %config.compression,
        "Connecting to Flights service"
    );
    let mut client = FlightQueryClient::connect(config)
        .await
        .context("failed to connect")?;

    let flight = client
        .fetch_flight(config.query.clone())
        .await
        .context("failed to get flight")?;
    if flight.is_empty() {
        tracing::info!(query = ?config.query, "Get flight success: no matching flight");
    } else {
        tracing::info!(?flight, "Get flight success");
    }

    let count = client
        .fetch_flight_list(|flight| tracing::info!(?flight, "Stream flight list success"))
        .await
        .context("failed to get flight list")?;
    tracing::info!(count, "Flight list stream complete");

    Ok(())
}
