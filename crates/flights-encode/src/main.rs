#![doc = include_str!("../README.md")]

use anyhow::Context;
use clap::Parser;
use flights_tonic_core::{
    codec,
    proto::Flight,
    telemetry::{LogFormat, init_tracing},
};

#[derive(Parser, Debug)]
#[command(
    name = "flights-encode",
    version,
    about = "Encodes a flight to protobuf bytes and decodes it back"
)]
struct CliArgs {
    /// Carrier code of the flight to encode.
    #[arg(long, default_value_t = String::from("AS"))]
    airline_code: String,

    /// Flight number of the flight to encode.
    #[arg(long, default_value_t = String::from("3567"))]
    number: String,

    /// Console log format: pretty, compact, or json.
    #[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

/// What one encode/decode pass produced.
#[derive(Debug)]
struct RoundTrip {
    bytes: Vec<u8>,
    decoded: Flight,
}

fn round_trip(flight: &Flight) -> flights_tonic_core::Result<RoundTrip> {
    let bytes = codec::encode(flight);
    let decoded = codec::decode(bytes.clone())?;
    Ok(RoundTrip {
        bytes: bytes.to_vec(),
        decoded,
    })
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_format)?;

    let flight = Flight::new(args.airline_code, args.number);
    tracing::info!(?flight, "Flight struct");

    let res = round_trip(&flight).context("failed to decode flight");
    let output = match res {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("{e:#}");
            return Err(e);
        }
    };

    tracing::info!(
        len = output.bytes.len(),
        bits = %codec::format_bits(&output.bytes),
        "Encoded bytes"
    );
    tracing::info!(flight = ?output.decoded, "Decoded struct");

    Ok(())
}
