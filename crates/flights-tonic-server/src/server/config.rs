use anyhow::bail;
use clap::Parser;
use flights_tonic_core::{telemetry::LogFormat, types::DEFAULT_SERVER_ADDR};

/// Runtime configuration for the `flights-tonic-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flights-tonic-server",
    version,
    about = "A gRPC service for looking up and streaming flights"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Example: "0.0.0.0:8080" or "127.0.0.1:0" for an ephemeral port.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from(DEFAULT_SERVER_ADDR))]
    pub server_addr: String,

    /// Capacity of the channel between the flight list producer and the gRPC
    /// response stream.
    ///
    /// The producer waits whenever this many flights are queued and not yet
    /// taken by the transport. Keep it small so a slow or vanished client is
    /// noticed on the next send.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 1)]
    pub stream_buffer_size: usize,

    /// Console log format: pretty, compact, or json.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub stream_buffer_size: usize,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: String::from(DEFAULT_SERVER_ADDR),
            stream_buffer_size: 1,
            log_format: LogFormat::default(),
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        // `mpsc::channel` panics on a zero capacity.
        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        Ok(Self {
            server_addr: args.server_addr,
            stream_buffer_size: args.stream_buffer_size,
            log_format: args.log_format,
        })
    }
}
