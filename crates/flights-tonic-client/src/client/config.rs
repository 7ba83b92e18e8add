use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::{fmt, time::Duration};
use flights_tonic_core::{proto::Flight, telemetry::LogFormat, types::DEFAULT_SERVER_URL};
use tonic::{codec::CompressionEncoding, transport::Uri};

/// Message compression negotiated with the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    #[default]
    None,
    Deflate,
    Gzip,
    Zstd,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Deflate => write!(f, "deflate"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

impl From<Compression> for Option<CompressionEncoding> {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => None,
            Compression::Deflate => Some(CompressionEncoding::Deflate),
            Compression::Gzip => Some(CompressionEncoding::Gzip),
            Compression::Zstd => Some(CompressionEncoding::Zstd),
        }
    }
}

/// Runtime configuration for the `flights-tonic-client` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flights-tonic-client",
    version,
    about = "Looks up a flight and streams the flight list from a Flights server"
)]
pub struct CliArgs {
    /// Server endpoint, including the scheme.
    ///
    /// Environment variable: `SERVER_URL`
    #[arg(long, env = "SERVER_URL", default_value_t = String::from(DEFAULT_SERVER_URL))]
    pub server_url: String,

    /// Carrier code sent with the `GetFlight` lookup.
    ///
    /// Environment variable: `AIRLINE_CODE`
    #[arg(long, env = "AIRLINE_CODE", default_value_t = String::from("AS"))]
    pub airline_code: String,

    /// Flight number sent with the `GetFlight` lookup.
    ///
    /// Environment variable: `FLIGHT_NUMBER`
    #[arg(long, env = "FLIGHT_NUMBER", default_value_t = String::from("3567"))]
    pub number: String,

    /// Deadline applied to every call, in milliseconds. Unset means no
    /// deadline.
    ///
    /// For `GetFlightList` this bounds the whole stream, not each message.
    ///
    /// Environment variable: `REQUEST_TIMEOUT_MS`
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Upper bound on establishing the connection, in milliseconds.
    ///
    /// Environment variable: `CONNECT_TIMEOUT_MS`
    #[arg(long, env = "CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Compression used for requests and accepted for responses.
    ///
    /// Environment variable: `COMPRESSION`
    #[arg(long, env = "COMPRESSION", value_enum, default_value_t = Compression::None)]
    pub compression: Compression,

    /// Console log format: pretty, compact, or json.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub query: Flight,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub compression: Compression,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Plain config for `server_url`: no deadlines, no compression.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            query: Flight::new("AS", "3567"),
            request_timeout: None,
            connect_timeout: None,
            compression: Compression::None,
            log_format: LogFormat::default(),
        }
    }
}

fn millis(name: &str, value: Option<u64>) -> anyhow::Result<Option<Duration>> {
    match value {
        Some(0) => bail!("{name} must be greater than 0"),
        Some(ms) => Ok(Some(Duration::from_millis(ms))),
        None => Ok(None),
    }
}

impl TryFrom<CliArgs> for ClientConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let uri = Uri::try_from(args.server_url.as_str())
            .map_err(|e| anyhow::anyhow!("SERVER_URL `{}` is invalid: {e}", args.server_url))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            bail!(
                "SERVER_URL `{}` must include a scheme and host, e.g. {DEFAULT_SERVER_URL}",
                args.server_url
            );
        }

        Ok(Self {
            query: Flight::new(args.airline_code, args.number),
            request_timeout: millis("REQUEST_TIMEOUT_MS", args.request_timeout_ms)?,
            connect_timeout: millis("CONNECT_TIMEOUT_MS", args.connect_timeout_ms)?,
            compression: args.compression,
            log_format: args.log_format,
            ..Self::new(args.server_url)
        })
    }
}
