//! Error types for the Flights service, client, and codec.
//!
//! This module defines the central `Error` enum shared by every binary in the
//! workspace. It implements `From<Error>` for `tonic::Status` so handler
//! failures propagate to clients with an appropriate status code.
//!
//! ## Error Cases
//! - `Setup`: A listener, endpoint, or subscriber could not be set up.
//! - `Connection`: The client could not dial the server.
//! - `Rpc`: The remote call completed with a non-OK status.
//! - `Transport`: A stream element could not be sent or received.
//! - `MalformedInput`: Bytes did not decode as a `Flight`.
//! - `ServiceShutdown`: A request arrived while the service was shutting down.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the Flights demo.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to bind, parse, or install something during startup.
    #[error("Setup error: {context}")]
    Setup { context: String },

    /// Dialing the server failed.
    #[error("Connection error: {0}")]
    Connection(#[from] tonic::transport::Error),

    /// The server answered the call with an error status.
    #[error("RPC error: {0}")]
    Rpc(#[from] Status),

    /// Sending or receiving a streamed element failed mid-stream.
    #[error("Transport error: {context}")]
    Transport { context: String },

    /// The input bytes are not a valid encoded `Flight`.
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] prost::DecodeError),

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Setup { context } => Status::internal(format!("Setup error: {context}")),
            Error::Connection(e) => Status::unavailable(format!("Connection error: {e}")),
            Error::Rpc(status) => status,
            Error::Transport { context } => {
                Status::unavailable(format!("Transport error: {context}"))
            }
            Error::MalformedInput(e) => Status::invalid_argument(format!("Malformed input: {e}")),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
        }
    }
}
