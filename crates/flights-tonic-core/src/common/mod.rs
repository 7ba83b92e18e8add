//! Shared types, codec, and error definitions used by every Flights binary.
//!
//! ## Submodules
//!
//! - [`codec`] - Protobuf encode/decode of a single [`proto::Flight`].
//! - [`error`] - Centralized error type and its `tonic::Status` mapping.
//! - [`telemetry`] - Structured logging setup.
//! - [`types`] - Default endpoints and `Flight` helpers.
//! - [`proto`] - Generated message and service definitions.

pub mod codec;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::{Error, Result};

/// gRPC service and message definitions generated from `proto/flight.proto`.
///
/// ## Service
///
/// - `GetFlight` - unary exact-match lookup of a single flight.
/// - `GetFlightList` - server-streaming listing of every known flight.
///
/// ## Message Format
///
/// - [`Flight`](proto::Flight) - `airline_code` (field 1) and `number`
///   (field 2), both strings.
pub mod proto {
    tonic::include_proto!("flight");

    /// Encoded `FileDescriptorSet` for registering with gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("flight_descriptor");
}
