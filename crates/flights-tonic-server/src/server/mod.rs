//! Server-side components of the Flights gRPC service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/env configuration and validation.
//! - [`service`] - The `Flights` implementation and its flight catalog.
//! - [`streaming`] - The producer that pushes the flight list into a
//!   response stream.
//! - [`telemetry`] - Optional OpenTelemetry metrics.

pub mod config;
pub mod service;
pub mod streaming;
pub mod telemetry;
