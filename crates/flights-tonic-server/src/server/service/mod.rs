//! gRPC service implementation and the data it serves.
//!
//! ## Structure
//!
//! - [`catalog`] - Immutable flight dataset and the exact-match lookup.
//! - [`handler`] - gRPC service entry point (`FlightService`).

pub mod catalog;
pub mod handler;
