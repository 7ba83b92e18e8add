//! Client-side components of the Flights demo.
//!
//! - [`config`] - CLI/env configuration and validation.
//! - [`query`] - [`FlightQueryClient`](query::FlightQueryClient), the
//!   connection plus the two calls made against it.

pub mod config;
pub mod query;
