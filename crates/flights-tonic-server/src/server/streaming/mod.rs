//! Server-streaming support for `GetFlightList`.
//!
//! - [`feeder`] - Walks the catalog and pushes each flight into a
//!   [`FlightSink`](feeder::FlightSink), stopping at the first failed send.

pub mod feeder;
