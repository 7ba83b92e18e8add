//! gRPC service implementation for flight lookup and listing.
//!
//! This module defines [`FlightService`], the concrete implementation of the
//! [`Flights`] gRPC service defined in `proto/flight.proto`.
//!
//! ## Responsibilities
//!
//! - Answer `GetFlight` with an exact-match lookup against the [`Catalog`].
//! - Stream the catalog for `GetFlightList` through [`feed_flights`], one
//!   flight at a time over a bounded channel.
//! - Refuse new streams and stop in-flight ones once shutdown begins.

use crate::server::{
    config::ServerConfig,
    service::catalog::Catalog,
    streaming::feeder::feed_flights,
    telemetry::{
        decrement_streams_inflight, increment_flights_streamed, increment_requests,
        increment_stream_errors, increment_streams_inflight, record_stream_duration,
    },
};
use core::pin::Pin;
use flights_tonic_core::{
    Error,
    proto::{Flight, flights_server::Flights},
};
use futures::TryStreamExt;
use tokio::sync::mpsc;
use tokio_stream::{Stream, wrappers::ReceiverStream};
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tracing::Instrument;

/// gRPC service answering flight lookups and streaming the flight list.
///
/// Cheap to clone: clones share the catalog and the shutdown token.
#[derive(Clone, Debug)]
pub struct FlightService {
    config: ServerConfig,
    catalog: Catalog,
    shutdown_token: CancellationToken,
}

impl FlightService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Begins shutdown.
    ///
    /// New `GetFlightList` calls are rejected with `UNAVAILABLE`, and
    /// in-flight streams end before sending their next flight.
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }
}

#[tonic::async_trait]
impl Flights for FlightService {
    type GetFlightListStream = Pin<Box<dyn Stream<Item = Result<Flight, Status>> + Send>>;

    /// Handles a unary flight lookup.
    ///
    /// Always succeeds: a query that does not match is answered with an empty
    /// `Flight`.
    #[tracing::instrument(
        skip_all,
        fields(
            airline_code = %req.get_ref().airline_code,
            number = %req.get_ref().number
        )
    )]
    async fn get_flight(&self, req: Request<Flight>) -> Result<Response<Flight>, Status> {
        increment_requests("GetFlight");

        let flight = self.catalog.lookup(req.get_ref());
        if flight.is_empty() {
            tracing::info!("No matching flight");
        } else {
            tracing::info!(%flight, "Found flight");
        }

        Ok(Response::new(flight))
    }

    /// Handles a streaming request for the full flight list.
    ///
    /// A producer task feeds the catalog into a bounded channel that backs the
    /// response stream. When the client goes away the next send fails, the
    /// producer logs a transport error, and nothing more is emitted.
    #[tracing::instrument(skip_all)]
    async fn get_flight_list(
        &self,
        _req: Request<()>,
    ) -> Result<Response<Self::GetFlightListStream>, Status> {
        if self.shutdown_token.is_cancelled() {
            increment_stream_errors();
            return Err(Error::ServiceShutdown.into());
        }

        let start = std::time::Instant::now();
        increment_requests("GetFlightList");
        increment_streams_inflight();

        let (mut resp_tx, resp_rx) =
            mpsc::channel::<Result<Flight, Status>>(self.config.stream_buffer_size);

        let catalog = self.catalog.clone();
        let shutdown = self.shutdown_token.clone();

        let fut = async move {
            let res = feed_flights(catalog.iter().cloned(), &mut resp_tx, &shutdown).await;
            match res {
                Ok(sent) => {
                    record_stream_duration(start.elapsed().as_millis() as f64);
                    tracing::info!(sent, "Flight list stream complete");
                }
                Err(Error::ServiceShutdown) => {
                    increment_stream_errors();
                    // Best effort: the client may already be gone.
                    if let Err(e) = resp_tx.send(Err(Error::ServiceShutdown.into())).await {
                        tracing::debug!("Failed to forward shutdown status: {e}");
                    }
                    tracing::info!("Flight list stream stopped for shutdown");
                }
                Err(e) => {
                    increment_stream_errors();
                    tracing::warn!("Flight list stream aborted: {e}");
                }
            }
            decrement_streams_inflight();
        }
        .instrument(tracing::info_span!("streaming"));

        tokio::spawn(fut);

        let stream = ReceiverStream::new(resp_rx).inspect_ok(|_| increment_flights_streamed());

        Ok(Response::new(Box::pin(stream)))
    }
}
