//! The client side of the two Flights calls.
//!
//! A [`FlightQueryClient`] owns one plaintext HTTP/2 channel that is dialed
//! eagerly in [`FlightQueryClient::connect`] and reused for every call.

use super::config::{ClientConfig, Compression};
use flights_tonic_core::{
    Error, Result,
    proto::{Flight, flights_client::FlightsClient},
};
use tonic::{
    codec::CompressionEncoding,
    transport::{Channel, Endpoint},
};

#[derive(Clone, Debug)]
pub struct FlightQueryClient {
    inner: FlightsClient<Channel>,
}

impl FlightQueryClient {
    /// Dials the server described by `config`.
    ///
    /// # Errors
    ///
    /// - [`Error::Setup`] if the URL cannot be turned into an endpoint.
    /// - [`Error::Connection`] if the server cannot be reached.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let mut endpoint =
            Endpoint::from_shared(config.server_url.clone()).map_err(|e| Error::Setup {
                context: format!("invalid server url `{}`: {e}", config.server_url),
            })?;

        if let Some(timeout) = config.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            endpoint = endpoint.timeout(timeout);
        }

        let channel = endpoint.connect().await?;
        Ok(Self::new(channel, config.compression))
    }

    /// Wraps an already established channel.
    pub fn new(channel: Channel, compression: Compression) -> Self {
        let mut inner = FlightsClient::new(channel);
        if let Some(encoding) = Option::<CompressionEncoding>::from(compression) {
            inner = inner
                .send_compressed(encoding)
                .accept_compressed(encoding);
        }
        Self { inner }
    }

    /// Looks up a single flight.
    ///
    /// A miss is not an error: the server answers it with an empty `Flight`
    /// (see [`Flight::is_empty`]).
    ///
    /// # Errors
    ///
    /// [`Error::Rpc`] if the call completes with a non-OK status.
    pub async fn fetch_flight(&mut self, query: Flight) -> Result<Flight> {
        let response = self.inner.get_flight(query).await?;
        Ok(response.into_inner())
    }

    /// Streams the flight list, handing each flight to `on_flight` in the
    /// order the server sent it. Returns the number of flights received once
    /// the server ends the stream.
    ///
    /// # Errors
    ///
    /// - [`Error::Rpc`] if the call is rejected before any flight is sent.
    /// - [`Error::Transport`] if the stream fails part way. Flights handed to
    ///   `on_flight` before the failure are not retracted.
    pub async fn fetch_flight_list<F>(&mut self, mut on_flight: F) -> Result<usize>
    where
        F: FnMut(Flight),
    {
        let mut stream = self.inner.get_flight_list(()).await?.into_inner();
        let mut received = 0;

        loop {
            match stream.message().await {
                Ok(Some(flight)) => {
                    received += 1;
                    on_flight(flight);
                }
                Ok(None) => break,
                Err(status) => {
                    return Err(Error::Transport {
                        context: format!(
                            "flight list stream failed after {received} flights: {status}"
                        ),
                    });
                }
            }
        }

        Ok(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::{pin::Pin, result::Result, time::Duration};
    use flights_tonic_core::proto::flights_server::{Flights, FlightsServer};
    use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
    use tokio_stream::{Stream, wrappers::TcpListenerStream};
    use tonic::{Code, Request, Response, Status, transport::Server};

    /// In-process stand-in for the real server with scriptable failures.
    #[derive(Clone, Default)]
    struct StubFlights {
        flights: Vec<Flight>,
        /// Replace the stream element at this index with an error.
        fail_at: Option<usize>,
        reject_lookup: bool,
        lookup_delay: Option<Duration>,
    }

    #[tonic::async_trait]
    impl Flights for StubFlights {
        type GetFlightListStream = Pin<Box<dyn Stream<Item = Result<Flight, Status>> + Send>>;

        async fn get_flight(&self, req: Request<Flight>) -> Result<Response<Flight>, Status> {
            if let Some(delay) = self.lookup_delay {
                tokio::time::sleep(delay).await;
            }
            if self.reject_lookup {
                return Err(Status::not_found("no such flight"));
            }
            Ok(Response::new(req.into_inner()))
        }

        async fn get_flight_list(
            &self,
            _req: Request<()>,
        ) -> Result<Response<Self::GetFlightListStream>, Status> {
            let fail_at = self.fail_at;
            let items: Vec<_> = self
                .flights
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, flight)| match fail_at {
                    Some(at) if at == i => Err(Status::internal("boom")),
                    _ => Ok(flight),
                })
                .collect();
            Ok(Response::new(Box::pin(tokio_stream::iter(items))))
        }
    }

    struct Harness {
        config: ClientConfig,
        stop: oneshot::Sender<()>,
        handle: JoinHandle<core::result::Result<(), tonic::transport::Error>>,
    }

    impl Harness {
        async fn start(stub: StubFlights) -> Self {
            let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = tcp.local_addr().unwrap();
            let (stop, stopped) = oneshot::channel::<()>();

            let handle = tokio::spawn(
                Server::builder()
                    .add_service(FlightsServer::new(stub))
                    .serve_with_incoming_shutdown(TcpListenerStream::new(tcp), async {
                        let _ = stopped.await;
                    }),
            );

            Self {
                config: ClientConfig::new(format!("http://{addr}")),
                stop,
                handle,
            }
        }

        async fn stop(self) {
            self.stop.send(()).unwrap();
            self.handle.await.unwrap().unwrap();
        }
    }

    fn sample() -> Vec<Flight> {
        vec![
            Flight::new("AS", "3567"),
            Flight::new("DL", "1234"),
            Flight::new("AA", "5678"),
        ]
    }

    #[tokio::test]
    async fn fetches_flight_and_list_over_one_connection() {
        let harness = Harness::start(StubFlights {
            flights: sample(),
            ..Default::default()
        })
        .await;
        let mut client = FlightQueryClient::connect(&harness.config).await.unwrap();

        let flight = client.fetch_flight(Flight::new("AS", "3567")).await.unwrap();
        assert_eq!(flight, Flight::new("AS", "3567"));

        let mut seen = Vec::new();
        let count = client
            .fetch_flight_list(|flight| seen.push(flight))
            .await
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(seen, sample());

        drop(client);
        harness.stop().await;
    }

    #[tokio::test]
    async fn rpc_failure_is_reported() {
        let harness = Harness::start(StubFlights {
            reject_lookup: true,
            ..Default::default()
        })
        .await;
        let mut client = FlightQueryClient::connect(&harness.config).await.unwrap();

        let err = client.fetch_flight(Flight::default()).await.unwrap_err();
        assert!(matches!(err, Error::Rpc(ref status) if status.code() == Code::NotFound));

        drop(client);
        harness.stop().await;
    }

    #[tokio::test]
    async fn mid_stream_error_aborts_consumption() {
        let harness = Harness::start(StubFlights {
            flights: sample(),
            fail_at: Some(1),
            ..Default::default()
        })
        .await;
        let mut client = FlightQueryClient::connect(&harness.config).await.unwrap();

        let mut seen = Vec::new();
        let err = client
            .fetch_flight_list(|flight| seen.push(flight))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(seen, [Flight::new("AS", "3567")]);

        drop(client);
        harness.stop().await;
    }

    #[tokio::test]
    async fn empty_list_completes_with_zero() {
        let harness = Harness::start(StubFlights::default()).await;
        let mut client = FlightQueryClient::connect(&harness.config).await.unwrap();

        let count = client.fetch_flight_list(|_| {}).await.unwrap();
        assert_eq!(count, 0);

        drop(client);
        harness.stop().await;
    }

    #[tokio::test]
    async fn request_timeout_cuts_slow_calls() {
        let harness = Harness::start(StubFlights {
            lookup_delay: Some(Duration::from_secs(5)),
            ..Default::default()
        })
        .await;
        let mut config = harness.config.clone();
        config.request_timeout = Some(Duration::from_millis(50));
        let mut client = FlightQueryClient::connect(&config).await.unwrap();

        let err = client.fetch_flight(Flight::default()).await.unwrap_err();
        assert!(matches!(err, Error::Rpc(_)));

        drop(client);
        harness.stop().await;
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connection_error() {
        let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = tcp.local_addr().unwrap();
        drop(tcp);

        let err = FlightQueryClient::connect(&ClientConfig::new(format!("http://{addr}")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_a_setup_error() {
        let err = FlightQueryClient::connect(&ClientConfig::new("http://[::1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Setup { .. }));
    }
}
