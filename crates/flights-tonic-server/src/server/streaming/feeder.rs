use flights_tonic_core::{Error, proto::Flight};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// The consuming end of a flight stream.
///
/// A send suspends until the consumer has room for the flight and fails once
/// the consumer is gone.
pub trait FlightSink {
    fn send(
        &mut self,
        flight: Flight,
    ) -> impl Future<Output = flights_tonic_core::Result<()>> + Send;
}

/// The response channel backing a tonic server stream.
///
/// The receiving half is dropped by tonic when the client disconnects or
/// cancels, after which every send fails with [`Error::Transport`].
impl FlightSink for mpsc::Sender<Result<Flight, Status>> {
    async fn send(&mut self, flight: Flight) -> flights_tonic_core::Result<()> {
        mpsc::Sender::send(self, Ok(flight))
            .await
            .map_err(|e| Error::Transport {
                context: format!("Failed to forward flight: {e}"),
            })
    }
}

/// Pushes every flight produced by `flights` into `sink`, in order.
///
/// Flights are pulled from the iterator one at a time, so nothing beyond the
/// flight currently being sent is materialized here.
///
/// # Behavior
///
/// - Returns the number of flights delivered once the iterator is exhausted.
/// - Stops at the first failed send and returns its [`Error::Transport`];
///   flights already delivered stay delivered.
/// - Returns [`Error::ServiceShutdown`] if `shutdown` fires before or while
///   waiting on a send.
pub async fn feed_flights<I, S>(
    flights: I,
    sink: &mut S,
    shutdown: &CancellationToken,
) -> flights_tonic_core::Result<usize>
where
    I: IntoIterator<Item = Flight>,
    S: FlightSink,
{
    let mut sent = 0;

    for flight in flights {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(Error::ServiceShutdown),
            res = sink.send(flight) => res?,
        }
        sent += 1;
        tracing::trace!(sent, "Flight forwarded");
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::catalog::Catalog;
    use futures::StreamExt;
    use tokio_stream::wrappers::ReceiverStream;

    /// Accepts `capacity` flights, then behaves like a disconnected peer.
    struct DisconnectingSink {
        capacity: usize,
        delivered: Vec<Flight>,
        attempts: usize,
    }

    impl DisconnectingSink {
        fn new(capacity: usize) -> Self {
            Self {
                capacity,
                delivered: Vec::new(),
                attempts: 0,
            }
        }
    }

    impl FlightSink for DisconnectingSink {
        async fn send(&mut self, flight: Flight) -> flights_tonic_core::Result<()> {
            self.attempts += 1;
            if self.delivered.len() == self.capacity {
                return Err(Error::Transport {
                    context: "peer disconnected".into(),
                });
            }
            self.delivered.push(flight);
            Ok(())
        }
    }

    #[tokio::test]
    async fn feeds_all_flights_in_order() {
        let catalog = Catalog::new();
        let mut sink = DisconnectingSink::new(usize::MAX);

        let sent = feed_flights(catalog.iter().cloned(), &mut sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(sent, 3);
        assert_eq!(
            sink.delivered,
            [
                Flight::new("AS", "3567"),
                Flight::new("DL", "1234"),
                Flight::new("AA", "5678"),
            ]
        );
    }

    #[tokio::test]
    async fn stops_at_first_failed_send() {
        let catalog = Catalog::new();
        let mut sink = DisconnectingSink::new(1);

        let res = feed_flights(catalog.iter().cloned(), &mut sink, &CancellationToken::new()).await;

        assert!(matches!(res, Err(Error::Transport { .. })));
        assert_eq!(sink.delivered, [Flight::new("AS", "3567")]);
        // The third flight is never attempted.
        assert_eq!(sink.attempts, 2);
    }

    #[tokio::test]
    async fn closed_channel_is_a_transport_error() {
        let (mut tx, rx) = mpsc::channel(1);
        drop(rx);

        let res = feed_flights(
            Catalog::new().iter().cloned(),
            &mut tx,
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(res, Err(Error::Transport { .. })));
    }

    #[tokio::test]
    async fn channel_delivers_through_a_receiver_stream() {
        let (mut tx, rx) = mpsc::channel(1);
        let producer = tokio::spawn(async move {
            let catalog = Catalog::new();
            feed_flights(catalog.iter().cloned(), &mut tx, &CancellationToken::new()).await
        });

        let received: Vec<_> = ReceiverStream::new(rx)
            .map(|res| res.unwrap().to_string())
            .collect()
            .await;

        assert_eq!(received, ["AS3567", "DL1234", "AA5678"]);
        assert_eq!(producer.await.unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_sending() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let mut sink = DisconnectingSink::new(usize::MAX);

        let res = feed_flights(Catalog::new().iter().cloned(), &mut sink, &shutdown).await;

        assert!(matches!(res, Err(Error::ServiceShutdown)));
        assert!(sink.delivered.is_empty());
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_blocked_send() {
        // Capacity 1 and nobody reading: the second send blocks forever.
        let (mut tx, _rx) = mpsc::channel(1);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let producer = tokio::spawn(async move {
            let catalog = Catalog::new();
            feed_flights(catalog.iter().cloned(), &mut tx, &token).await
        });

        tokio::task::yield_now().await;
        shutdown.cancel();

        let res = producer.await.unwrap();
        assert!(matches!(res, Err(Error::ServiceShutdown)));
    }
}
