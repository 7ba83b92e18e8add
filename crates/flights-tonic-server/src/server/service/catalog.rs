//! The fixed set of flights served by this process.
//!
//! The catalog is built once when the service starts and never changes.
//! Clones share the same backing slice.

use flights_tonic_core::proto::Flight;
use std::sync::Arc;

/// Flights returned by `GetFlightList`, in emission order.
pub const SCHEDULED_FLIGHTS: [(&str, &str); 3] =
    [("AS", "3567"), ("DL", "1234"), ("AA", "5678")];

/// The single flight `GetFlight` can find.
pub const LOOKUP_FLIGHT: (&str, &str) = ("AS", "3567");

#[derive(Clone, Debug)]
pub struct Catalog {
    flights: Arc<[Flight]>,
    lookup: Arc<Flight>,
}

impl Catalog {
    pub fn new() -> Self {
        let flights = SCHEDULED_FLIGHTS
            .iter()
            .map(|&(airline_code, number)| Flight::new(airline_code, number))
            .collect();
        let (airline_code, number) = LOOKUP_FLIGHT;

        Self {
            flights,
            lookup: Arc::new(Flight::new(airline_code, number)),
        }
    }

    /// Exact-match lookup against the single searchable flight.
    ///
    /// A miss is answered with an empty `Flight`, not an error. Only
    /// [`LOOKUP_FLIGHT`] is searchable, even though the list holds more.
    pub fn lookup(&self, query: &Flight) -> Flight {
        if query.airline_code == self.lookup.airline_code && query.number == self.lookup.number {
            Flight::clone(&self.lookup)
        } else {
            Flight::default()
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Flight> {
        self.flights.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_flights_in_declaration_order() {
        let catalog = Catalog::new();
        let flights: Vec<_> = catalog.iter().map(ToString::to_string).collect();
        assert_eq!(flights, ["AS3567", "DL1234", "AA5678"]);
        assert_eq!(catalog.iter().len(), 3);
    }

    #[test]
    fn lookup_matches_both_fields() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.lookup(&Flight::new("AS", "3567")),
            Flight::new("AS", "3567")
        );
        assert!(catalog.lookup(&Flight::new("AS", "0000")).is_empty());
        assert!(catalog.lookup(&Flight::new("XX", "3567")).is_empty());
        assert!(catalog.lookup(&Flight::default()).is_empty());
    }

    #[test]
    fn lookup_is_not_an_index_over_the_list() {
        let catalog = Catalog::new();
        assert!(catalog.lookup(&Flight::new("DL", "1234")).is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let a = Catalog::new();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.flights, &b.flights));
    }
}
