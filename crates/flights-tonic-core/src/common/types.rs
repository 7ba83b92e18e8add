//! Default endpoints and convenience helpers for the [`Flight`] message.

use crate::proto::Flight;
use core::fmt;

/// Address the server binds to when none is configured.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Endpoint the client dials when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

impl Flight {
    /// Builds a flight from its carrier code and flight number.
    pub fn new(airline_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            airline_code: airline_code.into(),
            number: number.into(),
        }
    }

    /// Returns `true` if both fields hold their default (empty) value.
    ///
    /// The lookup RPC answers "no such flight" with an empty message, so this
    /// is how callers tell a hit from a miss.
    pub fn is_empty(&self) -> bool {
        self.airline_code.is_empty() && self.number.is_empty()
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.airline_code, self.number)
    }
}
