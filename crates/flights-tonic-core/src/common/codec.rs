//! Binary encoding of a single [`Flight`].
//!
//! Flights use the standard protobuf wire format: every non-empty field is
//! written as a tag (field number and wire type) followed by a
//! length-delimited UTF-8 payload. Empty fields are omitted, so the encoding
//! of a given value is always the same byte sequence.
//!
//! Decoding is strict about structure but lenient about content it does not
//! know: truncated input, a zero tag, a wire type that does not match a
//! declared field, or invalid UTF-8 all yield [`Error::MalformedInput`], while
//! unknown field numbers are skipped. Fields absent from the input decode to
//! the empty string.

use crate::{Error, Result, proto::Flight};
use bytes::{Buf, Bytes};
use prost::Message;

/// Encodes `flight` into its protobuf byte representation.
pub fn encode(flight: &Flight) -> Bytes {
    Bytes::from(flight.encode_to_vec())
}

/// Exact number of bytes [`encode`] will produce for `flight`.
pub fn encoded_len(flight: &Flight) -> usize {
    Message::encoded_len(flight)
}

/// Decodes a `Flight` from `buf`.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if `buf` is not a valid encoding.
pub fn decode(buf: impl Buf) -> Result<Flight> {
    Flight::decode(buf).map_err(Error::from)
}

/// Renders bytes as space-separated, zero-padded binary octets.
pub fn format_bits(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}
