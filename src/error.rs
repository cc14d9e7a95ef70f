//! Error types for decoding, route assembly and routing-service calls.

use thiserror::Error;

/// A malformed encoded shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The shape ended inside a varint group, or after a latitude with no
    /// matching longitude.
    #[error("shape ends mid-coordinate at byte {position}")]
    Truncated { position: usize },

    /// A byte outside the printable polyline alphabet.
    #[error("invalid byte 0x{byte:02x} at position {position}")]
    InvalidCharacter { byte: u8, position: usize },

    /// A varint group too long to fit a 64-bit delta.
    #[error("coordinate delta overflows at byte {position}")]
    Overflow { position: usize },
}

/// Coordinates that cannot be written as a polyline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Not finite, or too large to scale at the requested precision.
    #[error("coordinate {index} cannot be encoded")]
    OutOfRange { index: usize },
}

/// A trip that cannot be turned into a navigable route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("trip has no legs")]
    NoLegs,

    #[error("leg {leg} has a malformed shape: {source}")]
    Decode {
        leg: usize,
        #[source]
        source: DecodeError,
    },

    #[error("route needs at least two coordinates, got {len}")]
    TooShort { len: usize },

    #[error("maneuver {maneuver} references shape index {shape_index} but the route has {len} points")]
    ManeuverOutOfRange {
        maneuver: usize,
        shape_index: usize,
        len: usize,
    },

    #[error("maneuver {maneuver} has shape indices out of order")]
    ManeuverOrder { maneuver: usize },
}

/// A failed request to the routing service.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection, timeout or other transport-level failure.
    #[error("routing service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error payload.
    #[error("routing service reported an error: {message}")]
    Service { message: String, code: Option<i64> },

    /// Non-success status without a recognisable error payload.
    #[error("routing service returned HTTP {0}")]
    Status(u16),

    #[error("malformed routing response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response parsed but does not describe a usable route.
    #[error("routing response rejected: {0}")]
    Rejected(#[from] RouteError),

    /// The request worker terminated without producing a response.
    #[error("route request aborted: {0}")]
    Aborted(String),
}
