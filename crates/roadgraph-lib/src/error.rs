use thiserror::Error;

use crate::geometry::GeoPoint;

/// Convenient result alias for the road graph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised by `add_edge` when an endpoint is missing or the edge data is invalid.
    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        from: GeoPoint,
        to: GeoPoint,
        reason: String,
    },

    /// Raised when a search starts from a location that is not a graph vertex.
    #[error("unknown location: {location}")]
    UnknownLocation { location: GeoPoint },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: GeoPoint, goal: GeoPoint },

    /// Raised when a computed route plan lacks any steps.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a coordinate string cannot be parsed.
    #[error("invalid coordinate '{input}'; expected '<lat>,<lon>'")]
    InvalidCoordinate { input: String },

    /// Raised when a road map line cannot be parsed.
    #[error("malformed road map line {line}: {message}")]
    MapParse { line: usize, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
