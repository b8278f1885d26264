use thiserror::Error;

/// Failures while fetching or decoding the earthquake feed. One attempt per
/// load; the caller decides whether to try again.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("feed responded with HTTP {0}")]
    Status(u16),
    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
}

/// Failures in the map session lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("map surface failed to initialize: {0}")]
    Initialization(String),
    #[error("map surface closed before signalling ready")]
    SurfaceClosed,
    #[error("session already started; create a new session to reconfigure")]
    AlreadyStarted,
    #[error("map surface rejected {operation}: {reason}")]
    Surface { operation: String, reason: String },
}

/// Failures building a style rule from breakpoint stops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("style rule needs at least one stop")]
    NoStops,
    #[error("style rule thresholds must be strictly increasing (stop {0})")]
    UnorderedStops(usize),
}
