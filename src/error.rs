use thiserror::Error;

/// Failure to read a `"lat,lon"` text field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Use lat,lon format (got \"{input}\")")]
    Format { input: String },
    #[error("Invalid numeric coordinate \"{0}\"")]
    Numeric(String),
    #[error("Coordinate out of range: {lat},{lon}")]
    OutOfRange { lat: f64, lon: f64 },
}

/// Failure reported while talking to the safest-route endpoint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EndpointError {
    #[error("Request failed: HTTP {status}")]
    Transport { status: u16 },
    /// Domain error reported by the server; the text is shown verbatim
    #[error("{0}")]
    Application(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Route index {index} out of range (have {len} routes)")]
pub struct RangeError {
    pub index: usize,
    pub len: usize,
}
