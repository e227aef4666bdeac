use crate::constants::COORDINATE_DECIMALS;
use crate::error::ParseError;

/// A validated WGS84 position in `(lat, lon)` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Numeric` for NaN/infinite input and
    /// `ParseError::OutOfRange` when latitude is outside [-90, 90] or
    /// longitude is outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, ParseError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ParseError::Numeric(format!("{lat},{lon}")));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ParseError::OutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Build from a GeoJSON-style `[lon, lat]` pair
    ///
    /// # Errors
    ///
    /// Same as [`Coordinate::new`].
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, ParseError> {
        Self::new(lat, lon)
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// `[lat, lon]`, the order the map widget consumes
    #[must_use]
    pub const fn to_lat_lon(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parse free text in `lat,lon` form
///
/// Surrounding whitespace and whitespace around each number is ignored.
///
/// # Errors
///
/// - `ParseError::Format` if the text does not contain exactly one comma
/// - `ParseError::Numeric` if either side is not a finite decimal number
/// - `ParseError::OutOfRange` if the numbers are not a valid position
pub fn parse_coordinate(text: &str) -> Result<Coordinate, ParseError> {
    let trimmed = text.trim();
    let Some((lat_text, lon_text)) = trimmed.split_once(',') else {
        return Err(ParseError::Format { input: trimmed.to_string() });
    };
    if lon_text.contains(',') {
        return Err(ParseError::Format { input: trimmed.to_string() });
    }

    let lat = parse_component(lat_text)?;
    let lon = parse_component(lon_text)?;
    Coordinate::new(lat, lon)
}

fn parse_component(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::Numeric(text.to_string()))
}

/// Render a coordinate the way the text fields show it (`30.733300,76.779400`)
#[must_use]
pub fn format_coordinate(coordinate: Coordinate) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        coordinate.lat,
        coordinate.lon,
        prec = COORDINATE_DECIMALS
    )
}
