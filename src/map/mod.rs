mod leaflet;

#[cfg(test)]
pub(crate) mod fake;

pub use leaflet::LeafletSurface;

use crate::models::Coordinate;

/// Opaque reference to a route layer drawn on a [`MapSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(u32);

impl LayerHandle {
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque reference to a start/end marker placed on a [`MapSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u32);

impl MarkerHandle {
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSlot {
    Start,
    End,
}

impl MarkerSlot {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
        }
    }

    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::Start => "Start Point",
            Self::End => "End Point",
        }
    }

    /// Letter shown inside the marker icon
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Start => "S",
            Self::End => "E",
        }
    }

    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Start => "marker-icon marker-start",
            Self::End => "marker-icon marker-end",
        }
    }
}

/// Stroke settings for a drawn route
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    /// SVG dash pattern; `None` draws a solid line
    pub dash_array: Option<&'static str>,
}

/// Axis-aligned geographic box, stored as south-west / north-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point of `path`, or `None` for an empty path
    #[must_use]
    pub fn of(path: &[Coordinate]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let start = Self {
            south: first.lat(),
            west: first.lon(),
            north: first.lat(),
            east: first.lon(),
        };
        Some(rest.iter().fold(start, |b, c| Self {
            south: b.south.min(c.lat()),
            west: b.west.min(c.lon()),
            north: b.north.max(c.lat()),
            east: b.east.max(c.lon()),
        }))
    }

    /// `[[south, west], [north, east]]`, the shape Leaflet expects
    #[must_use]
    pub const fn corners(self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// Drawing capabilities the route view needs from a map widget.
///
/// Handles returned by `add_*` stay valid until passed to the matching
/// `remove_*`; removing an unknown handle is a no-op.
pub trait MapSurface {
    fn add_polyline(&mut self, path: &[Coordinate], style: &PolylineStyle, popup: &str) -> LayerHandle;

    fn remove_layer(&mut self, layer: LayerHandle);

    /// Raise a layer above its siblings
    fn bring_to_front(&mut self, layer: LayerHandle);

    fn add_marker(&mut self, slot: MarkerSlot, at: Coordinate) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);

    fn fit_bounds(&mut self, bounds: Bounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[test]
    fn test_bounds_of_empty_path() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn test_bounds_of_single_point() {
        let bounds = Bounds::of(&[coord(30.0, 76.0)]).expect("non-empty path");
        assert_eq!(bounds.corners(), [[30.0, 76.0], [30.0, 76.0]]);
    }

    #[test]
    fn test_bounds_covers_all_points() {
        let path = [coord(30.2, 76.1), coord(30.0, 76.5), coord(30.4, 75.9)];
        let bounds = Bounds::of(&path).expect("non-empty path");
        assert_eq!(bounds.corners(), [[30.0, 75.9], [30.4, 76.5]]);
    }

    #[test]
    fn test_marker_slot_labels() {
        assert_eq!(MarkerSlot::Start.label(), "Start");
        assert_eq!(MarkerSlot::End.tooltip(), "End Point");
        assert_eq!(MarkerSlot::End.glyph(), "E");
    }
}
