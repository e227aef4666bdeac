use crate::map::{MapSurface, MarkerHandle, MarkerSlot};
use crate::models::{format_coordinate, parse_coordinate, Coordinate};

/// A marker slot and the text field that mirrors it
#[derive(Debug, Default)]
struct Endpoint {
    marker: Option<MarkerHandle>,
    text: String,
}

impl Endpoint {
    fn is_filled(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// What the caller has to do after a marker interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct MarkerEffect {
    /// Drawn routes no longer match the endpoints and must be cleared
    pub routes_stale: bool,
    /// Auto-fetch is on and both endpoints are set
    pub fetch_requested: bool,
}

/// Owns the start/end markers and their coordinate fields.
///
/// Each slot holds at most one marker; placing a new one always removes the
/// previous marker from the map first.
#[derive(Debug, Default)]
pub struct MarkerController {
    start: Endpoint,
    end: Endpoint,
}

impl MarkerController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self, slot: MarkerSlot) -> &str {
        &self.endpoint(slot).text
    }

    #[must_use]
    pub fn marker(&self, slot: MarkerSlot) -> Option<MarkerHandle> {
        self.endpoint(slot).marker
    }

    #[must_use]
    pub fn both_filled(&self) -> bool {
        self.start.is_filled() && self.end.is_filled()
    }

    /// Update a field from typed input; markers stay where they are
    pub fn set_text(&mut self, slot: MarkerSlot, text: impl Into<String>) {
        self.endpoint_mut(slot).text = text.into();
    }

    /// Handle a click on the map.
    ///
    /// The first click sets the start point, later clicks set (or move) the
    /// end point and make the drawn routes stale.
    pub fn on_map_click<S: MapSurface>(
        &mut self,
        surface: &mut S,
        at: Coordinate,
        auto_fetch: bool,
    ) -> MarkerEffect {
        let slot = if self.start.is_filled() {
            MarkerSlot::End
        } else {
            MarkerSlot::Start
        };
        self.place(surface, slot, at);

        MarkerEffect {
            routes_stale: slot == MarkerSlot::End,
            fetch_requested: auto_fetch && self.both_filled(),
        }
    }

    /// The marker in `slot` was dragged to `at`; the map already shows it there
    pub fn on_drag_end(&mut self, slot: MarkerSlot, at: Coordinate, auto_fetch: bool) -> MarkerEffect {
        self.endpoint_mut(slot).text = format_coordinate(at);
        MarkerEffect {
            routes_stale: false,
            fetch_requested: auto_fetch && self.both_filled(),
        }
    }

    /// Exchange start and end, recreating both markers from the swapped text.
    /// Fields that are empty or do not parse get no marker.
    pub fn swap<S: MapSurface>(&mut self, surface: &mut S, auto_fetch: bool) -> MarkerEffect {
        std::mem::swap(&mut self.start.text, &mut self.end.text);
        self.release(surface, MarkerSlot::Start);
        self.release(surface, MarkerSlot::End);

        for slot in [MarkerSlot::Start, MarkerSlot::End] {
            if let Ok(at) = parse_coordinate(self.text(slot)) {
                let marker = surface.add_marker(slot, at);
                self.endpoint_mut(slot).marker = Some(marker);
            }
        }

        MarkerEffect {
            routes_stale: true,
            fetch_requested: auto_fetch && self.both_filled(),
        }
    }

    /// Remove both markers and empty both fields
    pub fn clear_markers<S: MapSurface>(&mut self, surface: &mut S) -> MarkerEffect {
        for slot in [MarkerSlot::Start, MarkerSlot::End] {
            self.release(surface, slot);
            self.endpoint_mut(slot).text.clear();
        }
        MarkerEffect {
            routes_stale: true,
            fetch_requested: false,
        }
    }

    fn place<S: MapSurface>(&mut self, surface: &mut S, slot: MarkerSlot, at: Coordinate) {
        self.release(surface, slot);
        let marker = surface.add_marker(slot, at);
        let endpoint = self.endpoint_mut(slot);
        endpoint.marker = Some(marker);
        endpoint.text = format_coordinate(at);
    }

    fn release<S: MapSurface>(&mut self, surface: &mut S, slot: MarkerSlot) {
        if let Some(marker) = self.endpoint_mut(slot).marker.take() {
            surface.remove_marker(marker);
        }
    }

    const fn endpoint(&self, slot: MarkerSlot) -> &Endpoint {
        match slot {
            MarkerSlot::Start => &self.start,
            MarkerSlot::End => &self.end,
        }
    }

    fn endpoint_mut(&mut self, slot: MarkerSlot) -> &mut Endpoint {
        match slot {
            MarkerSlot::Start => &mut self.start,
            MarkerSlot::End => &mut self.end,
        }
    }
}
