use std::collections::HashMap;

use super::{Bounds, LayerHandle, MapSurface, MarkerHandle, MarkerSlot, PolylineStyle};
use crate::models::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawnPolyline {
    pub path: Vec<Coordinate>,
    pub style: PolylineStyle,
    pub popup: String,
}

/// In-memory `MapSurface` that records what would be on screen
#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    next_id: u32,
    pub polylines: HashMap<LayerHandle, DrawnPolyline>,
    /// Live layers, bottom to top
    pub z_order: Vec<LayerHandle>,
    pub markers: HashMap<MarkerHandle, (MarkerSlot, Coordinate)>,
    pub fitted: Vec<Bounds>,
    pub removed_layers: usize,
    pub removed_markers: usize,
}

impl FakeSurface {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn top_layer(&self) -> Option<LayerHandle> {
        self.z_order.last().copied()
    }

    pub fn marker_at(&self, slot: MarkerSlot) -> Vec<Coordinate> {
        self.markers
            .values()
            .filter(|(s, _)| *s == slot)
            .map(|(_, at)| *at)
            .collect()
    }
}

impl MapSurface for FakeSurface {
    fn add_polyline(&mut self, path: &[Coordinate], style: &PolylineStyle, popup: &str) -> LayerHandle {
        let handle = LayerHandle::from_raw(self.next());
        self.polylines.insert(
            handle,
            DrawnPolyline {
                path: path.to_vec(),
                style: style.clone(),
                popup: popup.to_string(),
            },
        );
        self.z_order.push(handle);
        handle
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        if self.polylines.remove(&layer).is_some() {
            self.removed_layers += 1;
        }
        self.z_order.retain(|l| *l != layer);
    }

    fn bring_to_front(&mut self, layer: LayerHandle) {
        if let Some(pos) = self.z_order.iter().position(|l| *l == layer) {
            let layer = self.z_order.remove(pos);
            self.z_order.push(layer);
        }
    }

    fn add_marker(&mut self, slot: MarkerSlot, at: Coordinate) -> MarkerHandle {
        let handle = MarkerHandle::from_raw(self.next());
        self.markers.insert(handle, (slot, at));
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_some() {
            self.removed_markers += 1;
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted.push(bounds);
    }
}
