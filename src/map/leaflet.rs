use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{Bounds, LayerHandle, MapSurface, MarkerHandle, MarkerSlot, PolylineStyle};
use crate::config::AppConfig;
use crate::models::Coordinate;

const MARKER_SIZE: u32 = 26;

// Bindings for the subset of the global Leaflet `L` namespace we drive
#[wasm_bindgen]
extern "C" {
    type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn leaflet_map(element: &web_sys::HtmlElement) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64);

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &Layer);

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &LeafletMap, bounds: &JsValue);

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = on)]
    fn on_map(this: &LeafletMap, event: &str, handler: &js_sys::Function);

    #[derive(Clone)]
    type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str);

    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &Layer, content: &str, options: &JsValue);

    #[wasm_bindgen(method, js_name = bringToFront)]
    fn bring_to_front(this: &Layer);

    #[wasm_bindgen(method, js_name = getLatLng)]
    fn get_lat_lng(this: &Layer) -> LatLng;

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &Layer, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    fn polyline(latlngs: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(latlng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    fn div_icon(options: &JsValue) -> JsValue;

    type LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;

    /// Normalizes longitude into [-180, 180] after the map wrapped around
    #[wasm_bindgen(method)]
    fn wrap(this: &LatLng) -> LatLng;

    type MapMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &MapMouseEvent) -> LatLng;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathOptions<'a> {
    color: &'a str,
    weight: f64,
    opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    dash_array: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconOptions<'a> {
    class_name: &'a str,
    html: &'a str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

#[derive(Serialize)]
struct TooltipOptions {
    permanent: bool,
    direction: &'static str,
    offset: [i32; 2],
}

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        leptos::logging::warn!("Failed to convert map options: {e}");
        JsValue::UNDEFINED
    })
}

fn to_coordinate(position: &LatLng) -> Option<Coordinate> {
    let position = position.wrap();
    match Coordinate::new(position.lat(), position.lng()) {
        Ok(at) => Some(at),
        Err(e) => {
            leptos::logging::warn!("Ignoring map position: {e}");
            None
        }
    }
}

type DragHandler = Rc<dyn Fn(MarkerSlot, Coordinate)>;

struct PlacedMarker {
    layer: Layer,
    // Dropped together with the marker so the listener does not outlive it
    _on_drag_end: Closure<dyn FnMut()>,
}

/// [`MapSurface`] backed by a Leaflet map living in the page
pub struct LeafletSurface {
    map: LeafletMap,
    next_id: u32,
    layers: HashMap<LayerHandle, Layer>,
    markers: HashMap<MarkerHandle, PlacedMarker>,
    on_click: Option<Closure<dyn FnMut(JsValue)>>,
    on_drag: Option<DragHandler>,
}

impl LeafletSurface {
    /// Create the Leaflet map inside `element`, centered and tiled per `config`
    #[must_use]
    pub fn mount(element: &web_sys::HtmlElement, config: &AppConfig) -> Self {
        let map = leaflet_map(element);
        map.set_view(&to_js(&config.initial_center), f64::from(config.initial_zoom));
        tile_layer(
            &config.tile_url,
            &to_js(&TileOptions {
                attribution: &config.tile_attribution,
            }),
        )
        .add_to(&map);

        Self {
            map,
            next_id: 0,
            layers: HashMap::new(),
            markers: HashMap::new(),
            on_click: None,
            on_drag: None,
        }
    }

    /// Route map clicks to `handler`. Install once; the map keeps calling
    /// the listener for its whole lifetime.
    pub fn set_click_handler(&mut self, handler: impl Fn(Coordinate) + 'static) {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let event: MapMouseEvent = event.unchecked_into();
            if let Some(at) = to_coordinate(&event.latlng()) {
                handler(at);
            }
        });
        self.map.on_map("click", closure.as_ref().unchecked_ref());
        self.on_click = Some(closure);
    }

    /// Handler invoked when the user finishes dragging a marker created
    /// after this call
    pub fn set_drag_handler(&mut self, handler: impl Fn(MarkerSlot, Coordinate) + 'static) {
        self.on_drag = Some(Rc::new(handler));
    }

    /// Recompute the map size after its container was laid out
    pub fn refresh_size(&self) {
        self.map.invalidate_size();
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapSurface for LeafletSurface {
    fn add_polyline(&mut self, path: &[Coordinate], style: &PolylineStyle, popup: &str) -> LayerHandle {
        let latlngs: Vec<[f64; 2]> = path.iter().map(|c| c.to_lat_lon()).collect();
        let options = PathOptions {
            color: style.color,
            weight: style.weight,
            opacity: style.opacity,
            dash_array: style.dash_array,
        };
        let layer = polyline(&to_js(&latlngs), &to_js(&options));
        layer.add_to(&self.map);
        layer.bind_popup(popup);

        let handle = LayerHandle::from_raw(self.next_id());
        self.layers.insert(handle, layer);
        handle
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        if let Some(layer) = self.layers.remove(&layer) {
            self.map.remove_layer(&layer);
        }
    }

    fn bring_to_front(&mut self, layer: LayerHandle) {
        if let Some(layer) = self.layers.get(&layer) {
            layer.bring_to_front();
        }
    }

    fn add_marker(&mut self, slot: MarkerSlot, at: Coordinate) -> MarkerHandle {
        let icon = div_icon(&to_js(&IconOptions {
            class_name: slot.icon_class(),
            html: slot.glyph(),
            icon_size: [MARKER_SIZE, MARKER_SIZE],
            icon_anchor: [MARKER_SIZE / 2, MARKER_SIZE / 2],
        }));
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str("draggable"), &JsValue::TRUE);
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon);

        let layer = marker(&to_js(&at.to_lat_lon()), &options);
        layer.add_to(&self.map);
        layer.bind_popup(slot.label());
        layer.bind_tooltip(
            slot.tooltip(),
            &to_js(&TooltipOptions {
                permanent: false,
                direction: "top",
                offset: [0, -18],
            }),
        );

        let on_drag = self.on_drag.clone();
        let dragged = layer.clone();
        let on_drag_end = Closure::<dyn FnMut()>::new(move || {
            let Some(handler) = on_drag.as_ref() else { return };
            if let Some(at) = to_coordinate(&dragged.get_lat_lng()) {
                handler(slot, at);
            }
        });
        layer.on_layer("dragend", on_drag_end.as_ref().unchecked_ref());

        let handle = MarkerHandle::from_raw(self.next_id());
        self.markers.insert(
            handle,
            PlacedMarker {
                layer,
                _on_drag_end: on_drag_end,
            },
        );
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if let Some(placed) = self.markers.remove(&marker) {
            self.map.remove_layer(&placed.layer);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.map.fit_bounds(&to_js(&bounds.corners()));
    }
}
