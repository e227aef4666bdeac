use leptos::wasm_bindgen::closure::Closure;
use leptos::wasm_bindgen::JsCast;
use leptos::{component, create_effect, create_node_ref, html, store_value, view, Callable, Callback, IntoView};

/// Container for the Leaflet map. `on_ready` fires once, after the element
/// has been laid out, with the element the map should be mounted into.
#[component]
pub fn MapView(on_ready: Callback<web_sys::HtmlElement>) -> impl IntoView {
    let map_ref = create_node_ref::<html::Div>();
    let mounted = store_value(false);

    create_effect(move |_| {
        let Some(div) = map_ref.get() else {
            return;
        };
        if mounted.get_value() {
            return;
        }
        mounted.set_value(true);

        let element: web_sys::HtmlElement = (*div).clone().unchecked_into();
        // Leaflet measures its container on creation, so wait for layout
        let callback = Closure::once(move || on_ready.call(element));
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
            callback.forget();
        }
    });

    view! {
        <div id="map" class="map-view" node_ref=map_ref></div>
    }
}
