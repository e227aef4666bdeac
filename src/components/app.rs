use leptos::*;
use leptos_meta::*;

use crate::components::controller::RouteController;
use crate::components::legend::Legend;
use crate::components::map_view::MapView;
use crate::components::message_panel::MessagePanel;
use crate::components::route_controls::RouteControls;
use crate::components::scoreboard::Scoreboard;
use crate::config::AppConfig;
use crate::map::{LeafletSurface, MarkerSlot};
use crate::session::SessionSnapshot;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    let (snapshot, set_snapshot) = create_signal(SessionSnapshot::default());
    let (is_loading, set_is_loading) = create_signal(false);
    let (auto_fetch, set_auto_fetch) = create_signal(config.auto_fetch);
    let controller = store_value(None::<RouteController>);

    // Every handler is a no-op until the map has been mounted
    let with_controller = move |f: &dyn Fn(&RouteController)| {
        controller.with_value(|c| {
            if let Some(c) = c {
                f(c);
            }
        });
    };

    let on_map_ready = Callback::new(move |element: web_sys::HtmlElement| {
        let surface = LeafletSurface::mount(&element, &config);
        surface.refresh_size();
        let ctrl = RouteController::new(surface, config.clone(), set_snapshot, set_is_loading);
        controller.set_value(Some(ctrl));
    });

    let start_text = Signal::derive(move || snapshot.with(|s| s.start_text.clone()));
    let end_text = Signal::derive(move || snapshot.with(|s| s.end_text.clone()));
    let rows = Signal::derive(move || snapshot.with(|s| s.rows.clone()));
    let messages = Signal::derive(move || snapshot.with(|s| s.messages.clone()));

    let on_text = Callback::new(move |(slot, text): (MarkerSlot, String)| {
        with_controller(&|c: &RouteController| c.set_field_text(slot, text.clone()));
    });
    let on_fetch = Callback::new(move |()| with_controller(&RouteController::fetch));
    let on_swap = Callback::new(move |()| with_controller(&RouteController::swap_points));
    let on_clear_markers = Callback::new(move |()| with_controller(&RouteController::clear_markers));
    let on_clear_routes = Callback::new(move |()| with_controller(&RouteController::clear_routes));
    let on_auto_fetch = Callback::new(move |enabled: bool| {
        set_auto_fetch.set(enabled);
        with_controller(&|c: &RouteController| c.set_auto_fetch(enabled));
    });
    let on_select = Callback::new(move |index: usize| with_controller(&|c: &RouteController| c.select_route(index)));
    let on_clear_messages = Callback::new(move |()| with_controller(&RouteController::clear_messages));

    view! {
        <Title text="Safest Route Finder"/>

        <div class="app">
            <aside class="sidebar">
                <h1>"Safest Route"</h1>
                <RouteControls
                    start_text=start_text
                    end_text=end_text
                    is_loading=is_loading.into()
                    auto_fetch=auto_fetch.into()
                    on_text=on_text
                    on_fetch=on_fetch
                    on_swap=on_swap
                    on_clear_markers=on_clear_markers
                    on_clear_routes=on_clear_routes
                    on_auto_fetch=on_auto_fetch
                />
                <Scoreboard rows=rows on_select=on_select/>
                <MessagePanel messages=messages on_clear=on_clear_messages/>
            </aside>
            <main class="map-container">
                <MapView on_ready=on_map_ready/>
                <Legend/>
            </main>
        </div>
    }
}
