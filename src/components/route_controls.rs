use leptos::{component, event_target_checked, event_target_value, view, Callable, Callback, IntoView, Signal, SignalGet};

use super::button::Button;
use crate::map::MarkerSlot;

#[component]
#[must_use]
pub fn RouteControls(
    start_text: Signal<String>,
    end_text: Signal<String>,
    is_loading: Signal<bool>,
    auto_fetch: Signal<bool>,
    on_text: Callback<(MarkerSlot, String)>,
    on_fetch: Callback<()>,
    on_swap: Callback<()>,
    on_clear_markers: Callback<()>,
    on_clear_routes: Callback<()>,
    on_auto_fetch: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="route-controls">
            <label class="field">
                <span>"Start (lat,lon)"</span>
                <input
                    id="start"
                    type="text"
                    placeholder="30.7333,76.7794"
                    prop:value=move || start_text.get()
                    on:input=move |ev| on_text.call((MarkerSlot::Start, event_target_value(&ev)))
                />
            </label>
            <label class="field">
                <span>"End (lat,lon)"</span>
                <input
                    id="end"
                    type="text"
                    placeholder="30.7046,76.7179"
                    prop:value=move || end_text.get()
                    on:input=move |ev| on_text.call((MarkerSlot::End, event_target_value(&ev)))
                />
            </label>

            <div class="button-row">
                <Button
                    id="getRoute"
                    class="primary"
                    disabled=is_loading
                    on_click=Callback::new(move |_| on_fetch.call(()))
                >
                    "Get Safest Route"
                </Button>
                <Button id="swap" on_click=Callback::new(move |_| on_swap.call(())) title="Swap start and end">
                    "Swap"
                </Button>
                <Button id="clearMarkers" on_click=Callback::new(move |_| on_clear_markers.call(()))>
                    "Clear Markers"
                </Button>
                <Button id="clearRoutes" on_click=Callback::new(move |_| on_clear_routes.call(()))>
                    "Clear Routes"
                </Button>
            </div>

            <label class="auto-fetch">
                <input
                    id="autoFetch"
                    type="checkbox"
                    prop:checked=move || auto_fetch.get()
                    on:change=move |ev| on_auto_fetch.call(event_target_checked(&ev))
                />
                "Fetch automatically when both points are set"
            </label>

            <div id="loading" class="loading" class:hidden=move || !is_loading.get()>
                "Computing routes..."
            </div>
        </div>
    }
}
