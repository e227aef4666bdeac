use crate::constants::{MAX_DRAWN_ROUTES, RANK_COLORS};
use crate::map::{Bounds, MapSurface, PolylineStyle};
use crate::models::{RouteCandidate, SelectionState};

pub(crate) const FALLBACK_COLOR: &str = "#666";
const SECONDARY_DASH: &str = "6,8";

/// One line of the scoreboard table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardRow {
    pub index: usize,
    pub rank: usize,
    pub score: String,
    pub distance_km: String,
    pub duration_min: String,
    pub active: bool,
}

/// Stroke for the route at `rank_index` (0 = safest).
///
/// The safest route is solid and wide, the runners-up thinner, translucent
/// and dashed. The active route is always the thickest and fully opaque.
#[must_use]
pub fn route_style(rank_index: usize, active: bool) -> PolylineStyle {
    let color = RANK_COLORS.get(rank_index).copied().unwrap_or(FALLBACK_COLOR);
    let is_best = rank_index == 0;
    let weight = match (active, is_best) {
        (true, _) => 8.0,
        (false, true) => 6.0,
        (false, false) => 4.0,
    };
    let opacity = match (active, is_best) {
        (true, _) => 1.0,
        (false, true) => 0.95,
        (false, false) => 0.65,
    };
    PolylineStyle {
        color,
        weight,
        opacity,
        dash_array: if is_best { None } else { Some(SECONDARY_DASH) },
    }
}

#[must_use]
pub fn popup_text(rank_index: usize, route: &RouteCandidate) -> String {
    format!(
        "Rank #{}<br>Score {:.2}<br>Dist {:.2} km",
        rank_index + 1,
        route.score(),
        route.distance_km()
    )
}

/// Remove every route layer currently owned by `state` from the map
pub fn release_layers<S: MapSurface>(state: &mut SelectionState, surface: &mut S) {
    for layer in state.take_layers() {
        surface.remove_layer(layer);
    }
}

/// Project `state` onto the map and return the scoreboard rows.
///
/// Previously drawn layers are removed first. The top routes are drawn in
/// rank order, the active one (if drawn) is raised and the viewport fitted
/// to it.
pub fn render<S: MapSurface>(state: &mut SelectionState, surface: &mut S) -> Vec<ScoreboardRow> {
    release_layers(state, surface);

    let active = state.active_index();
    let mut layers = Vec::with_capacity(MAX_DRAWN_ROUTES);
    for (i, route) in state.ranked().top(MAX_DRAWN_ROUTES).iter().enumerate() {
        let style = route_style(i, active == Some(i));
        layers.push(surface.add_polyline(route.polyline(), &style, &popup_text(i, route)));
    }

    if let Some(i) = active {
        if let (Some(layer), Some(route)) = (layers.get(i), state.ranked().get(i)) {
            if let Some(bounds) = Bounds::of(route.polyline()) {
                surface.fit_bounds(bounds);
            }
            surface.bring_to_front(*layer);
        }
    }

    state.set_layers(layers);
    scoreboard_rows(state)
}

/// Table rows for every ranked route, not only the drawn ones
#[must_use]
pub fn scoreboard_rows(state: &SelectionState) -> Vec<ScoreboardRow> {
    let active = state.active_index();
    state
        .ranked()
        .iter()
        .enumerate()
        .map(|(i, route)| ScoreboardRow {
            index: i,
            rank: i + 1,
            score: format!("{:.2}", route.score()),
            distance_km: format!("{:.2}", route.distance_km()),
            duration_min: route.duration_minutes().to_string(),
            active: active == Some(i),
        })
        .collect()
}
