use leptos::{component, view, IntoView};

use crate::constants::RANK_COLORS;

const LABELS: [&str; 3] = ["Safest", "Second", "Third"];

#[component]
#[must_use]
pub fn Legend() -> impl IntoView {
    view! {
        <div class="legend">
            <h4>"Safety Ranking"</h4>
            {LABELS
                .iter()
                .zip(RANK_COLORS.iter())
                .map(|(label, color)| {
                    view! {
                        <div class="legend-item">
                            <span class="legend-swatch" style=format!("background:{color}")></span>
                            <span>{*label}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
