use leptos::{component, view, Callable, Callback, For, IntoView, Signal, SignalGet};

use crate::constants::RANK_COLORS;
use crate::render::{ScoreboardRow, FALLBACK_COLOR};

#[component]
#[must_use]
pub fn Scoreboard(rows: Signal<Vec<ScoreboardRow>>, on_select: Callback<usize>) -> impl IntoView {
    view! {
        <div id="scoreboard" class="scoreboard">
            {move || {
                if rows.get().is_empty() {
                    view! { <p class="scoreboard-empty">"No routes yet"</p> }.into_view()
                } else {
                    view! {
                        <table>
                            <thead>
                                <tr>
                                    <th>"Rank"</th>
                                    <th>"Score"</th>
                                    <th>"Distance (km)"</th>
                                    <th>"Time (min)"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rows.get()
                                    key=|row: &ScoreboardRow| row.clone()
                                    children=move |row| {
                                        let index = row.index;
                                        let swatch = RANK_COLORS.get(index).copied().unwrap_or(FALLBACK_COLOR);
                                        view! {
                                            <tr
                                                class="scoreboard-row"
                                                class:active=row.active
                                                on:click=move |_| on_select.call(index)
                                            >
                                                <td>
                                                    <span class="swatch" style=format!("background:{swatch}")></span>
                                                    {row.rank}
                                                </td>
                                                <td>{row.score}</td>
                                                <td>{row.distance_km}</td>
                                                <td>{row.duration_min}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}
