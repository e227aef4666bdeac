use leptos::{component, view, Callable, Callback, For, IntoView, Signal, SignalGet};

use crate::models::Message;

/// Activity log, newest entry at the bottom
#[component]
#[must_use]
pub fn MessagePanel(messages: Signal<Vec<Message>>, on_clear: Callback<()>) -> impl IntoView {
    view! {
        <div class="message-panel">
            <div class="message-panel-header">
                <h3>"Messages"</h3>
                <button class="clear-messages" on:click=move |_| on_clear.call(())>"Clear"</button>
            </div>
            <ul id="messages">
                <For
                    each=move || messages.get().into_iter().enumerate()
                    key=|(i, message)| (*i, message.time.clone(), message.text.clone())
                    children=move |(_, message)| {
                        view! {
                            <li class=message.level.css_class()>
                                <span class="message-time">{message.time}</span>
                                " "
                                <span class="message-text">{message.text}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
