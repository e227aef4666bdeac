use leptos::{component, view, Callable, Callback, Children, IntoView, MaybeSignal, SignalGet};

#[component]
#[must_use]
pub fn Button(
    /// The click handler to call when button is clicked
    on_click: Callback<web_sys::MouseEvent>,
    /// The button contents (icons, text, etc.)
    children: Children,
    /// Optional element id
    #[prop(optional, into)]
    id: Option<String>,
    /// Optional CSS class for the button
    #[prop(optional, into)]
    class: MaybeSignal<String>,
    /// Disables the button while true
    #[prop(optional, into)]
    disabled: MaybeSignal<bool>,
    /// Optional title/tooltip for the button
    #[prop(optional, into)]
    title: Option<String>,
) -> impl IntoView {
    view! {
        <button
            id=id
            class=move || class.get()
            disabled=move || disabled.get()
            on:click=move |ev| on_click.call(ev)
            title=title.unwrap_or_default()
        >
            {children()}
        </button>
    }
}
